//! Run summary
//!
//! Per-entry counts and per-document histograms for a finished match run.
//! Only the numbers live here; printing is up to the caller.

use resume_match_common::{Catalog, MatchSets, Tier};
use serde::Serialize;
use std::collections::BTreeMap;

/// Documents with more records than this land in the overflow bucket
pub const HISTOGRAM_LIMIT: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub entry_index: usize,
    pub name: String,
    pub description: String,
    /// Records that hit every required keyword
    pub complete: usize,
    pub partial: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    Exactly(usize),
    Overflow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub documents: usize,
    pub gold: usize,
    pub silver: usize,
    pub unmatched: usize,
    pub entries: Vec<EntrySummary>,
    /// Gold documents by number of records with a required hit
    pub gold_histogram: Vec<(Bucket, usize)>,
    /// Silver documents by number of records
    pub silver_histogram: Vec<(Bucket, usize)>,
}

impl MatchSummary {
    pub fn from_match_sets(catalog: &Catalog, match_sets: &MatchSets) -> Self {
        let mut entries: Vec<EntrySummary> = catalog
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| EntrySummary {
                entry_index: index,
                name: entry.name.clone(),
                description: entry.description.clone(),
                complete: 0,
                partial: 0,
            })
            .collect();

        let mut gold_counts: BTreeMap<usize, usize> = BTreeMap::new();
        let mut silver_counts: BTreeMap<usize, usize> = BTreeMap::new();

        for set in match_sets.iter() {
            for record in &set.records {
                if let Some(summary) = entries.get_mut(record.entry_index) {
                    if record.is_complete() {
                        summary.complete += 1;
                    } else {
                        summary.partial += 1;
                    }
                }
            }

            match set.tier(match_sets.mode) {
                Tier::Gold => {
                    let strong = set.records.iter().filter(|r| !r.matched_required.is_empty()).count();
                    *gold_counts.entry(strong).or_insert(0) += 1;
                }
                Tier::Silver => *silver_counts.entry(set.records.len()).or_insert(0) += 1,
                Tier::Unmatched => {}
            }
        }

        Self {
            documents: match_sets.len(),
            gold: match_sets.count(Tier::Gold),
            silver: match_sets.count(Tier::Silver),
            unmatched: match_sets.count(Tier::Unmatched),
            entries,
            gold_histogram: bucketize(&gold_counts),
            silver_histogram: bucketize(&silver_counts),
        }
    }
}

/// Folds raw counts into 1..=HISTOGRAM_LIMIT plus an overflow bucket; empty buckets are omitted.
fn bucketize(counts: &BTreeMap<usize, usize>) -> Vec<(Bucket, usize)> {
    let mut buckets: Vec<(Bucket, usize)> = (1..=HISTOGRAM_LIMIT)
        .filter_map(|n| counts.get(&n).map(|c| (Bucket::Exactly(n), *c)))
        .collect();

    let overflow: usize = counts
        .iter()
        .filter(|(n, _)| **n > HISTOGRAM_LIMIT)
        .map(|(_, c)| *c)
        .sum();
    if overflow > 0 {
        buckets.push((Bucket::Overflow, overflow));
    }

    buckets
}
