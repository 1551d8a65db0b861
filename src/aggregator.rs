//! Keyword hit counts
//!
//! Counts, for each keyword, how many documents in the selected tiers
//! matched it through any catalog entry. A document adds at most one to a
//! keyword no matter how many entries it hit that keyword through.

use rayon::prelude::*;
use resume_match_common::{KeywordHitCount, MatchSets, TierFilter};

/// Tallies keywords over the documents whose tier passes `tier_filter`.
///
/// Documents are counted in parallel partitions and the partial tallies
/// merged, which gives the same totals as a sequential pass.
pub fn aggregate(match_sets: &MatchSets, tier_filter: TierFilter) -> KeywordHitCount {
    let population: Vec<_> = match_sets.in_tier(tier_filter).collect();

    population
        .par_iter()
        .fold(
            || KeywordHitCount::new(tier_filter),
            |mut hits, set| {
                let keywords = set.keywords();
                hits.record_document(keywords.iter().map(String::as_str));
                hits
            },
        )
        .reduce(
            || KeywordHitCount::new(tier_filter),
            |mut a, b| {
                a.merge(b);
                a
            },
        )
}
