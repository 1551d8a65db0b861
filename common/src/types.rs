//! Match result types
//!
//! Types shared by the matcher, aggregator and recommender:
//! - CatalogEntry: one advertised opportunity and its keyword patterns
//! - MatchRecord: the keywords one document hit for one entry
//! - DocumentMatchSet / MatchSets: per-document records and tier
//! - KeywordHitCount: document-level keyword tallies across a tier

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One opportunity in the catalog.
///
/// `name` is the organization and is not unique: several entries may share
/// a name, one per project the organization offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Patterns that must all hit for a complete match
    #[serde(default, rename = "required", alias = "requiredKeywords")]
    pub required_keywords: Vec<String>,

    /// Patterns that add to a match without gating it
    #[serde(default, rename = "optional", alias = "optionalKeywords")]
    pub optional_keywords: Vec<String>,
}

impl CatalogEntry {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        description: impl Into<String>,
        required: impl IntoIterator<Item = S>,
        optional: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required_keywords: required.into_iter().map(Into::into).collect(),
            optional_keywords: optional.into_iter().map(Into::into).collect(),
        }
    }
}

/// Keywords one document hit for one catalog entry.
///
/// Keywords are stored as the lowercased pattern text, not the matched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Position of the entry in the catalog
    pub entry_index: usize,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub matched_required: BTreeSet<String>,
    pub matched_optional: BTreeSet<String>,
    /// Number of required patterns the entry declares
    pub required_total: usize,
}

impl MatchRecord {
    /// Every keyword of the record, required first.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.matched_required
            .iter()
            .chain(self.matched_optional.iter())
            .map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.matched_required.is_empty() && self.matched_optional.is_empty()
    }

    /// All required patterns of the entry hit (and there was at least one).
    pub fn is_complete(&self) -> bool {
        self.required_total > 0 && self.matched_required.len() == self.required_total
    }
}

/// Match strength of a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Gold,
    Silver,
    Unmatched,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Gold => write!(f, "gold"),
            Tier::Silver => write!(f, "silver"),
            Tier::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// How a document's records decide its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationMode {
    /// Gold when the best (first sorted) record has any required keyword
    #[default]
    BestRecord,
    /// Gold when any record hit every required keyword of its entry
    AllRequired,
}

impl std::str::FromStr for ClassificationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "best" | "best-record" => Ok(ClassificationMode::BestRecord),
            "all" | "all-required" | "strong" => Ok(ClassificationMode::AllRequired),
            _ => Err(format!("Unknown mode: {}. Use best or all-required", s)),
        }
    }
}

/// Which tiers a tally or shortlist draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TierFilter {
    GoldOnly,
    #[default]
    GoldAndSilver,
}

impl TierFilter {
    pub fn includes(&self, tier: Tier) -> bool {
        match self {
            TierFilter::GoldOnly => tier == Tier::Gold,
            TierFilter::GoldAndSilver => matches!(tier, Tier::Gold | Tier::Silver),
        }
    }
}

impl std::str::FromStr for TierFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gold" | "gold-only" => Ok(TierFilter::GoldOnly),
            "gold-silver" | "gold+silver" | "all" => Ok(TierFilter::GoldAndSilver),
            _ => Err(format!("Unknown tier filter: {}. Use gold or gold-silver", s)),
        }
    }
}

impl fmt::Display for TierFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierFilter::GoldOnly => write!(f, "gold"),
            TierFilter::GoldAndSilver => write!(f, "gold-silver"),
        }
    }
}

/// Records of one document, sorted best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMatchSet {
    pub document: String,
    pub records: Vec<MatchRecord>,
}

impl DocumentMatchSet {
    /// Builds the set, dropping empty records and ordering the rest.
    ///
    /// Order is ascending by (required hits, optional hits): the record that
    /// needed the fewest keywords ranks first. Ties keep catalog order.
    pub fn new(document: impl Into<String>, records: Vec<MatchRecord>) -> Self {
        let mut records: Vec<MatchRecord> = records.into_iter().filter(|r| !r.is_empty()).collect();
        records.sort_by_key(|r| (r.matched_required.len(), r.matched_optional.len()));
        Self {
            document: document.into(),
            records,
        }
    }

    pub fn best(&self) -> Option<&MatchRecord> {
        self.records.first()
    }

    pub fn tier(&self, mode: ClassificationMode) -> Tier {
        if self.records.is_empty() {
            return Tier::Unmatched;
        }

        let gold = match mode {
            ClassificationMode::BestRecord => self
                .best()
                .map(|r| !r.matched_required.is_empty())
                .unwrap_or(false),
            ClassificationMode::AllRequired => self.records.iter().any(|r| r.is_complete()),
        };

        if gold {
            Tier::Gold
        } else {
            Tier::Silver
        }
    }

    /// Union of keywords over every record, not just the best one.
    pub fn keywords(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .flat_map(|r| r.keywords())
            .map(str::to_string)
            .collect()
    }

    /// Records for entries carrying the given organization name.
    pub fn records_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MatchRecord> + 'a {
        self.records.iter().filter(move |r| r.name == name)
    }
}

/// Match sets for a whole run, keyed by document identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSets {
    pub mode: ClassificationMode,
    sets: BTreeMap<String, DocumentMatchSet>,
}

impl MatchSets {
    pub fn new(mode: ClassificationMode) -> Self {
        Self {
            mode,
            sets: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, set: DocumentMatchSet) {
        self.sets.insert(set.document.clone(), set);
    }

    pub fn get(&self, document: &str) -> Option<&DocumentMatchSet> {
        self.sets.get(document)
    }

    pub fn tier_of(&self, document: &str) -> Option<Tier> {
        self.sets.get(document).map(|s| s.tier(self.mode))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentMatchSet> {
        self.sets.values()
    }

    /// Sets whose tier passes the filter.
    pub fn in_tier(&self, filter: TierFilter) -> impl Iterator<Item = &DocumentMatchSet> {
        let mode = self.mode;
        self.sets.values().filter(move |s| filter.includes(s.tier(mode)))
    }

    pub fn count(&self, tier: Tier) -> usize {
        self.sets.values().filter(|s| s.tier(self.mode) == tier).count()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Number of documents in which each keyword took part in a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordHitCount {
    pub tier_filter: TierFilter,
    /// Documents that were counted
    pub population: usize,
    counts: BTreeMap<String, usize>,
}

impl KeywordHitCount {
    pub fn new(tier_filter: TierFilter) -> Self {
        Self {
            tier_filter,
            population: 0,
            counts: BTreeMap::new(),
        }
    }

    /// Counts one document; each keyword contributes at most once.
    pub fn record_document<'a>(&mut self, keywords: impl IntoIterator<Item = &'a str>) {
        let unique: BTreeSet<String> = keywords.into_iter().map(|k| k.to_lowercase()).collect();
        for keyword in unique {
            *self.counts.entry(keyword).or_insert(0) += 1;
        }
        self.population += 1;
    }

    /// Folds another tally in; used when documents were counted in partitions.
    pub fn merge(&mut self, other: KeywordHitCount) {
        for (keyword, count) in other.counts {
            *self.counts.entry(keyword).or_insert(0) += count;
        }
        self.population += other.population;
    }

    pub fn get(&self, keyword: &str) -> usize {
        self.counts.get(&keyword.to_lowercase()).copied().unwrap_or(0)
    }

    /// Highest count first, ties alphabetical.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.counts.iter().map(|(k, c)| (k.as_str(), *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
