//! Resume matcher
//!
//! Scores every document against every catalog entry.
//!
//! ## Flow
//! 1. Compile each entry's keywords once (bad patterns become diagnostics)
//! 2. Per document, collect required and optional keyword hits per entry
//! 3. Keep only entries with at least one hit, ordered fewest hits first
//! 4. Tier follows from the ordered records (see `DocumentMatchSet::tier`)

pub mod pattern;

pub use pattern::{KeywordPattern, PatternDiagnostic};

use crate::error::{MatchError, Result};
use crate::scanner::Document;
use rayon::prelude::*;
use resume_match_common::{
    Catalog, CatalogEntry, ClassificationMode, DocumentMatchSet, MatchRecord, MatchSets, Tier,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use tracing::{info, warn};

/// What to do when a document cannot be taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    #[default]
    SkipAndContinue,
    AbortOnFirstError,
}

/// A document left out of the run.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDocument {
    pub path: Option<PathBuf>,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub match_sets: MatchSets,
    pub diagnostics: Vec<PatternDiagnostic>,
    pub skipped: Vec<SkippedDocument>,
}

#[derive(Debug, Clone)]
struct CompiledEntry {
    index: usize,
    name: String,
    description: String,
    required: Vec<KeywordPattern>,
    optional: Vec<KeywordPattern>,
    required_total: usize,
}

impl CompiledEntry {
    fn scan(&self, text: &str) -> Option<MatchRecord> {
        let hits = |patterns: &[KeywordPattern]| -> BTreeSet<String> {
            patterns
                .iter()
                .filter(|p| p.is_match(text))
                .map(|p| p.keyword.clone())
                .collect()
        };

        let matched_required = hits(&self.required);
        let matched_optional = hits(&self.optional);

        if matched_required.is_empty() && matched_optional.is_empty() {
            return None;
        }

        Some(MatchRecord {
            entry_index: self.index,
            name: self.name.clone(),
            description: self.description.clone(),
            matched_required,
            matched_optional,
            required_total: self.required_total,
        })
    }
}

pub struct Matcher {
    entries: Vec<CompiledEntry>,
    diagnostics: Vec<PatternDiagnostic>,
    mode: ClassificationMode,
    policy: ErrorPolicy,
}

impl Matcher {
    pub fn new(catalog: &Catalog) -> Self {
        Self::from_entries(&catalog.entries)
    }

    pub fn from_entries(entries: &[CatalogEntry]) -> Self {
        let mut diagnostics = Vec::new();

        let compiled = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let mut compile_all = |patterns: &[String]| -> Vec<KeywordPattern> {
                    patterns
                        .iter()
                        .map(|pattern| match KeywordPattern::compile(pattern) {
                            Ok(p) => p,
                            Err(message) => {
                                warn!(entry = %entry.name, %pattern, %message, "keyword pattern ignored");
                                diagnostics.push(PatternDiagnostic {
                                    entry_index: index,
                                    entry_name: entry.name.clone(),
                                    pattern: pattern.clone(),
                                    message,
                                });
                                KeywordPattern::never(pattern)
                            }
                        })
                        .collect()
                };

                let required = compile_all(&entry.required_keywords);
                let optional = compile_all(&entry.optional_keywords);
                let required_total = required.iter().map(|p| p.keyword.as_str()).collect::<HashSet<_>>().len();

                CompiledEntry {
                    index,
                    name: entry.name.clone(),
                    description: entry.description.clone(),
                    required,
                    optional,
                    required_total,
                }
            })
            .collect();

        Self {
            entries: compiled,
            diagnostics,
            mode: ClassificationMode::default(),
            policy: ErrorPolicy::default(),
        }
    }

    pub fn with_mode(mut self, mode: ClassificationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn diagnostics(&self) -> &[PatternDiagnostic] {
        &self.diagnostics
    }

    /// Records for one document, best first.
    pub fn match_document(&self, document: &Document) -> DocumentMatchSet {
        let records = self
            .entries
            .iter()
            .filter_map(|entry| entry.scan(&document.text))
            .collect();
        DocumentMatchSet::new(document.identifier.clone(), records)
    }

    /// Matches an already loaded collection.
    ///
    /// Documents are independent, so they are matched in parallel; the
    /// result does not depend on scheduling.
    pub fn match_documents(&self, documents: &[Document]) -> MatchOutcome {
        let sets: Vec<DocumentMatchSet> = documents.par_iter().map(|d| self.match_document(d)).collect();

        let mut match_sets = MatchSets::new(self.mode);
        for set in sets {
            match_sets.insert(set);
        }

        info!(
            documents = match_sets.len(),
            gold = match_sets.count(Tier::Gold),
            silver = match_sets.count(Tier::Silver),
            unmatched = match_sets.count(Tier::Unmatched),
            "matching finished"
        );

        MatchOutcome {
            match_sets,
            diagnostics: self.diagnostics.clone(),
            skipped: Vec::new(),
        }
    }

    /// Takes in documents that may have failed to load, then matches them.
    ///
    /// Under `SkipAndContinue` failures and repeated identifiers are recorded
    /// in `skipped`; under `AbortOnFirstError` the first one is returned.
    pub fn match_sources(
        &self,
        sources: impl IntoIterator<Item = Result<Document>>,
    ) -> Result<(Vec<Document>, MatchOutcome)> {
        let mut documents = Vec::new();
        let mut skipped = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for source in sources {
            let (path, err) = match source {
                Ok(doc) if seen.contains(&doc.identifier) => {
                    (doc.path.clone(), MatchError::DuplicateDocument(doc.identifier))
                }
                Ok(doc) => {
                    seen.insert(doc.identifier.clone());
                    documents.push(doc);
                    continue;
                }
                Err(err) => {
                    let path = match &err {
                        MatchError::DocumentRead { path, .. } => Some(path.clone()),
                        MatchError::Walk(walk) => walk.path().map(|p| p.to_path_buf()),
                        _ => None,
                    };
                    (path, err)
                }
            };

            if self.policy == ErrorPolicy::AbortOnFirstError {
                return Err(err);
            }
            warn!(error = %err, "document skipped");
            skipped.push(SkippedDocument {
                path,
                reason: err.to_string(),
            });
        }

        let mut outcome = self.match_documents(&documents);
        outcome.skipped = skipped;
        Ok((documents, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, required: &[&str], optional: &[&str]) -> CatalogEntry {
        CatalogEntry::new(name, "", required.iter().copied(), optional.iter().copied())
    }

    #[test]
    fn test_gold_scenario() {
        let matcher = Matcher::from_entries(&[entry("Cadasta", &["django"], &["oauth"])]);
        let set = matcher.match_document(&Document::new("a.txt", "I built a Django app with OAuth login."));

        assert_eq!(set.records.len(), 1);
        let record = &set.records[0];
        assert!(record.matched_required.contains("django"));
        assert!(record.matched_optional.contains("oauth"));
        assert_eq!(set.tier(ClassificationMode::BestRecord), Tier::Gold);
    }

    #[test]
    fn test_unmatched_scenario() {
        let matcher = Matcher::from_entries(&[entry("GNOME", &["gtk"], &[])]);
        let set = matcher.match_document(&Document::new("b.txt", "I know Python and C."));
        assert!(set.records.is_empty());
        assert_eq!(set.tier(ClassificationMode::BestRecord), Tier::Unmatched);
    }

    #[test]
    fn test_bad_pattern_does_not_block_others() {
        let matcher = Matcher::from_entries(&[entry("QEMU", &["virtualization"], &["(audio", "gstreamer"])]);
        assert_eq!(matcher.diagnostics().len(), 1);
        assert_eq!(matcher.diagnostics()[0].pattern, "(audio");
        assert_eq!(matcher.diagnostics()[0].entry_name, "QEMU");

        let set = matcher.match_document(&Document::new("c.txt", "GStreamer plugins, (audio work"));
        assert_eq!(set.records.len(), 1);
        assert!(set.records[0].matched_required.is_empty());
        assert_eq!(
            set.records[0].matched_optional.iter().collect::<Vec<_>>(),
            vec!["gstreamer"]
        );
    }

    #[test]
    fn test_required_total_counts_distinct_keywords() {
        let matcher = Matcher::from_entries(&[entry("Ceph", &["Linux", "linux"], &[])]);
        let set = matcher.match_document(&Document::new("d.txt", "linux"));
        assert!(set.records[0].is_complete());
    }

    #[test]
    fn test_match_documents_keeps_every_document() {
        let matcher = Matcher::from_entries(&[entry("GNOME", &["gtk"], &[])]);
        let docs = vec![Document::new("a.txt", "GTK apps"), Document::new("b.txt", "nothing")];
        let outcome = matcher.match_documents(&docs);
        assert_eq!(outcome.match_sets.len(), 2);
        assert_eq!(outcome.match_sets.tier_of("a.txt"), Some(Tier::Gold));
        assert_eq!(outcome.match_sets.tier_of("b.txt"), Some(Tier::Unmatched));
    }

    #[test]
    fn test_empty_catalog_and_documents() {
        let matcher = Matcher::from_entries(&[]);
        let outcome = matcher.match_documents(&[Document::new("a.txt", "Rust")]);
        assert_eq!(outcome.match_sets.count(Tier::Unmatched), 1);

        let outcome = Matcher::new(&Catalog::default()).match_documents(&[]);
        assert!(outcome.match_sets.is_empty());
    }

    #[test]
    fn test_sources_skip_policy() {
        let matcher = Matcher::from_entries(&[entry("GNOME", &["gtk"], &[])]);
        let sources = vec![
            Ok(Document::new("a.txt", "GTK")),
            Err(MatchError::DocumentRead {
                path: PathBuf::from("broken.txt"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            }),
            Ok(Document::new("a.txt", "duplicate")),
        ];

        let (documents, outcome) = matcher.match_sources(sources).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(outcome.skipped.len(), 2);
        assert_eq!(outcome.skipped[0].path, Some(PathBuf::from("broken.txt")));
        assert_eq!(outcome.match_sets.len(), 1);
    }

    #[test]
    fn test_sources_abort_policy() {
        let matcher = Matcher::from_entries(&[entry("GNOME", &["gtk"], &[])])
            .with_policy(ErrorPolicy::AbortOnFirstError);
        let sources = vec![
            Ok(Document::new("a.txt", "GTK")),
            Err(MatchError::DocumentRead {
                path: PathBuf::from("broken.txt"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            }),
        ];

        let result = matcher.match_sources(sources);
        assert!(matches!(result, Err(MatchError::DocumentRead { .. })));
    }
}
