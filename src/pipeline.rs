//! One complete run: catalog → documents → matches → hit counts.

use crate::aggregator;
use crate::config::Config;
use crate::error::{MatchError, Result};
use crate::matcher::{ErrorPolicy, MatchOutcome, Matcher};
use crate::scanner::{self, Document, ScanOptions};
use resume_match_common::{Catalog, ClassificationMode, KeywordHitCount, TierFilter};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Catalog JSON file; overrides `preset`
    pub catalog: Option<PathBuf>,
    pub preset: String,
    pub tier_filter: TierFilter,
    pub mode: ClassificationMode,
    pub policy: ErrorPolicy,
    pub scan: ScanOptions,
}

impl RunOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            catalog: None,
            preset: config.default_preset.clone(),
            tier_filter: config.tier_filter,
            mode: config.mode,
            policy: config.error_policy,
            scan: ScanOptions {
                extension: config.extension.clone(),
                recursive: config.recursive,
                show_progress: false,
            },
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

pub struct MatchRun {
    pub catalog: Catalog,
    pub documents: Vec<Document>,
    pub outcome: MatchOutcome,
    pub hits: KeywordHitCount,
}

/// Loads the catalog from a file when given, otherwise from a preset.
pub fn load_catalog(path: Option<&Path>, preset: &str) -> Result<Catalog> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(MatchError::CatalogNotFound(path.display().to_string()));
            }
            Catalog::from_file(path).map_err(|e| match e {
                resume_match_common::Error::Io(io) => MatchError::Io(io),
                other => MatchError::InvalidCatalog(format!("{}: {}", path.display(), other)),
            })
        }
        None => Ok(Catalog::from_preset(preset)?),
    }
}

pub fn run(folder: &Path, options: &RunOptions) -> Result<MatchRun> {
    let catalog = load_catalog(options.catalog.as_deref(), &options.preset)?;
    info!(entries = catalog.len(), predicates = catalog.predicates.len(), "catalog loaded");

    let sources = scanner::read_documents(folder, &options.scan)?;

    let matcher = Matcher::new(&catalog)
        .with_mode(options.mode)
        .with_policy(options.policy);
    let (documents, outcome) = matcher.match_sources(sources)?;

    let hits = aggregator::aggregate(&outcome.match_sets, options.tier_filter);

    Ok(MatchRun {
        catalog,
        documents,
        outcome,
        hits,
    })
}
