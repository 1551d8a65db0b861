//! Resume Match Common Library
//!
//! Catalog, predicate and match-result types shared by the matcher,
//! the recommender and anything that consumes their output.

pub mod catalog;
pub mod error;
pub mod predicate;
pub mod types;

pub use catalog::{Catalog, PRESET_NAMES};
pub use error::{Error, Result};
pub use predicate::{Combinator, KeywordScope, Predicate, PredicateKeyword};
pub use types::{
    CatalogEntry, ClassificationMode, DocumentMatchSet, KeywordHitCount, MatchRecord, MatchSets, Tier,
    TierFilter,
};
