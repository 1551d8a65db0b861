//! Declarative shortlist predicates
//!
//! One predicate per organization: a keyword list plus a combinator.
//! Keywords are compared against the lowercased patterns stored in
//! match records, so they are written in lowercase pattern form.

use crate::types::MatchRecord;
use serde::{Deserialize, Serialize};

/// How the keyword list narrows documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    /// Any listed keyword admits the document
    #[default]
    Union,
    /// Every listed keyword must be present
    Intersection,
}

/// Which side of a record a keyword is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordScope {
    Required,
    Optional,
    #[default]
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateKeyword {
    pub keyword: String,
    #[serde(default)]
    pub scope: KeywordScope,
}

impl PredicateKeyword {
    pub fn required(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            scope: KeywordScope::Required,
        }
    }

    pub fn optional(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            scope: KeywordScope::Optional,
        }
    }

    pub fn any(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            scope: KeywordScope::Any,
        }
    }

    /// Whether the record carries this keyword on the configured side.
    pub fn hit_by(&self, record: &MatchRecord) -> bool {
        let keyword = self.keyword.to_lowercase();
        match self.scope {
            KeywordScope::Required => record.matched_required.contains(&keyword),
            KeywordScope::Optional => record.matched_optional.contains(&keyword),
            KeywordScope::Any => {
                record.matched_required.contains(&keyword) || record.matched_optional.contains(&keyword)
            }
        }
    }
}

/// Shortlist rule for one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub organization: String,
    #[serde(default)]
    pub combinator: Combinator,
    pub keywords: Vec<PredicateKeyword>,
}

impl Predicate {
    pub fn union(organization: impl Into<String>, keywords: Vec<PredicateKeyword>) -> Self {
        Self {
            organization: organization.into(),
            combinator: Combinator::Union,
            keywords,
        }
    }

    pub fn intersection(organization: impl Into<String>, keywords: Vec<PredicateKeyword>) -> Self {
        Self {
            organization: organization.into(),
            combinator: Combinator::Intersection,
            keywords,
        }
    }
}
