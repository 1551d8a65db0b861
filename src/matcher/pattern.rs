//! Keyword pattern compilation
//!
//! Each catalog keyword is a regex fragment matched case-insensitively as a
//! whole word. Lookaround is allowed, so `C(?!\+\+)` keeps C++ out of a C
//! keyword. A fragment that does not compile becomes a diagnostic and a
//! pattern that never matches; the rest of the entry is unaffected.

use fancy_regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Compilation failure for one keyword of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDiagnostic {
    pub entry_index: usize,
    pub entry_name: String,
    pub pattern: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct KeywordPattern {
    /// Lowercased pattern text, the key stored in match records
    pub keyword: String,
    regex: Option<Regex>,
}

impl KeywordPattern {
    pub fn compile(pattern: &str) -> Result<Self, String> {
        if pattern.trim().is_empty() {
            return Err("empty pattern".to_string());
        }

        let regex = RegexBuilder::new(&format!(r"\b(?:{})\b", pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Self {
            keyword: pattern.to_lowercase(),
            regex: Some(regex),
        })
    }

    /// Placeholder for a pattern that failed to compile.
    pub fn never(pattern: &str) -> Self {
        Self {
            keyword: pattern.to_lowercase(),
            regex: None,
        }
    }

    /// Runtime failures (backtrack limit) count as no match.
    pub fn is_match(&self, text: &str) -> bool {
        let Some(re) = &self.regex else {
            return false;
        };
        re.is_match(text).unwrap_or_else(|e| {
            warn!(keyword = %self.keyword, error = %e, "keyword pattern failed at match time");
            false
        })
    }
}
