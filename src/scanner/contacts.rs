//! Contact extraction
//!
//! Pulls email-like strings out of resume text and finds the documents
//! that mention a given address.

use super::Document;
use regex::Regex;
use std::collections::BTreeSet;

/// Email-like substrings of `text`, lowercased.
pub fn extract_contacts(text: &str) -> BTreeSet<String> {
    lazy_static::lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"[\w.+-]+@[\w.-]+").unwrap();
    }

    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', '-']).to_lowercase())
        .filter(|email| email.split('@').all(|part| !part.is_empty()))
        .collect()
}

/// Documents whose contacts include `email` (case-insensitive).
pub fn find_by_contact<'a>(documents: &'a [Document], email: &str) -> Vec<&'a Document> {
    let email = email.trim().to_lowercase();
    documents
        .iter()
        .filter(|doc| doc.contacts.contains(&email))
        .collect()
}
