//! Resume matching
//!
//! Scans a folder of resume text files, matches each against a catalog of
//! keyword-labelled opportunities, tallies keyword hits and builds
//! per-organization shortlists.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod recommender;
pub mod scanner;
pub mod summary;

pub use resume_match_common as common;
