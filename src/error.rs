use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Catalog not found: {0}")]
    CatalogNotFound(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Could not read document {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not scan folder: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Duplicate document identifier: {0}")]
    DuplicateDocument(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] resume_match_common::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
