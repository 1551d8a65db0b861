mod contacts;

pub use contacts::{extract_contacts, find_by_contact};

use crate::error::{MatchError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One resume as read from disk.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// File name, unique within a run
    pub identifier: String,
    #[serde(skip)]
    pub text: String,
    pub contacts: BTreeSet<String>,
    pub path: Option<PathBuf>,
}

impl Document {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let contacts = extract_contacts(&text);
        Self {
            identifier: identifier.into(),
            text,
            contacts,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Name of the PDF the text was converted from (same stem).
    pub fn companion_pdf(&self) -> String {
        let stem = Path::new(&self.identifier)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.identifier.clone());
        format!("{}.pdf", stem)
    }
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extension: String,
    /// Descend into subfolders
    pub recursive: bool,
    pub show_progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: "txt".into(),
            recursive: false,
            show_progress: false,
        }
    }
}

/// Result of walking a resume folder.
#[derive(Debug, Default)]
pub struct FolderScan {
    /// Resume files, sorted by file name
    pub files: Vec<PathBuf>,
    /// Entries the walk could not read (unreadable folders, broken links)
    pub errors: Vec<MatchError>,
}

/// Lists resume files under `folder`.
///
/// Symbolic links are followed. Entries that cannot be read are collected
/// in `errors` instead of failing the scan.
pub fn scan_folder(folder: &Path, options: &ScanOptions) -> Result<FolderScan> {
    if !folder.is_dir() {
        return Err(MatchError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let mut scan = FolderScan::default();
    for entry in WalkDir::new(folder).max_depth(max_depth).follow_links(true) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), &options.extension) {
                    scan.files.push(entry.into_path());
                }
            }
            Err(err) => {
                warn!(error = %err, "folder entry unreadable");
                scan.errors.push(MatchError::Walk(err));
            }
        }
    }

    scan.files
        .sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));

    Ok(scan)
}

/// Reads one resume file. The identifier is the file name.
pub fn load_document(path: &Path) -> Result<Document> {
    let bytes = std::fs::read(path).map_err(|source| MatchError::DocumentRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let identifier = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Document::new(identifier, text).with_path(path))
}

/// Reads every resume under `folder`.
///
/// A missing folder fails the whole call. Walk failures come first, then
/// one item per file; any of them may be an `Err` for the caller's policy
/// to skip or abort on.
pub fn read_documents(folder: &Path, options: &ScanOptions) -> Result<Vec<Result<Document>>> {
    let FolderScan { files: paths, errors } = scan_folder(folder, options)?;
    debug!(
        folder = %folder.display(),
        files = paths.len(),
        unreadable = errors.len(),
        "scanned resume folder"
    );

    let pb = if options.show_progress {
        let pb = ProgressBar::new(paths.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} resumes {msg}") {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let loaded = paths.iter().map(|path| {
        // Relative path keeps identifiers unique across subfolders
        let doc = load_document(path).map(|mut doc| {
            if let Ok(relative) = path.strip_prefix(folder) {
                doc.identifier = relative.to_string_lossy().replace('\\', "/");
            }
            doc
        });
        pb.inc(1);
        doc
    });
    let documents = errors.into_iter().map(Err).chain(loaded).collect();

    pb.finish_and_clear();
    Ok(documents)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension.trim_start_matches('.')))
        .unwrap_or(false)
}
