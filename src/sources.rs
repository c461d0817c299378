//! Source file discovery.
//!
//! Test rigs write one `.dat` file per specimen, named
//! `<campaign>_<id>_<anything>.dat`. The second `_`-separated token is the
//! file ID used to pick a source.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::dataset::IngestionError;

/// Extension of data files picked up by [`SourceIndex::scan_dir`]
pub const DATA_FILE_EXTENSION: &str = "dat";

/// File ID of a path, if its file name has more than two `_`-separated tokens
pub fn source_id(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let mut parts = file_name.split('_');
    let _campaign = parts.next()?;
    let id = parts.next()?;
    parts.next()?;
    Some(id.to_string())
}

/// Data files keyed by file ID, sorted by ID
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceIndex {
    sources: BTreeMap<String, PathBuf>,
}

impl SourceIndex {
    /// Index a list of paths. Paths without an ID are ignored; a repeated ID keeps the last path.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut sources = BTreeMap::new();
        for path in paths {
            let path = path.into();
            let Some(id) = source_id(&path) else {
                debug!("No file ID in {}, ignoring", path.display());
                continue;
            };
            if let Some(previous) = sources.insert(id.clone(), path) {
                warn!("File ID {} appears more than once; dropping {}", id, previous.display());
            }
        }
        Self { sources }
    }

    /// Index every `.dat` file directly inside a directory
    pub fn scan_dir<P: AsRef<Path>>(dir: P) -> Result<Self, IngestionError> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            let is_data = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == DATA_FILE_EXTENSION);
            if is_data && path.is_file() {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();
        Ok(Self::from_paths(paths))
    }

    /// Path of a file ID
    pub fn get(&self, id: &str) -> Option<&Path> {
        self.sources.get(id).map(PathBuf::as_path)
    }

    /// File IDs in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    /// `(id, path)` pairs in ID order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.sources.iter().map(|(id, p)| (id.as_str(), p.as_path()))
    }

    /// Number of indexed files
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no file was indexed
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
