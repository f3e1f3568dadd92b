//! Filesystem document store.
//!
//! Provides [`FsStorage`] for reading documents laid out as
//! `<source_dir>/<language>/<file>.md`.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::key::DocumentKey;
use crate::storage::{DocumentStore, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem document store.
///
/// Each direct subdirectory of the source directory is a language namespace;
/// each `.md` file directly inside it is a document. Hidden and
/// underscore-prefixed entries are skipped.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use tomes_storage::{DocumentStore, FsStorage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let keys = storage.keys()?;
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem store rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Root directory this store reads from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Validate that a key is well-formed and cannot escape the source directory.
    ///
    /// Rejects keys containing `..` or backslashes, keys that are not
    /// `language/filename.md`, and keys the listing would hide.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        let visible = DocumentKey::parse(key).is_some_and(|parsed| {
            Self::is_visible(parsed.language()) && Self::is_visible(parsed.file_name())
        });
        if key.contains("..") || key.contains('\\') || !visible {
            return Err(StorageError::new(StorageErrorKind::InvalidKey)
                .with_key(key)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Whether a directory entry name is published.
    ///
    /// Hidden and underscore-prefixed names are never listed or served.
    fn is_visible(name: &str) -> bool {
        !name.starts_with('.') && !name.starts_with('_')
    }

    /// List visible entries of a directory, sorted by name.
    fn visible_entries(dir: &Path) -> Result<Vec<(String, bool)>, StorageError> {
        let entries = fs::read_dir(dir).map_err(|e| {
            StorageError::io(e, Some(dir.display().to_string().as_str())).with_backend(BACKEND)
        })?;

        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_owned();
                if !Self::is_visible(&name) {
                    return None;
                }
                let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
                Some((name, is_dir))
            })
            .collect();
        entries.sort();
        Ok(entries)
    }
}

impl DocumentStore for FsStorage {
    fn keys(&self) -> Result<Vec<String>, StorageError> {
        if !self.source_dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for (language, is_dir) in Self::visible_entries(&self.source_dir)? {
            if !is_dir {
                continue;
            }
            let language_dir = self.source_dir.join(&language);
            let files = match Self::visible_entries(&language_dir) {
                Ok(files) => files,
                Err(e) => {
                    tracing::warn!(language = %language, error = %e, "Skipping unreadable language directory");
                    continue;
                }
            };
            keys.extend(
                files
                    .into_iter()
                    .filter(|(_, is_dir)| !is_dir)
                    .map(|(name, _)| format!("{language}/{name}"))
                    .filter(|key| DocumentKey::parse(key).is_some()),
            );
        }

        tracing::debug!(count = keys.len(), source_dir = %self.source_dir.display(), "Enumerated documents");
        Ok(keys)
    }

    fn fetch(&self, key: &str) -> impl Future<Output = Result<String, StorageError>> + Send {
        let key = key.to_owned();
        let validated = Self::validate_key(&key).map(|()| self.source_dir.join(&key));

        async move {
            let full_path = validated?;
            tokio::fs::read_to_string(&full_path)
                .await
                .map_err(|e| StorageError::io(e, Some(&key)).with_backend(BACKEND))
        }
    }

    fn contains(&self, key: &str) -> bool {
        Self::validate_key(key).is_ok() && self.source_dir.join(key).is_file()
    }
}
