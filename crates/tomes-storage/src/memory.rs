//! In-memory document store.
//!
//! Provides [`MemoryStorage`] for unit testing and embedding without
//! filesystem access.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::future::Future;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use crate::storage::{DocumentStore, ErrorStatus, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Memory";

/// In-memory document store.
///
/// Stores raw document text keyed by storage key. Use the builder methods to
/// configure the store with test data, simulated latency, or failing reads.
///
/// # Example
///
/// ```ignore
/// use tomes_storage::{DocumentStore, MemoryStorage};
///
/// let storage = MemoryStorage::new()
///     .with_document("en/index.md", "# Welcome")
///     .with_document("en/001_intro.md", "# Introduction");
///
/// let keys = storage.keys()?;
/// let raw = storage.fetch("en/index.md").await?;
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: RwLock<BTreeMap<String, String>>,
    delays: RwLock<HashMap<String, Duration>>,
    failing: RwLock<HashSet<String>>,
    fetches: RwLock<HashMap<String, usize>>,
}

impl MemoryStorage {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    #[must_use]
    pub fn with_document(self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(key, content);
        self
    }

    /// Delay every fetch of `key` by `delay`.
    #[must_use]
    pub fn with_delay(self, key: impl Into<String>, delay: Duration) -> Self {
        self.delays
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), delay);
        self
    }

    /// List `key` in enumeration but fail every fetch of it.
    #[must_use]
    pub fn with_failing(self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.contents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_default();
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key);
        self
    }

    /// Insert or replace a document.
    pub fn insert(&self, key: impl Into<String>, content: impl Into<String>) {
        self.contents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), content.into());
    }

    /// Number of times `fetch` was called for `key`.
    #[must_use]
    pub fn fetch_count(&self, key: &str) -> usize {
        self.fetches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
            .unwrap_or_default()
    }

    /// Resolve the outcome of a fetch at call time.
    fn lookup(&self, key: &str) -> Result<String, StorageError> {
        if self
            .failing
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
        {
            return Err(StorageError::new(StorageErrorKind::Unavailable)
                .with_status(ErrorStatus::Temporary)
                .with_key(key)
                .with_backend(BACKEND));
        }
        self.contents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key).with_backend(BACKEND))
    }
}

impl DocumentStore for MemoryStorage {
    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .contents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect())
    }

    fn fetch(&self, key: &str) -> impl Future<Output = Result<String, StorageError>> + Send {
        *self
            .fetches
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_owned())
            .or_default() += 1;

        let delay = self
            .delays
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied();
        let result = self.lookup(key);

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.contents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}
