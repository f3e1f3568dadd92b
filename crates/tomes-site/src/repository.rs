//! Document repository with a single-flight content cache.
//!
//! [`Repository`] enumerates the documents of a language from a
//! [`DocumentStore`] and loads their normalized content on demand. Loaded
//! documents are memoized for the lifetime of the repository.
//!
//! # Concurrency
//!
//! Each key owns one [`OnceCell`]. The map lock is held only to look up or
//! insert that cell, so concurrent loads of the same key await one shared
//! fetch while loads of different keys proceed independently. A failed load
//! leaves the cell empty and the next call fetches again.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;
use tomes_storage::{DocumentKey, DocumentStore, StorageError};
use tomes_text::{extract_title, normalize};

use crate::entry::DocumentEntry;

/// Normalized document held in the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedDocument {
    /// Document text after normalization.
    pub normalized_text: String,
    /// First heading of the normalized text, if any.
    pub extracted_title: Option<String>,
}

impl CachedDocument {
    /// Normalize raw text and extract its title.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let normalized_text = normalize(raw);
        let extracted_title = extract_title(&normalized_text);
        Self {
            normalized_text,
            extracted_title,
        }
    }
}

/// Error returned when a document cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The key is unknown or its content could not be fetched.
    #[error("Document not found: {key}")]
    NotFound {
        /// Key that failed to load.
        key: DocumentKey,
        /// Underlying storage failure.
        #[source]
        source: StorageError,
    },
}

type CacheCell = Arc<OnceCell<Arc<CachedDocument>>>;

/// Document repository over a store.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use tomes_site::Repository;
/// use tomes_storage::FsStorage;
///
/// let repository = Repository::new(FsStorage::new(PathBuf::from("docs")));
/// for entry in repository.list_documents("en")? {
///     let document = repository.load(entry.key()).await?;
///     println!("{}: {:?}", entry.display_slug(), document.extracted_title);
/// }
/// ```
#[derive(Debug)]
pub struct Repository<S> {
    storage: S,
    cache: Mutex<HashMap<DocumentKey, CacheCell>>,
}

impl<S: DocumentStore> Repository<S> {
    /// Create a repository with an empty cache.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Underlying document store.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// List the documents of a language in navigation order.
    ///
    /// Keys outside the language namespace or not shaped like
    /// `language/filename.md` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot enumerate its keys.
    pub fn list_documents(&self, language: &str) -> Result<Vec<DocumentEntry>, StorageError> {
        let mut entries: Vec<DocumentEntry> = self
            .storage
            .keys()?
            .iter()
            .filter_map(|key| DocumentKey::parse(key))
            .filter(|key| key.language() == language)
            .map(DocumentEntry::from_key)
            .collect();
        entries.sort_by(DocumentEntry::cmp_for_listing);
        Ok(entries)
    }

    /// List the language namespaces present in the store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot enumerate its keys.
    pub fn languages(&self) -> Result<Vec<String>, StorageError> {
        let languages: BTreeSet<String> = self
            .storage
            .keys()?
            .iter()
            .filter_map(|key| DocumentKey::parse(key))
            .map(|key| key.language().to_owned())
            .collect();
        Ok(languages.into_iter().collect())
    }

    /// Check whether the store holds a document for `key`.
    #[must_use]
    pub fn contains(&self, key: &DocumentKey) -> bool {
        self.storage.contains(&key.to_string())
    }

    /// Load the normalized content of a document.
    ///
    /// The first successful load is memoized; later calls return the same
    /// [`CachedDocument`] without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if the key is unknown or the fetch
    /// fails. Failures are not cached.
    pub async fn load(&self, key: &DocumentKey) -> Result<Arc<CachedDocument>, LoadError> {
        let cell = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(cache.entry(key.clone()).or_default())
        };

        let document = cell
            .get_or_try_init(|| async {
                let raw = self
                    .storage
                    .fetch(&key.to_string())
                    .await
                    .map_err(|source| LoadError::NotFound {
                        key: key.clone(),
                        source,
                    })?;
                let document = CachedDocument::from_raw(&raw);
                tracing::debug!(key = %key, title = ?document.extracted_title, "Cached document");
                Ok(Arc::new(document))
            })
            .await?;

        Ok(Arc::clone(document))
    }

    /// Number of documents loaded successfully so far.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }
}
