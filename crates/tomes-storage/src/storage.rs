//! Document store trait and error types.
//!
//! Provides the core [`DocumentStore`] trait for enumerating and fetching raw
//! documents, along with [`StorageError`] for unified error handling across
//! backends.
//!
//! # Key Convention
//!
//! All key parameters are **storage keys** of the form `language/filename.md`:
//! - `"en/index.md"` - English landing document
//! - `"en/001_intro.md"` - ordered English document
//! - `"de/faq.md"` - unordered German document
//!
//! Implementations map keys to their internal storage format.

use std::future::Future;

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Document does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid key (traversal, wrong shape).
    InvalidKey,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Operation timed out.
    Timeout,
    /// Other/unknown error category.
    Other,
}

/// Retry guidance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    /// Don't retry (not found, invalid key).
    #[default]
    Permanent,
    /// Retry immediately (timeout, connection reset).
    Temporary,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    status: ErrorStatus,
    key: Option<String>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            status: ErrorStatus::Permanent,
            key: None,
            backend: None,
            source: None,
        }
    }

    /// Attach key context.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set retry status.
    #[must_use]
    pub fn with_status(mut self, status: ErrorStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Retry guidance.
    #[must_use]
    pub fn status(&self) -> ErrorStatus {
        self.status
    }

    /// Storage key the error relates to, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Backend identifier (e.g., "Fs", "Memory").
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Create a not found error for a key.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_key(key)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, key: Option<&str>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => StorageErrorKind::Timeout,
            _ => StorageErrorKind::Other,
        };
        let status = match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted => {
                ErrorStatus::Temporary
            }
            _ => ErrorStatus::Permanent,
        };
        let mut error = Self::new(kind).with_status(status).with_source(err);
        if let Some(key) = key {
            error = error.with_key(key);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (key: en/intro.md)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidKey => "Invalid key",
            StorageErrorKind::Unavailable => "Unavailable",
            StorageErrorKind::Timeout => "Timeout",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Document store abstraction.
///
/// Exposes the enumerable key set and keyed retrieval of raw document text.
/// The core never assumes a particular storage mechanism.
///
/// # Keys
///
/// All key parameters are storage keys (`language/filename.md`). Keys that do
/// not follow that shape are ignored by consumers.
pub trait DocumentStore: Send + Sync {
    /// Return every key known to the store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if enumeration fails (e.g., permission denied,
    /// backend unavailable).
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Fetch the raw text of a document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::NotFound`] if the key
    /// is absent, or another kind if the read fails.
    fn fetch(&self, key: &str) -> impl Future<Output = Result<String, StorageError>> + Send;

    /// Check whether a key exists.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn contains(&self, key: &str) -> bool {
        self.keys()
            .is_ok_and(|keys| keys.iter().any(|known| known == key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.status(), ErrorStatus::Permanent);
        assert!(err.key().is_none());
        assert!(err.backend().is_none());
    }

    #[test]
    fn test_storage_error_with_key() {
        let err = StorageError::new(StorageErrorKind::NotFound).with_key("en/intro.md");

        assert_eq!(err.key(), Some("en/intro.md"));
    }

    #[test]
    fn test_storage_error_with_status() {
        let err = StorageError::new(StorageErrorKind::Timeout).with_status(ErrorStatus::Temporary);

        assert_eq!(err.status(), ErrorStatus::Temporary);
    }

    #[test]
    fn test_storage_error_not_found() {
        let err = StorageError::not_found("en/missing.md");

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.key(), Some("en/missing.md"));
    }

    #[test]
    fn test_storage_error_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::io(io_err, Some("en/intro.md"));

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.status(), ErrorStatus::Permanent);
        assert_eq!(err.key(), Some("en/intro.md"));
    }

    #[test]
    fn test_storage_error_io_timeout() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = StorageError::io(io_err, None);

        assert_eq!(err.kind(), StorageErrorKind::Timeout);
        assert_eq!(err.status(), ErrorStatus::Temporary);
    }

    #[test]
    fn test_storage_error_display_simple() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_storage_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::new(StorageErrorKind::NotFound)
            .with_backend("Fs")
            .with_key("en/intro.md")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (key: en/intro.md)"
        );
    }

    #[test]
    fn test_storage_error_source_chain() {
        use std::error::Error as _;

        let io_err = std::io::Error::other("disk on fire");
        let err = StorageError::io(io_err, None);

        assert!(err.source().is_some());
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
