//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use tomes_site::{Repository, TopicResolver};
use tomes_storage::DocumentStore;

/// Application state shared across all handlers.
pub(crate) struct AppState<S> {
    /// Document repository; its cache is shared by every request.
    pub(crate) repository: Arc<Repository<S>>,
    /// URL prefix for document paths.
    pub(crate) base_path: String,
    /// Language used by the root redirect.
    pub(crate) default_language: String,
    /// Topic served when none is requested.
    pub(crate) default_topic: String,
    /// Application version for `ETag` computation.
    pub(crate) version: String,
}

impl<S: DocumentStore + 'static> AppState<S> {
    /// Create a resolver for one request.
    pub(crate) fn resolver(&self) -> TopicResolver<S> {
        TopicResolver::new(Arc::clone(&self.repository))
    }
}
