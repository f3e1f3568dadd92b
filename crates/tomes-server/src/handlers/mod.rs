//! HTTP request handlers.

pub(crate) mod languages;
pub(crate) mod pages;
pub(crate) mod topics;

use std::sync::Arc;

use axum::extract::State;
use axum::response::Redirect;
use tomes_site::document_path;
use tomes_storage::DocumentStore;

use crate::state::AppState;

/// Handle GET / by redirecting to the default document.
pub(crate) async fn root_redirect<S: DocumentStore + 'static>(State(state): State<Arc<AppState<S>>>) -> Redirect {
    let target = document_path(
        &state.base_path,
        &state.default_language,
        &state.default_topic,
    );
    Redirect::temporary(&target)
}
