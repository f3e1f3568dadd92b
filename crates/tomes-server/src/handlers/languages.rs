//! Languages API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tomes_storage::DocumentStore;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/languages.
#[derive(Debug, Serialize)]
pub(crate) struct LanguagesResponse {
    /// Language namespaces with at least one document.
    pub(crate) languages: Vec<String>,
}

/// Handle GET /api/languages.
pub(crate) async fn get_languages<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<LanguagesResponse>, ServerError> {
    let languages = state.repository.languages()?;
    Ok(Json(LanguagesResponse { languages }))
}
