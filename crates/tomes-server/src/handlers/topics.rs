//! Topics API endpoint.
//!
//! Returns the ordered topic list of a language with titles taken from the
//! documents themselves.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use tomes_site::TopicLink;
use tomes_storage::DocumentStore;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/{language}/topics.
#[derive(Debug, Serialize)]
pub(crate) struct TopicsResponse {
    /// Requested language.
    pub(crate) language: String,
    /// Topics in navigation order.
    pub(crate) topics: Vec<TopicLink>,
}

/// Handle GET /api/{language}/topics.
pub(crate) async fn get_topics<S: DocumentStore + 'static>(
    Path(language): Path<String>,
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<TopicsResponse>, ServerError> {
    if state.repository.list_documents(&language)?.is_empty() {
        return Err(ServerError::LanguageNotFound(language));
    }

    let view = state
        .resolver()
        .resolve(&language, &state.default_topic)
        .await
        .ok_or_else(|| ServerError::Superseded(language.clone()))?;
    let topics = view.document_model(&state.base_path).topics;

    Ok(Json(TopicsResponse { language, topics }))
}
