//! Pages API endpoint.
//!
//! Resolves a topic and returns its document model as JSON. Unknown topics
//! are answered with `404` and the not-found placeholder model so clients
//! can still render navigation.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};
use tomes_site::DocumentModel;
use tomes_storage::DocumentStore;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/{language}/pages/ (default topic).
pub(crate) async fn get_default_page<S: DocumentStore + 'static>(
    Path(language): Path<String>,
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let slug = state.default_topic.clone();
    get_page_impl(&state, &language, &slug, &headers).await
}

/// Handle GET /api/{language}/pages/{slug}.
pub(crate) async fn get_page<S: DocumentStore + 'static>(
    Path((language, slug)): Path<(String, String)>,
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(&state, &language, &slug, &headers).await
}

/// Shared implementation for page resolution.
async fn get_page_impl<S: DocumentStore + 'static>(
    state: &AppState<S>,
    language: &str,
    slug: &str,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let view = state
        .resolver()
        .resolve(language, slug)
        .await
        .ok_or_else(|| ServerError::Superseded(format!("{language}/{slug}")))?;
    let model = view.document_model(&state.base_path);

    if !model.found {
        tracing::debug!(language = %language, slug = %slug, "Topic not found");
        return Ok((StatusCode::NOT_FOUND, Json(model)).into_response());
    }

    let etag = compute_etag(&state.version, &model)?;

    // Check If-None-Match header for conditional request
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Json(model),
    )
        .into_response())
}

/// Compute `ETag` from version and the serialized model.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, model: &DocumentModel) -> Result<String, serde_json::Error> {
    let body = serde_json::to_string(model)?;
    let hash = Md5::digest(format!("{version}:{body}").as_bytes());
    Ok(format!("\"{}\"", &hex::encode(hash)[..16]))
}
