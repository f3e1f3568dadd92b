//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tomes_storage::DocumentStore;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
///
/// Document models are served both under `/api` and under the document
/// paths themselves (`{base_path}/{language}[/{slug}]`).
pub(crate) fn create_router<S: DocumentStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let base = state.base_path.trim_end_matches('/').to_owned();

    let api_routes = Router::new()
        .route("/api/languages", get(handlers::languages::get_languages::<S>))
        .route("/api/{language}/topics", get(handlers::topics::get_topics::<S>))
        .route(
            "/api/{language}/pages/",
            get(handlers::pages::get_default_page::<S>),
        )
        .route(
            "/api/{language}/pages/{slug}",
            get(handlers::pages::get_page::<S>),
        );

    let document_routes = Router::new()
        .route(
            &format!("{base}/{{language}}"),
            get(handlers::pages::get_default_page::<S>),
        )
        .route(
            &format!("{base}/{{language}}/{{slug}}"),
            get(handlers::pages::get_page::<S>),
        );

    Router::new()
        .route("/", get(handlers::root_redirect::<S>))
        .merge(api_routes)
        .merge(document_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
