//! HTTP server for the Tomes topic engine.
//!
//! This crate provides an axum server exposing resolved topics as JSON:
//! - `GET /api/languages`: language namespaces
//! - `GET /api/{language}/topics`: ordered topics with titles
//! - `GET /api/{language}/pages/{slug}`: document model of a topic
//! - `GET {base_path}/{language}/{slug}`: same model at the document path
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use tomes_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         source_dir: PathBuf::from("docs"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum router (tomes-server)
//!                      │
//!                      └─► TopicResolver (one per request)
//!                              │
//!                              └─► Repository (shared cache) ──► FsStorage
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;
use tomes_site::Repository;
use tomes_storage::FsStorage;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Documentation source directory.
    pub source_dir: PathBuf,
    /// URL prefix for document paths.
    pub base_path: String,
    /// Language used by the root redirect.
    pub default_language: String,
    /// Topic served when none is requested.
    pub default_topic: String,
    /// Application version (for `ETag` computation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            source_dir: PathBuf::from("docs"),
            base_path: "/docs".to_owned(),
            default_language: "en".to_owned(),
            default_topic: "index".to_owned(),
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let repository = Arc::new(Repository::new(FsStorage::new(config.source_dir.clone())));

    let state = Arc::new(AppState {
        repository,
        base_path: config.base_path.clone(),
        default_language: config.default_language.clone(),
        default_topic: config.default_topic.clone(),
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, source_dir = %config.source_dir.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Tomes config.
#[must_use]
pub fn server_config_from_config(config: &tomes_config::Config, version: String) -> ServerConfig {
    let docs = &config.docs_resolved;
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: docs.source_dir.clone(),
        base_path: docs.base_path.clone(),
        default_language: docs.default_language.clone(),
        default_topic: docs.default_topic.clone(),
        version,
    }
}
