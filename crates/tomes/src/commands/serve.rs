//! `tomes serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use tomes_config::{CliSettings, Config};
use tomes_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover tomes.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Default language for the root redirect (overrides config).
    #[arg(short, long)]
    language: Option<String>,

    /// Enable verbose output (request and cache logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
            default_language: self.language,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let docs = &config.docs_resolved;
        if !docs.source_dir.is_dir() {
            output.warning(&format!(
                "Source directory does not exist: {}",
                docs.source_dir.display()
            ));
        }

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Source directory: {}", docs.source_dir.display()));
        output.info(&format!(
            "Documents: {}/{}/{}",
            docs.base_path.trim_end_matches('/'),
            docs.default_language,
            docs.default_topic
        ));

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        output.success("Server stopped");
        Ok(())
    }
}
