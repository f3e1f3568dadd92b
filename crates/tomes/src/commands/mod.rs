//! CLI command implementations.

pub(crate) mod resolve;
pub(crate) mod serve;
pub(crate) mod topics;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tomes_config::{CliSettings, Config};
use tomes_site::{Repository, TopicResolver};
use tomes_storage::FsStorage;

pub(crate) use resolve::ResolveArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use topics::TopicsArgs;

use crate::error::CliError;

/// Options shared by commands that read documents directly.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover tomes.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl SourceArgs {
    /// Load the configuration with the source directory override applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            ..Default::default()
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build a resolver over the configured source directory.
pub(crate) fn fs_resolver(config: &Config) -> TopicResolver<FsStorage> {
    let storage = FsStorage::new(config.docs_resolved.source_dir.clone());
    TopicResolver::new(Arc::new(Repository::new(storage)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_fs_resolver_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("content").join("en");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(docs.join("index.md"), "# Home\r\n").unwrap();
        std::fs::write(docs.join("002-usage.md"), "# Usage").unwrap();
        let config_path = temp_dir.path().join("tomes.toml");
        std::fs::write(&config_path, "[docs]\nsource_dir = \"content\"\n").unwrap();

        let args = SourceArgs {
            config: Some(config_path),
            source_dir: None,
        };
        let config = args.load_config().unwrap();
        let view = fs_resolver(&config).resolve("en", "usage").await.unwrap();

        assert_eq!(view.content, "# Usage");
        let titles: Vec<&str> = view.topics.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Home", "Usage"]);
    }
}
