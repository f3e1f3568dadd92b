//! `tomes topics` command implementation.

use clap::Args;

use crate::commands::{SourceArgs, fs_resolver};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the topics command.
#[derive(Args)]
pub(crate) struct TopicsArgs {
    /// Language namespace (e.g., "en").
    language: String,

    /// Print topics as JSON instead of a table.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    source: SourceArgs,
}

impl TopicsArgs {
    /// Execute the topics command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the language has no
    /// documents, or output cannot be written.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config()?;
        let resolver = fs_resolver(&config);

        let view = resolver
            .resolve(&self.language, &config.docs_resolved.default_topic)
            .await
            .ok_or_else(|| CliError::Validation("Topic listing was superseded".to_owned()))?;
        if view.topics.is_empty() {
            let languages = resolver.repository().languages()?;
            return Err(CliError::Validation(format!(
                "No documents for language '{}' (available: {})",
                self.language,
                languages.join(", ")
            )));
        }

        let topics = view.document_model(&config.docs_resolved.base_path).topics;
        if self.json {
            output.data(&serde_json::to_string_pretty(&topics)?)?;
            return Ok(());
        }

        let width = topics.iter().map(|t| t.slug.len()).max().unwrap_or_default();
        for topic in &topics {
            output.data(&format!(
                "{:<width$}  {}  {}",
                topic.slug,
                topic.title,
                output.dim(&topic.path)
            ))?;
        }
        Ok(())
    }
}
