//! `tomes resolve` command implementation.

use clap::Args;

use crate::commands::{SourceArgs, fs_resolver};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Language namespace (e.g., "en").
    language: String,

    /// Topic slug (default: the configured default topic).
    topic: Option<String>,

    #[command(flatten)]
    source: SourceArgs,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// Prints the document model as pretty JSON on stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or output cannot be written.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config()?;
        let topic = self
            .topic
            .unwrap_or_else(|| config.docs_resolved.default_topic.clone());

        let view = fs_resolver(&config)
            .resolve(&self.language, &topic)
            .await
            .ok_or_else(|| CliError::Validation(format!("Resolution of {topic} was superseded")))?;
        let model = view.document_model(&config.docs_resolved.base_path);

        if !model.found {
            output.warning(&format!("Topic not found: {}/{topic}", self.language));
        }
        output.data(&serde_json::to_string_pretty(&model)?)?;
        Ok(())
    }
}
