//! Application state management.

use anyhow::Context;
use brevsok_core::{Config, Corpus};
use std::path::PathBuf;
use tracing::info;

/// Shared application state.
pub struct App {
    /// Configuration
    pub config: Config,

    /// The loaded letter corpus
    pub corpus: Corpus,
}

impl App {
    /// Create a new application instance.
    ///
    /// The corpus path comes from the command line when given, otherwise
    /// from configuration.
    pub fn new(config: Config, corpus_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let corpus_path = corpus_override
            .or_else(|| config.general.corpus_path.clone())
            .context(
                "no corpus configured; pass --corpus or set general.corpus_path in brevsok.toml",
            )?;

        let corpus = Corpus::load(&corpus_path)
            .with_context(|| format!("failed to load corpus from {}", corpus_path.display()))?;

        info!(
            path = %corpus_path.display(),
            letters = corpus.len(),
            "Application initialized"
        );

        Ok(App { config, corpus })
    }
}
