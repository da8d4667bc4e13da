//! `cartdocs sections` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use cartdocs_cache::NullCacheBucket;
use cartdocs_config::Config;
use cartdocs_renderer::{MarkdownRenderer, SyntectHighlighter};
use clap::Args;

use super::library_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sections command.
#[derive(Args)]
pub(crate) struct SectionsArgs {
    /// Path to configuration file (default: auto-discover cartdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl SectionsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        // Listing never renders, so skip opening the configured cache.
        let renderer = MarkdownRenderer::new(
            Arc::new(NullCacheBucket),
            Arc::new(SyntectHighlighter::new()),
        );
        let library = library_from_config(&config, renderer)?;

        let width = library
            .sections()
            .iter()
            .map(|section| section.key.len())
            .max()
            .unwrap_or(0);

        for section in library.sections() {
            let marker = if library.has_compiled(section) { "*" } else { " " };
            output.info(&format!(
                "{marker} {:width$}  {}",
                section.key, section.title
            ));
        }
        output.muted(&format!(
            "* compiled in {}",
            library.compiled_dir().display()
        ));
        Ok(())
    }
}
