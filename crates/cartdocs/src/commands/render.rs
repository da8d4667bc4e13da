//! `cartdocs render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use cartdocs_config::{CliSettings, Config};
use clap::Args;

use super::{library_from_config, renderer_from_config};
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Section key (default: the first section).
    section: Option<String>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Highlighting theme (overrides config).
    #[arg(long, env = "CARTDOCS_THEME")]
    theme: Option<String>,

    /// Disable caching.
    #[arg(long)]
    no_cache: bool,

    /// Path to configuration file (default: auto-discover cartdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self, version: &str) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            theme: self.theme,
            cache_enabled: self.no_cache.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let renderer = renderer_from_config(&config, version)?;
        let library = library_from_config(&config, renderer)?;

        let key = self
            .section
            .unwrap_or_else(|| library.default_section().key.clone());
        let html = library.content(&key);

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(html.as_bytes())?;
        if !html.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
        Ok(())
    }
}
