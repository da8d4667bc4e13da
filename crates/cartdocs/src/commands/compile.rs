//! `cartdocs compile` command implementation.

use std::path::PathBuf;

use cartdocs_compiler::DocsCompiler;
use cartdocs_config::{CliSettings, Config};
use clap::Args;

use super::renderer_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the compile command.
#[derive(Args)]
pub(crate) struct CompileArgs {
    /// Remove previously compiled files before compiling.
    #[arg(long)]
    clear: bool,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for compiled HTML (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Highlighting theme (overrides config).
    #[arg(long, env = "CARTDOCS_THEME")]
    theme: Option<String>,

    /// Path to configuration file (default: auto-discover cartdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (per-file progress logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CompileArgs {
    pub(crate) fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            compiled_dir: self.output_dir,
            theme: self.theme,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source_dir = &config.docs_resolved.source_dir;
        let output_dir = &config.docs_resolved.compiled_dir;

        output.info(&format!("Source: {}", source_dir.display()));
        output.info(&format!("Output: {}", output_dir.display()));

        let renderer = renderer_from_config(&config, version)?;
        let compiler = DocsCompiler::new(&renderer);

        if self.clear {
            output.muted("Clearing previously compiled files");
        }
        let report = compiler.compile(source_dir, output_dir, self.clear)?;

        if self.clear {
            output.muted(&format!("Removed {} file(s)", report.cleared));
        }
        for document in &report.compiled {
            output.info(&format!("  Compiled: {}", document.id));
        }

        if report.count() == 0 {
            output.highlight("No markdown documents found");
        } else {
            output.success(&format!(
                "Compiled {} document(s) to {}",
                report.count(),
                output_dir.display()
            ));
        }
        Ok(())
    }
}
