//! CLI error types.

use cartdocs_compiler::CompileError;
use cartdocs_config::ConfigError;
use cartdocs_library::LibraryError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Compile(#[from] CompileError),

    #[error("{0}")]
    Library(#[from] LibraryError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),
}
