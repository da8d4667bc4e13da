//! cartdocs CLI - Documentation compiler and renderer.
//!
//! Provides commands for:
//! - `compile`: Compile markdown docs to static HTML
//! - `render`: Render one section to stdout
//! - `sections`: List documentation sections

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CompileArgs, RenderArgs, SectionsArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// cartdocs - Documentation compiler and renderer.
#[derive(Parser)]
#[command(name = "cartdocs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile markdown documentation to static HTML.
    Compile(CompileArgs),
    /// Render a documentation section to stdout.
    Render(RenderArgs),
    /// List documentation sections.
    Sections(SectionsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Compile(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Compile(args) => args.execute(VERSION),
        Commands::Render(args) => args.execute(VERSION),
        Commands::Sections(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
