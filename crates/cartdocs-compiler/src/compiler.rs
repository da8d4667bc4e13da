//! Markdown directory to static HTML directory compiler.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cartdocs_renderer::MarkdownRenderer;

/// Error returned when compilation stops.
///
/// Compilation aborts on the first failing file; every variant carries the
/// path that caused it.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Source directory is missing or not a directory.
    #[error("Docs directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Clearing the output directory would delete the source documents.
    #[error("Refusing to clear {}: it contains the docs directory", .0.display())]
    OutputContainsSource(PathBuf),
    /// Output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    /// An existing output entry could not be removed.
    #[error("Failed to clear {}: {source}", path.display())]
    Clear { path: PathBuf, source: io::Error },
    /// A directory could not be listed.
    #[error("Failed to list {}: {source}", path.display())]
    List { path: PathBuf, source: io::Error },
    /// A source document could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    /// A compiled file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// One document written by a compile run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledDocument {
    /// Document id (source file stem, e.g. `INSTALLATION`).
    pub id: String,
    /// Markdown source file.
    pub source: PathBuf,
    /// Written HTML file.
    pub output: PathBuf,
}

/// Summary of a compile run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Documents compiled, in source filename order.
    pub compiled: Vec<CompiledDocument>,
    /// Entries removed from the output directory before compiling.
    pub cleared: usize,
}

impl CompileReport {
    /// Number of documents compiled.
    #[must_use]
    pub fn count(&self) -> usize {
        self.compiled.len()
    }
}

/// Renders a directory of markdown documents into static HTML files.
///
/// Always renders with caching disabled, so output reflects the sources at
/// the time of the run.
pub struct DocsCompiler {
    renderer: MarkdownRenderer,
}

impl DocsCompiler {
    /// Create a compiler. Caching is switched off on the given renderer.
    #[must_use]
    pub fn new(renderer: &MarkdownRenderer) -> Self {
        Self {
            renderer: renderer.without_cache(),
        }
    }

    /// Compile every `.md` file directly inside `source_dir` into
    /// `output_dir/<id>.html`.
    ///
    /// `output_dir` is created if missing. With `clear_first`, everything
    /// already in `output_dir` is removed first, subdirectories included.
    /// Other files and subdirectories of `source_dir` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::NotFound`] without touching the filesystem if
    /// `source_dir` is not a directory, and
    /// [`CompileError::OutputContainsSource`] if clearing `output_dir` would
    /// remove `source_dir` or its documents. Any other I/O failure aborts the
    /// run with the offending path.
    pub fn compile(
        &self,
        source_dir: &Path,
        output_dir: &Path,
        clear_first: bool,
    ) -> Result<CompileReport, CompileError> {
        if !source_dir.is_dir() {
            return Err(CompileError::NotFound(source_dir.to_path_buf()));
        }

        fs::create_dir_all(output_dir).map_err(|source| CompileError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut report = CompileReport::default();
        if clear_first {
            ensure_source_outside(source_dir, output_dir)?;
            report.cleared = clear_directory(output_dir)?;
            tracing::info!(
                cleared = report.cleared,
                "cleared compiled docs in {}",
                output_dir.display()
            );
        }

        for source in markdown_files(source_dir)? {
            let id = document_id(&source);
            let output = output_dir.join(format!("{id}.html"));
            tracing::info!("compiling {}", source.display());

            let bytes = fs::read(&source).map_err(|e| CompileError::Read {
                path: source.clone(),
                source: e,
            })?;
            let html = self.renderer.render(&String::from_utf8_lossy(&bytes));
            fs::write(&output, html).map_err(|e| CompileError::Write {
                path: output.clone(),
                source: e,
            })?;

            report.compiled.push(CompiledDocument { id, source, output });
        }

        tracing::info!(
            count = report.count(),
            "compiled docs to {}",
            output_dir.display()
        );
        Ok(report)
    }
}

/// Document id of a source file: its file stem.
fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Regular `.md` files directly inside `dir`, sorted by path.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, CompileError> {
    let list_error = |source: io::Error| CompileError::List {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Fail unless `source_dir` lies outside `output_dir`.
///
/// Both paths must exist.
fn ensure_source_outside(source_dir: &Path, output_dir: &Path) -> Result<(), CompileError> {
    let canonical = |path: &Path| {
        path.canonicalize().map_err(|source| CompileError::List {
            path: path.to_path_buf(),
            source,
        })
    };

    if canonical(source_dir)?.starts_with(canonical(output_dir)?) {
        return Err(CompileError::OutputContainsSource(output_dir.to_path_buf()));
    }
    Ok(())
}

/// Remove every entry in `dir`, returning how many were removed.
fn clear_directory(dir: &Path) -> Result<usize, CompileError> {
    let mut removed = 0;
    let entries = fs::read_dir(dir).map_err(|source| CompileError::List {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| CompileError::List {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let result = if entry.file_type().is_ok_and(|t| t.is_dir()) {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.map_err(|source| CompileError::Clear { path, source })?;
        removed += 1;
    }
    Ok(removed)
}
