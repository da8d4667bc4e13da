//! Batch compilation of markdown documentation to static HTML.
//!
//! [`DocsCompiler`] renders every `.md` file directly inside a source
//! directory and writes `<id>.html` into an output directory, where `<id>` is
//! the file stem. Compiled files are a persisted cache of what the renderer
//! produces; they are only refreshed by compiling again.

mod compiler;

pub use compiler::{CompileError, CompileReport, CompiledDocument, DocsCompiler};
