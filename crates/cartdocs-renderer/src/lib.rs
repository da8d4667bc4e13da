//! Markdown to HTML rendering with syntax-highlighted code blocks.
//!
//! Rendering is a two-step pipeline:
//!
//! 1. Markdown is converted to HTML with `pulldown-cmark`.
//! 2. Every `<pre><code class="language-…">` block in that HTML is replaced by
//!    the markup returned from a [`Highlighter`]. Blocks the highlighter
//!    rejects stay exactly as the converter produced them.
//!
//! [`MarkdownRenderer`] wraps the pipeline with an injected
//! [`CacheBucket`](cartdocs_cache::CacheBucket) keyed by a hash of the theme
//! and the markdown source. [`MarkdownRenderer::without_cache`] returns a
//! renderer that always recomputes, which is what batch compilation uses.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use cartdocs_cache::{Cache, MemoryCache};
//! use cartdocs_renderer::{MarkdownRenderer, SyntectHighlighter};
//!
//! let cache = MemoryCache::new();
//! let renderer = MarkdownRenderer::new(
//!     Arc::from(cache.bucket("docs")),
//!     Arc::new(SyntectHighlighter::new()),
//! );
//!
//! let html = renderer.render("# Install\n\n```bash\necho hi\n```\n");
//! assert!(html.starts_with("<h1>Install</h1>"));
//! ```

mod code_block;
mod highlight;
mod markdown;
mod renderer;

pub use code_block::{highlight_code_blocks, map_language};
pub use highlight::{HighlightError, Highlighter, SyntectHighlighter};
pub use markdown::markdown_to_html;
pub use renderer::{CACHE_BUCKET, DEFAULT_THEME, MarkdownRenderer, RenderOptions};
