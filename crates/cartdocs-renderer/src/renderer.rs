//! Cache-aware markdown renderer.

use std::sync::Arc;

use cartdocs_cache::{CacheBucket, CacheBucketExt};
use sha2::{Digest, Sha256};

use crate::code_block::highlight_code_blocks;
use crate::highlight::Highlighter;
use crate::markdown::markdown_to_html;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "github-dark";

/// Bucket name under which rendered documents are cached.
pub const CACHE_BUCKET: &str = "docs";

/// Renderer configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Color theme passed to the highlighter.
    pub theme: String,
    /// Whether [`MarkdownRenderer::render`] consults and fills the cache.
    pub use_cache: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            use_cache: true,
        }
    }
}

/// Markdown renderer with syntax highlighting and content-addressed caching.
///
/// A renderer value is immutable: [`without_cache`](Self::without_cache) and
/// [`with_theme`](Self::with_theme) return reconfigured copies that share the
/// same cache bucket and highlighter.
///
/// Cached entries are keyed by a hash of the theme and the markdown source and
/// are never invalidated. A different source or theme produces a different key.
#[derive(Clone)]
pub struct MarkdownRenderer {
    options: RenderOptions,
    cache: Arc<dyn CacheBucket>,
    highlighter: Arc<dyn Highlighter>,
}

impl MarkdownRenderer {
    /// Create a renderer with default options (default theme, caching on).
    #[must_use]
    pub fn new(cache: Arc<dyn CacheBucket>, highlighter: Arc<dyn Highlighter>) -> Self {
        Self {
            options: RenderOptions::default(),
            cache,
            highlighter,
        }
    }

    /// Replace all options at once.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// A copy of this renderer that never reads or writes the cache.
    ///
    /// Entries cached earlier are left in place.
    #[must_use]
    pub fn without_cache(&self) -> Self {
        let mut renderer = self.clone();
        renderer.options.use_cache = false;
        renderer
    }

    /// A copy of this renderer using `theme` for highlighting.
    #[must_use]
    pub fn with_theme(&self, theme: impl Into<String>) -> Self {
        let mut renderer = self.clone();
        renderer.options.theme = theme.into();
        renderer
    }

    /// Render markdown to HTML with highlighted code blocks.
    ///
    /// In cached mode the result is looked up by [`cache_key`](Self::cache_key)
    /// first and stored after computation. In uncached mode the result is
    /// always recomputed.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        if !self.options.use_cache {
            return self.render_uncached(markdown);
        }

        let key = self.cache_key(markdown);
        if let Some(html) = self.cache.get_string(&key) {
            tracing::debug!(key = %key, "rendered document served from cache");
            return html;
        }

        let html = self.render_uncached(markdown);
        self.cache.set_string(&key, &html);
        html
    }

    /// Plain markdown conversion, without highlighting or caching.
    #[must_use]
    pub fn render_html(&self, markdown: &str) -> String {
        markdown_to_html(markdown)
    }

    /// Cache key for `markdown` under the current theme.
    ///
    /// Hex-encoded SHA-256 of `"{theme}:{markdown}"`.
    #[must_use]
    pub fn cache_key(&self, markdown: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.options.theme.as_bytes());
        hasher.update(b":");
        hasher.update(markdown.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn render_uncached(&self, markdown: &str) -> String {
        let html = markdown_to_html(markdown);
        highlight_code_blocks(&html, &self.options.theme, self.highlighter.as_ref())
    }
}
