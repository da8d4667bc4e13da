//! Section lookup and content resolution.

use std::fs;
use std::path::{Path, PathBuf};

use cartdocs_renderer::MarkdownRenderer;

use crate::section::{Section, SectionNeighbors};

/// HTML returned when a section has neither compiled output nor markdown.
pub const SECTION_NOT_FOUND_HTML: &str = "<p>Section not found</p>";

/// Error returned when a library cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// No sections were given; unknown keys need a section to fall back to.
    #[error("a docs library needs at least one section")]
    NoSections,
}

/// Ordered documentation sections with their content sources.
///
/// Content for a section is looked up in this order:
/// 1. `<compiled_dir>/<id>.html`, served as-is
/// 2. `<source_dir>/<file>`, rendered through the (cached) renderer
/// 3. [`SECTION_NOT_FOUND_HTML`]
pub struct DocsLibrary {
    sections: Vec<Section>,
    source_dir: PathBuf,
    compiled_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl DocsLibrary {
    /// Create a library over the given sections.
    ///
    /// The first section is the fallback for unknown keys.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::NoSections`] if `sections` is empty.
    pub fn new(
        sections: Vec<Section>,
        source_dir: PathBuf,
        compiled_dir: PathBuf,
        renderer: MarkdownRenderer,
    ) -> Result<Self, LibraryError> {
        if sections.is_empty() {
            return Err(LibraryError::NoSections);
        }
        Ok(Self {
            sections,
            source_dir,
            compiled_dir,
            renderer,
        })
    }

    /// Sections in navigation order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section shown when no key or an unknown key is requested.
    #[must_use]
    pub fn default_section(&self) -> &Section {
        &self.sections[0]
    }

    /// Markdown source directory.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Compiled HTML directory.
    #[must_use]
    pub fn compiled_dir(&self) -> &Path {
        &self.compiled_dir
    }

    /// Look up a section by key, falling back to the default section.
    #[must_use]
    pub fn resolve(&self, key: &str) -> &Section {
        self.find(key).unwrap_or_else(|| {
            tracing::debug!(key, "Unknown section, using default");
            self.default_section()
        })
    }

    /// Path of the compiled HTML file for a section.
    #[must_use]
    pub fn compiled_path(&self, section: &Section) -> PathBuf {
        self.compiled_dir
            .join(format!("{}.html", section.document_id()))
    }

    /// Whether a compiled HTML file exists for a section.
    #[must_use]
    pub fn has_compiled(&self, section: &Section) -> bool {
        self.compiled_path(section).is_file()
    }

    /// Rendered HTML for a section.
    ///
    /// Unknown keys resolve to the default section. Read failures fall
    /// through to the next content source; this never fails.
    #[must_use]
    pub fn content(&self, key: &str) -> String {
        let section = self.resolve(key);

        let compiled_path = self.compiled_path(section);
        match fs::read(&compiled_path) {
            Ok(bytes) => {
                tracing::debug!(path = %compiled_path.display(), "Serving compiled section");
                return String::from_utf8_lossy(&bytes).into_owned();
            }
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %compiled_path.display(), error = %e, "Failed to read compiled section");
            }
            Err(_) => {}
        }

        let source_path = self.source_dir.join(&section.file);
        match fs::read(&source_path) {
            Ok(bytes) => {
                tracing::debug!(path = %source_path.display(), "Rendering section from markdown");
                self.renderer.render(&String::from_utf8_lossy(&bytes))
            }
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %source_path.display(), error = %e, "Failed to read section markdown");
                }
                SECTION_NOT_FOUND_HTML.to_owned()
            }
        }
    }

    /// Previous and next sections around `key`.
    ///
    /// Unknown keys resolve to the default section first.
    #[must_use]
    pub fn neighbors(&self, key: &str) -> SectionNeighbors<'_> {
        let current = self.resolve(key);
        let index = self
            .sections
            .iter()
            .position(|section| section.key == current.key)
            .unwrap_or(0);

        SectionNeighbors {
            previous: index.checked_sub(1).and_then(|i| self.sections.get(i)),
            next: self.sections.get(index + 1),
        }
    }

    fn find(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.key == key)
    }
}
