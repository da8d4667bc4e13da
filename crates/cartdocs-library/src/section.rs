//! Documentation section table.

use std::path::Path;

/// A documentation section backed by one markdown file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// Lookup key used in URLs (e.g., "basic-usage").
    pub key: String,
    /// Display title.
    pub title: String,
    /// Markdown filename inside the source directory (e.g., "`BASIC_USAGE.md`").
    pub file: String,
}

impl Section {
    /// Create a section.
    pub fn new(key: impl Into<String>, title: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            file: file.into(),
        }
    }

    /// Document id shared with the compiler: the markdown file stem.
    ///
    /// `BASIC_USAGE.md` compiles to `BASIC_USAGE.html`, so its id is
    /// `BASIC_USAGE`.
    #[must_use]
    pub fn document_id(&self) -> String {
        Path::new(&self.file).file_stem().map_or_else(
            || self.file.clone(),
            |stem| stem.to_string_lossy().into_owned(),
        )
    }
}

/// Sections adjacent to the current one, in table order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionNeighbors<'a> {
    /// Section shown before the current one.
    pub previous: Option<&'a Section>,
    /// Section shown after the current one.
    pub next: Option<&'a Section>,
}

/// Built-in storefront section table.
#[must_use]
pub fn default_sections() -> Vec<Section> {
    [
        ("installation", "Installation", "INSTALLATION.md"),
        ("basic-usage", "Basic Usage", "BASIC_USAGE.md"),
        ("conditions", "Conditions", "CONDITIONS.md"),
        ("configuration", "Configuration", "CONFIGURATION.md"),
        ("rules-engine", "Rules Engine", "RULES_ENGINE.md"),
        ("cart-merging", "Cart Merging", "MERGING.md"),
        ("events", "Events", "EVENTS.md"),
        ("prices", "Working with Prices", "PRICES.md"),
        ("blade", "Blade Templates", "BLADE.md"),
        ("extending", "Extending FlexiCart", "EXTENDING.md"),
        ("troubleshooting", "Troubleshooting", "TROUBLESHOOTING.md"),
    ]
    .into_iter()
    .map(|(key, title, file)| Section::new(key, title, file))
    .collect()
}
