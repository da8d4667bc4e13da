//! CLI command implementations.

mod compile;
mod render;
mod sections;

use std::sync::Arc;

use cartdocs_cache::{Cache, CacheBucket, FileCache, MemoryCache, NullCacheBucket};
use cartdocs_config::Config;
use cartdocs_library::{DocsLibrary, Section, default_sections};
use cartdocs_renderer::{
    CACHE_BUCKET, DEFAULT_THEME, MarkdownRenderer, RenderOptions, SyntectHighlighter,
};

pub(crate) use compile::CompileArgs;
pub(crate) use render::RenderArgs;
pub(crate) use sections::SectionsArgs;

use crate::error::CliError;

/// Build the markdown renderer described by the configuration.
///
/// The file cache is versioned with `version` so an upgrade starts from an
/// empty cache.
fn renderer_from_config(config: &Config, version: &str) -> Result<MarkdownRenderer, CliError> {
    let highlighter = SyntectHighlighter::new();
    let cache = &config.cache_resolved;
    let options = RenderOptions {
        theme: config
            .docs_resolved
            .theme
            .clone()
            .unwrap_or_else(|| DEFAULT_THEME.to_owned()),
        use_cache: cache.enabled,
    };
    let theme = &options.theme;
    if !highlighter.theme_names().any(|name| name == theme) {
        let mut known: Vec<&str> = highlighter.theme_names().collect();
        known.sort_unstable();
        return Err(CliError::Validation(format!(
            "Unknown theme '{theme}'. Available themes: {}",
            known.join(", ")
        )));
    }

    let bucket: Arc<dyn CacheBucket> = match (cache.enabled, &cache.dir) {
        (false, _) => Arc::new(NullCacheBucket),
        (true, Some(dir)) => Arc::from(FileCache::new(dir.clone(), version).bucket(CACHE_BUCKET)),
        (true, None) => Arc::from(MemoryCache::new().bucket(CACHE_BUCKET)),
    };

    Ok(MarkdownRenderer::new(bucket, Arc::new(highlighter)).with_options(options))
}

/// Section table from the configuration, or the built-in one.
fn sections_from_config(config: &Config) -> Vec<Section> {
    config.sections.as_ref().map_or_else(default_sections, |sections| {
        sections
            .iter()
            .map(|s| Section::new(s.key.clone(), s.title.clone(), s.file.clone()))
            .collect()
    })
}

/// Build the docs library described by the configuration.
fn library_from_config(
    config: &Config,
    renderer: MarkdownRenderer,
) -> Result<DocsLibrary, CliError> {
    Ok(DocsLibrary::new(
        sections_from_config(config),
        config.docs_resolved.source_dir.clone(),
        config.docs_resolved.compiled_dir.clone(),
        renderer,
    )?)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use cartdocs_config::{CliSettings, SectionConfig};
    use pretty_assertions::assert_eq;

    use super::*;

    fn config_in(dir: &Path, toml: &str) -> Config {
        let path = dir.join("cartdocs.toml");
        std::fs::write(&path, toml).unwrap();
        Config::load(Some(&path), None).unwrap()
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = config_in(tmp.path(), "");
        config.docs_resolved.theme = Some("no-such-theme".to_owned());

        let err = renderer_from_config(&config, "test").err().unwrap();
        assert!(err.to_string().contains("no-such-theme"));
    }

    #[test]
    fn test_renderer_uses_configured_theme_and_cache_flag() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("cartdocs.toml");
        std::fs::write(&path, "[docs]\ntheme = \"github-light\"\n").unwrap();
        let settings = CliSettings {
            cache_enabled: Some(false),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        let renderer = renderer_from_config(&config, "test").unwrap();

        assert_eq!(renderer.options().theme, "github-light");
        assert!(!renderer.options().use_cache);
    }

    #[test]
    fn test_renderer_defaults_to_renderer_theme() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = config_in(tmp.path(), "");

        let renderer = renderer_from_config(&config, "test").unwrap();

        assert_eq!(renderer.options().theme, DEFAULT_THEME);
        assert_eq!(renderer.options(), &RenderOptions::default());
    }

    #[test]
    fn test_library_from_config_uses_default_sections() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = config_in(tmp.path(), "");
        let renderer = renderer_from_config(&config, "test").unwrap();

        let library = library_from_config(&config, renderer).unwrap();

        assert_eq!(library.default_section().key, "installation");
        assert_eq!(library.source_dir(), tmp.path().join("docs"));
    }

    #[test]
    fn test_file_cache_persists_between_renderers() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = config_in(tmp.path(), "[cache]\ndir = \"cache\"\n");
        let markdown = "# Cached\n";

        let first = renderer_from_config(&config, "test").unwrap();
        let html = first.render(markdown);
        let key = first.cache_key(markdown);

        let bucket = FileCache::new(tmp.path().join("cache"), "test").bucket(CACHE_BUCKET);
        assert_eq!(bucket.get(&key), Some(html.into_bytes()));
    }

    #[test]
    fn test_sections_default_table() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = config_in(tmp.path(), "");

        assert_eq!(sections_from_config(&config), default_sections());
    }

    #[test]
    fn test_sections_from_config_table() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = config_in(
            tmp.path(),
            "[[sections]]\nkey = \"intro\"\ntitle = \"Intro\"\nfile = \"INTRO.md\"\n",
        );

        assert_eq!(
            config.sections,
            Some(vec![SectionConfig {
                key: "intro".to_owned(),
                title: "Intro".to_owned(),
                file: "INTRO.md".to_owned(),
            }])
        );
        assert_eq!(
            sections_from_config(&config),
            vec![Section::new("intro", "Intro", "INTRO.md")]
        );
    }
}
