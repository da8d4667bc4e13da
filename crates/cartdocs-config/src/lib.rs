//! Configuration management for cartdocs.
//!
//! Parses `cartdocs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [docs]
//! source_dir = "resources/docs/v1"
//! theme = "github-dark"
//!
//! [cache]
//! dir = ".cartdocs/cache"
//!
//! [[sections]]
//! key = "installation"
//! title = "Installation"
//! file = "INSTALLATION.md"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.compiled_dir`
//! - `docs.theme`
//! - `cache.dir`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown source directory.
    pub source_dir: Option<PathBuf>,
    /// Override compiled HTML directory.
    pub compiled_dir: Option<PathBuf>,
    /// Override highlighting theme.
    pub theme: Option<String>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "cartdocs.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Cache configuration (paths are relative strings from TOML).
    cache: CacheConfigRaw,
    /// Documentation sections, in navigation order.
    ///
    /// `None` means the built-in section table is used.
    pub sections: Option<Vec<SectionConfig>>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved cache configuration (set after loading).
    #[serde(skip)]
    pub cache_resolved: CacheConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    compiled_dir: Option<String>,
    theme: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding the markdown documents.
    pub source_dir: PathBuf,
    /// Directory holding compiled `<id>.html` files.
    pub compiled_dir: PathBuf,
    /// Highlighting theme name.
    ///
    /// `None` leaves the choice to the renderer's default theme.
    pub theme: Option<String>,
}

/// Raw cache configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CacheConfigRaw {
    enabled: Option<bool>,
    dir: Option<String>,
}

/// Resolved cache configuration.
#[derive(Debug, Default)]
pub struct CacheConfig {
    /// Whether rendered documents are cached at all.
    pub enabled: bool,
    /// Directory for a file-backed cache shared between processes.
    ///
    /// `None` keeps the cache in memory for the lifetime of the process.
    pub dir: Option<PathBuf>,
}

/// A documentation section entry.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SectionConfig {
    /// Lookup key (e.g., "installation").
    pub key: String,
    /// Display title.
    pub title: String,
    /// Markdown filename inside the source directory (e.g., "INSTALLATION.md").
    pub file: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `cartdocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Overriding the source directory alone moves the compiled directory
    /// along with it, unless the compiled directory was configured explicitly.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            if self.docs.compiled_dir.is_none() {
                self.docs_resolved.compiled_dir = source_dir.join("compiled");
            }
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(compiled_dir) = &settings.compiled_dir {
            self.docs_resolved.compiled_dir.clone_from(compiled_dir);
        }
        if let Some(theme) = &settings.theme {
            self.docs_resolved.theme = Some(theme.clone());
        }
        if let Some(enabled) = settings.cache_enabled {
            self.cache_resolved.enabled = enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let source_dir = base.join("docs");
        Self {
            docs: DocsConfigRaw::default(),
            cache: CacheConfigRaw::default(),
            sections: None,
            docs_resolved: DocsConfig {
                compiled_dir: source_dir.join("compiled"),
                source_dir,
                theme: None,
            },
            cache_resolved: CacheConfig {
                enabled: true,
                dir: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(theme) = &self.docs_resolved.theme {
            require_non_empty(theme, "docs.theme")?;
        }
        self.validate_sections()
    }

    /// Validate section entries: non-empty fields, unique keys, markdown files.
    fn validate_sections(&self) -> Result<(), ConfigError> {
        let Some(sections) = &self.sections else {
            return Ok(());
        };
        if sections.is_empty() {
            return Err(ConfigError::Validation(
                "sections cannot be an empty list".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for section in sections {
            require_non_empty(&section.key, "sections.key")?;
            require_non_empty(&section.title, "sections.title")?;
            if !seen.insert(section.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate section key: {}",
                    section.key
                )));
            }
            if !Path::new(&section.file)
                .extension()
                .is_some_and(|ext| ext == "md")
            {
                return Err(ConfigError::Validation(format!(
                    "section {} file must be a .md file, got {:?}",
                    section.key, section.file
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let docs = &mut self.docs;
        if let Some(ref dir) = docs.source_dir {
            docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref dir) = docs.compiled_dir {
            docs.compiled_dir = Some(expand::expand_env(dir, "docs.compiled_dir")?);
        }
        if let Some(ref theme) = docs.theme {
            docs.theme = Some(expand::expand_env(theme, "docs.theme")?);
        }
        if let Some(ref dir) = self.cache.dir {
            self.cache.dir = Some(expand::expand_env(dir, "cache.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs"));
        let compiled_dir = match self.docs.compiled_dir.as_deref() {
            Some(dir) => config_dir.join(dir),
            None => source_dir.join("compiled"),
        };

        self.docs_resolved = DocsConfig {
            source_dir,
            compiled_dir,
            theme: self.docs.theme.clone(),
        };

        self.cache_resolved = CacheConfig {
            enabled: self.cache.enabled.unwrap_or(true),
            dir: self.cache.dir.as_deref().map(|dir| config_dir.join(dir)),
        };
    }
}
