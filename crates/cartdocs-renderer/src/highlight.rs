//! Syntax highlighting engines.

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Error returned when a code block cannot be highlighted.
///
/// Never escapes a render: the block is kept unhighlighted instead.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// No grammar is known for the language.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    /// No color scheme is known under this name.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    /// The engine failed while processing the code.
    #[error("highlighting {language} failed: {message}")]
    Engine {
        /// Language being highlighted.
        language: String,
        /// Engine error message.
        message: String,
    },
}

/// A syntax highlighting engine.
///
/// Receives raw source text (entities already decoded) and returns the
/// complete replacement markup for the code block.
pub trait Highlighter: Send + Sync {
    /// Highlight `code` written in `language` with the named `theme`.
    fn highlight(&self, code: &str, language: &str, theme: &str) -> Result<String, HighlightError>;
}

/// Theme names accepted in addition to syntect's built-in names.
const THEME_ALIASES: &[(&str, &str)] = &[
    ("github-dark", "base16-ocean.dark"),
    ("github-light", "InspiredGitHub"),
    ("solarized-dark", "Solarized (dark)"),
    ("solarized-light", "Solarized (light)"),
];

/// Grammars borrowed for languages the default syntax set lacks.
const SYNTAX_FALLBACKS: &[(&str, &str)] = &[("dotenv", "sh")];

/// [`Highlighter`] backed by syntect's bundled grammars and themes.
///
/// Output is a `<pre>` element with inline styles, tagged with
/// `class="syntax-highlight"` and `data-language`/`data-theme` attributes.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl SyntectHighlighter {
    /// Load the default syntax and theme sets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Names of all themes this highlighter accepts.
    pub fn theme_names(&self) -> impl Iterator<Item = &str> {
        THEME_ALIASES
            .iter()
            .map(|(alias, _)| *alias)
            .chain(self.theme_set.themes.keys().map(String::as_str))
    }

    fn find_theme(&self, name: &str) -> Option<&Theme> {
        let resolved = THEME_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map_or(name, |(_, target)| *target);
        self.theme_set.themes.get(resolved)
    }

    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        let token = language.to_ascii_lowercase();
        let token = SYNTAX_FALLBACKS
            .iter()
            .find(|(lang, _)| *lang == token)
            .map_or(token.as_str(), |(_, fallback)| *fallback);

        self.syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_name(token))
            .or_else(|| self.syntax_set.find_syntax_by_extension(token))
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str, theme: &str) -> Result<String, HighlightError> {
        let syntax = self
            .find_syntax(language)
            .ok_or_else(|| HighlightError::UnsupportedLanguage(language.to_owned()))?;
        let theme_ref = self
            .find_theme(theme)
            .ok_or_else(|| HighlightError::UnknownTheme(theme.to_owned()))?;

        let html = highlighted_html_for_string(code, &self.syntax_set, syntax, theme_ref)
            .map_err(|e| HighlightError::Engine {
                language: language.to_owned(),
                message: e.to_string(),
            })?;

        Ok(tag_pre(&html, language, theme))
    }
}

/// Add identifying attributes to the leading `<pre` of highlighted markup.
fn tag_pre(html: &str, language: &str, theme: &str) -> String {
    let Some(rest) = html.strip_prefix("<pre") else {
        return html.to_owned();
    };
    format!(
        r#"<pre class="syntax-highlight" data-language="{}" data-theme="{}"{rest}"#,
        html_escape::encode_double_quoted_attribute(language),
        html_escape::encode_double_quoted_attribute(theme),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_bash() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter
            .highlight("echo hi\n", "bash", "github-dark")
            .unwrap();

        assert!(html.starts_with(
            r#"<pre class="syntax-highlight" data-language="bash" data-theme="github-dark" style="#
        ));
        assert!(html.contains("echo"));
        assert!(html.contains("<span"));
        assert!(!html.contains("language-bash"));
    }

    #[test]
    fn test_highlight_escapes_source() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter
            .highlight("<?php echo 1 < 2; ?>\n", "php", "github-dark")
            .unwrap();

        assert!(html.contains("&lt;"));
        assert!(!html.contains("<?php"));
    }

    #[test]
    fn test_dotenv_uses_shell_grammar() {
        let highlighter = SyntectHighlighter::new();
        assert!(highlighter.highlight("APP_ENV=local\n", "dotenv", "github-dark").is_ok());
    }

    #[test]
    fn test_unknown_language_is_error() {
        let highlighter = SyntectHighlighter::new();
        let err = highlighter
            .highlight("x", "definitely-not-a-language", "github-dark")
            .unwrap_err();
        assert!(matches!(err, HighlightError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_unknown_theme_is_error() {
        let highlighter = SyntectHighlighter::new();
        let err = highlighter.highlight("x = 1\n", "python", "no-such-theme").unwrap_err();
        assert!(matches!(err, HighlightError::UnknownTheme(_)));
    }

    #[test]
    fn test_syntect_theme_names_accepted() {
        let highlighter = SyntectHighlighter::new();
        assert!(highlighter.highlight("x = 1\n", "python", "InspiredGitHub").is_ok());
        assert!(highlighter.theme_names().any(|name| name == "github-dark"));
        assert!(highlighter.theme_names().any(|name| name == "base16-ocean.dark"));
    }

    #[test]
    fn test_tag_pre_without_pre_is_unchanged() {
        assert_eq!(tag_pre("<div>x</div>", "bash", "t"), "<div>x</div>");
    }
}
