//! Post-processing of language-tagged code blocks in rendered HTML.
//!
//! Works on the converter's output rather than on the markdown AST, so any
//! `<pre><code class="language-…">` block is eligible, including ones written
//! as raw HTML in the source document.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::highlight::Highlighter;

/// A preformatted block wrapping a code element tagged `language-<name>`.
static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code class="language-(\w+)">(.*?)</code></pre>"#).unwrap()
});

/// Map a fence language tag to the name the highlighter knows it by.
#[must_use]
pub fn map_language(language: &str) -> &str {
    match language {
        "bash" | "sh" | "shell" => "bash",
        "env" => "dotenv",
        other => other,
    }
}

/// Replace every language-tagged code block in `html` with highlighted markup.
///
/// The captured code is entity-decoded before highlighting. When the
/// highlighter fails, the matched block is kept byte-for-byte.
pub fn highlight_code_blocks(html: &str, theme: &str, highlighter: &dyn Highlighter) -> String {
    CODE_BLOCK_RE
        .replace_all(html, |caps: &Captures| {
            let language = map_language(&caps[1]);
            let code = html_escape::decode_html_entities(&caps[2]);

            match highlighter.highlight(&code, language, theme) {
                Ok(highlighted) => highlighted,
                Err(e) => {
                    tracing::debug!(language, error = %e, "keeping code block unhighlighted");
                    caps[0].to_owned()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::highlight::HighlightError;

    /// Records every call and wraps the code in a marker element.
    #[derive(Default)]
    struct RecordingHighlighter {
        calls: Mutex<Vec<(String, String, String)>>,
    }

    impl RecordingHighlighter {
        fn calls(&self) -> Vec<(String, String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Highlighter for RecordingHighlighter {
        fn highlight(
            &self,
            code: &str,
            language: &str,
            theme: &str,
        ) -> Result<String, HighlightError> {
            self.calls
                .lock()
                .unwrap()
                .push((code.to_owned(), language.to_owned(), theme.to_owned()));
            Ok(format!("<hl lang=\"{language}\">{}</hl>", code.len()))
        }
    }

    /// Rejects one language, highlights the rest.
    struct RejectingHighlighter(&'static str);

    impl Highlighter for RejectingHighlighter {
        fn highlight(
            &self,
            _code: &str,
            language: &str,
            _theme: &str,
        ) -> Result<String, HighlightError> {
            if language == self.0 {
                Err(HighlightError::UnsupportedLanguage(language.to_owned()))
            } else {
                Ok("<hl/>".to_owned())
            }
        }
    }

    #[test]
    fn test_map_language_aliases() {
        assert_eq!(map_language("bash"), "bash");
        assert_eq!(map_language("sh"), "bash");
        assert_eq!(map_language("shell"), "bash");
        assert_eq!(map_language("env"), "dotenv");
        assert_eq!(map_language("php"), "php");
        assert_eq!(map_language("made-up"), "made-up");
    }

    #[test]
    fn test_block_is_replaced() {
        let highlighter = RecordingHighlighter::default();
        let html = "<p>before</p>\n<pre><code class=\"language-php\">echo 1;\n</code></pre>\n";

        let out = highlight_code_blocks(html, "github-dark", &highlighter);

        assert_eq!(out, "<p>before</p>\n<hl lang=\"php\">8</hl>\n");
        assert_eq!(
            highlighter.calls(),
            vec![("echo 1;\n".to_owned(), "php".to_owned(), "github-dark".to_owned())]
        );
    }

    #[test]
    fn test_entities_are_decoded_before_highlighting() {
        let highlighter = RecordingHighlighter::default();
        let html = "<pre><code class=\"language-php\">if ($a &lt; $b &amp;&amp; $c &gt; 0) { echo &quot;x&quot; . &#39;y&#39;; }\n</code></pre>";

        highlight_code_blocks(html, "github-dark", &highlighter);

        assert_eq!(
            highlighter.calls()[0].0,
            "if ($a < $b && $c > 0) { echo \"x\" . 'y'; }\n"
        );
    }

    #[test]
    fn test_shell_aliases_reach_highlighter_as_bash() {
        let highlighter = RecordingHighlighter::default();
        let html = concat!(
            "<pre><code class=\"language-sh\">ls\n</code></pre>",
            "<pre><code class=\"language-shell\">ls\n</code></pre>",
            "<pre><code class=\"language-env\">A=1\n</code></pre>",
        );

        highlight_code_blocks(html, "github-dark", &highlighter);

        let languages: Vec<_> = highlighter.calls().into_iter().map(|c| c.1).collect();
        assert_eq!(languages, vec!["bash", "bash", "dotenv"]);
    }

    #[test]
    fn test_failed_block_kept_verbatim() {
        let highlighter = RejectingHighlighter("cobol");
        let failing = "<pre><code class=\"language-cobol\">DISPLAY &quot;HI&quot;.\n</code></pre>";
        let html = format!("{failing}\n<pre><code class=\"language-php\">x\n</code></pre>");

        let out = highlight_code_blocks(&html, "github-dark", &highlighter);

        assert_eq!(out, format!("{failing}\n<hl/>"));
    }

    #[test]
    fn test_untagged_and_inline_code_untouched() {
        let highlighter = RecordingHighlighter::default();
        let html = "<p>Use <code>cart()</code></p>\n<pre><code>plain\n</code></pre>\n";

        let out = highlight_code_blocks(html, "github-dark", &highlighter);

        assert_eq!(out, html);
        assert!(highlighter.calls().is_empty());
    }

    #[test]
    fn test_non_word_language_tag_untouched() {
        let highlighter = RecordingHighlighter::default();
        let html = "<pre><code class=\"language-c++\">int x;\n</code></pre>";

        assert_eq!(highlight_code_blocks(html, "github-dark", &highlighter), html);
    }

    #[test]
    fn test_blocks_matched_lazily() {
        let highlighter = RecordingHighlighter::default();
        let html = "<pre><code class=\"language-php\">a\n</code></pre><p>mid</p><pre><code class=\"language-js\">b\n</code></pre>";

        let out = highlight_code_blocks(html, "github-dark", &highlighter);

        assert_eq!(out, "<hl lang=\"php\">2</hl><p>mid</p><hl lang=\"js\">2</hl>");
    }
}
