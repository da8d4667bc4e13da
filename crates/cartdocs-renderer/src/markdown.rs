//! Plain markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

/// Parser options: GitHub Flavored Markdown extensions.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Convert markdown to HTML without any code block post-processing.
///
/// Fenced code blocks with an info string come out as
/// `<pre><code class="language-{lang}">…</code></pre>` with their text
/// HTML-escaped.
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::push_html(&mut out, parser);
    out
}
