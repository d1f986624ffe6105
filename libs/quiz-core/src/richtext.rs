//! Rich-text to plain-text rendering.
//!
//! Pasted question text arrives as an HTML fragment from the editor (or as
//! plain text). Marker detection runs on the rendered plain text.

use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern"));

static BLOCK_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:p|div|li|tr|h[1-6])\s*>").expect("block end pattern")
});

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

/// Renders a rich-text fragment to plain text.
pub trait PlainTextRenderer {
    fn render(&self, rich: &str) -> String;
}

/// Markup-stripping renderer for HTML fragments.
///
/// `<br>` and closing block tags become newlines, every other tag is dropped,
/// and entities are decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl PlainTextRenderer for HtmlRenderer {
    fn render(&self, rich: &str) -> String {
        let text = LINE_BREAK.replace_all(rich, "\n");
        let text = BLOCK_END.replace_all(&text, "\n");
        let text = ANY_TAG.replace_all(&text, "");
        html_escape::decode_html_entities(&text).replace('\u{a0}', " ")
    }
}
