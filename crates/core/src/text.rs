//! Plain-text view of HTML text elements.
//!
//! Block-level tags and `<br>` become line breaks, other markup is dropped,
//! common entities are decoded and whitespace is collapsed. The document
//! model keeps the original HTML; this is only for text-oriented consumers.

use crate::types::{Document, Page};
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Tags that end a line of text.
static LINE_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|h[1-6]|li|tr)\s*>").unwrap()
});

/// Any remaining tag.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Numeric character references, decimal or hex.
static NUMERIC_ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap());

/// Regex to collapse multiple whitespace characters into one.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").unwrap());

/// Named entities decoded to characters. `&amp;` must stay last.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", "\u{a0}"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

/// Converts the HTML of text elements to plain lines.
#[derive(Debug, Clone, Default)]
pub struct HtmlText {
    /// Whether to keep line breaks implied by the markup.
    preserve_line_breaks: bool,
}

impl HtmlText {
    /// Create a converter that keeps line breaks.
    pub fn new() -> Self {
        Self {
            preserve_line_breaks: true,
        }
    }

    /// Set whether to keep line breaks implied by the markup.
    pub fn with_preserve_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Convert one HTML fragment to plain text.
    pub fn to_plain(&self, html: &str) -> String {
        let text = LINE_BREAK_REGEX.replace_all(html, "\n");
        let text = TAG_REGEX.replace_all(&text, "");
        let text = decode_entities(&text);
        let text: String = text.nfc().collect();

        let lines = text.lines().map(|line| {
            WHITESPACE_COLLAPSE_REGEX
                .replace_all(line, " ")
                .trim()
                .to_string()
        });

        if self.preserve_line_breaks {
            lines.filter(|l| !l.is_empty()).collect::<Vec<_>>().join("\n")
        } else {
            let joined = lines.collect::<Vec<_>>().join(" ");
            WHITESPACE_COLLAPSE_REGEX
                .replace_all(&joined, " ")
                .trim()
                .to_string()
        }
    }

    /// Plain-text lines of every text element on a page, in display order.
    pub fn page_lines(&self, page: &Page) -> Vec<String> {
        page.texts()
            .flat_map(|t| {
                self.to_plain(&t.html)
                    .lines()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|l| !l.is_empty())
            .collect()
    }

    /// Plain-text lines of a whole document, one inner vector per page.
    pub fn document_lines(&self, document: &Document) -> Vec<Vec<String>> {
        document.pages.iter().map(|p| self.page_lines(p)).collect()
    }
}

fn decode_entities(text: &str) -> String {
    let decoded = NUMERIC_ENTITY_REGEX.replace_all(text, |caps: &regex::Captures| {
        let body = &caps[1];
        let code = match body.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => body.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    NAMED_ENTITIES
        .iter()
        .fold(decoded.into_owned(), |acc, (entity, ch)| acc.replace(entity, ch))
}
