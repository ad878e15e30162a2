//! WASM-compatible wrapper for book content normalization.
//!
//! This crate exposes the content parser to JavaScript renderers running
//! in the browser or in workers. Fetching stays on the JavaScript side; the
//! already-downloaded `content.json` text is passed in.

use book_core::{ContentFormat, Document};
use book_reader::ContentParser;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of parsing a content document.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResult {
    /// Detected content format.
    pub format: ContentFormat,
    /// Number of pages produced.
    pub page_count: usize,
    /// The normalized document.
    pub document: Document,
    /// Set when the content was not in a supported format.
    pub warning: Option<String>,
}

/// Parse the text of a content document.
///
/// # Arguments
/// * `json` - The raw `content.json` text
///
/// # Returns
/// A JavaScript object with the parse result, or throws on malformed or
/// structurally invalid content.
#[wasm_bindgen]
pub fn parse_content(json: &str) -> Result<JsValue, JsValue> {
    let result = parse_content_impl(json).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Detect the format of a content document without normalizing it.
///
/// Returns `"presentation"`, `"chapters"` or `"unknown"`.
#[wasm_bindgen]
pub fn classify_content(json: &str) -> Result<String, JsValue> {
    let raw: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Malformed JSON: {}", e)))?;
    Ok(ContentFormat::classify(&raw).to_string())
}

fn parse_content_impl(json: &str) -> Result<ParseResult, String> {
    let raw: serde_json::Value =
        serde_json::from_str(json).map_err(|e| format!("Malformed JSON: {}", e))?;

    let document = ContentParser::new()
        .parse_value(raw)
        .map_err(|e| e.to_string())?;

    let warning = if document.is_supported() {
        None
    } else {
        Some("Unsupported content: no known book format".to_string())
    };

    Ok(ParseResult {
        format: document.format,
        page_count: document.page_count(),
        document,
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chapters() {
        let json = r#"{
            "chapters": [
                { "params": { "content": [
                    { "content": { "library": "H5P.AdvancedText 1.1", "params": { "text": "<p>Hi</p>" } } }
                ] } }
            ],
            "l10n": { "nextPage": "Next" }
        }"#;

        let result = parse_content_impl(json).unwrap();

        assert_eq!(result.format, ContentFormat::Chapters);
        assert_eq!(result.page_count, 1);
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_unknown_has_warning() {
        let result = parse_content_impl(r#"{"title": "x"}"#).unwrap();

        assert_eq!(result.format, ContentFormat::Unknown);
        assert_eq!(result.page_count, 0);
        assert!(result.warning.is_some());
    }

    #[test]
    fn test_errors_are_messages() {
        let err = parse_content_impl("not json").unwrap_err();
        assert!(err.starts_with("Malformed JSON"));

        let err = parse_content_impl(r#"{"chapters": 3}"#).unwrap_err();
        assert!(err.contains("chapters"));
    }
}
