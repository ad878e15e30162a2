//! Content format detection from top-level keys.

use crate::types::ContentFormat;
use serde_json::Value;

/// Top-level key identifying slide-based content.
pub const PRESENTATION_KEY: &str = "presentation";

/// Top-level key identifying chapter-based content.
pub const CHAPTERS_KEY: &str = "chapters";

impl ContentFormat {
    /// Detect which schema a raw content document follows.
    ///
    /// Only key presence matters, not the value under the key. A document
    /// that is not a JSON object, or carries neither key, is `Unknown`.
    pub fn classify(raw: &Value) -> Self {
        let Some(root) = raw.as_object() else {
            return Self::Unknown;
        };

        if root.contains_key(PRESENTATION_KEY) {
            Self::Presentation
        } else if root.contains_key(CHAPTERS_KEY) {
            Self::Chapters
        } else {
            Self::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_presentation_key_wins() {
        assert_eq!(
            ContentFormat::classify(&json!({ "presentation": {} })),
            ContentFormat::Presentation
        );
        // Other keys, including chapters, do not change the result
        assert_eq!(
            ContentFormat::classify(&json!({ "chapters": [], "presentation": {}, "title": "x" })),
            ContentFormat::Presentation
        );
    }

    #[test]
    fn test_chapters_without_presentation() {
        assert_eq!(
            ContentFormat::classify(&json!({ "chapters": [], "behaviour": {} })),
            ContentFormat::Chapters
        );
    }

    #[test]
    fn test_key_presence_not_value() {
        assert_eq!(
            ContentFormat::classify(&json!({ "presentation": null })),
            ContentFormat::Presentation
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(ContentFormat::classify(&json!({})), ContentFormat::Unknown);
        assert_eq!(
            ContentFormat::classify(&json!({ "slides": [], "pages": [] })),
            ContentFormat::Unknown
        );
        assert_eq!(ContentFormat::classify(&json!([1, 2])), ContentFormat::Unknown);
        assert_eq!(ContentFormat::classify(&json!("presentation")), ContentFormat::Unknown);
    }

    #[test]
    fn test_nested_keys_ignored() {
        assert_eq!(
            ContentFormat::classify(&json!({ "content": { "presentation": {} } })),
            ContentFormat::Unknown
        );
    }

    proptest! {
        #[test]
        fn prop_only_format_keys_decide(
            extra in prop::collection::vec(("[a-zA-Z0-9_]{1,12}", any::<i64>()), 0..8),
            has_presentation in any::<bool>(),
            has_chapters in any::<bool>(),
        ) {
            let mut root = serde_json::Map::new();
            for (key, value) in extra {
                if key != PRESENTATION_KEY && key != CHAPTERS_KEY {
                    root.insert(key, json!(value));
                }
            }
            if has_presentation {
                root.insert(PRESENTATION_KEY.to_string(), json!({}));
            }
            if has_chapters {
                root.insert(CHAPTERS_KEY.to_string(), json!([]));
            }

            let expected = if has_presentation {
                ContentFormat::Presentation
            } else if has_chapters {
                ContentFormat::Chapters
            } else {
                ContentFormat::Unknown
            };
            prop_assert_eq!(ContentFormat::classify(&Value::Object(root)), expected);
        }

        #[test]
        fn prop_non_objects_are_unknown(n in any::<i64>(), s in ".{0,16}") {
            prop_assert_eq!(ContentFormat::classify(&json!(n)), ContentFormat::Unknown);
            prop_assert_eq!(ContentFormat::classify(&json!(s)), ContentFormat::Unknown);
            prop_assert_eq!(ContentFormat::classify(&json!([s])), ContentFormat::Unknown);
        }
    }
}
