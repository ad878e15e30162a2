//! Error types for book content normalization.

use crate::types::ContentFormat;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning raw content into a [`crate::Document`].
///
/// An unrecognized schema is not an error; it yields an empty document
/// tagged [`ContentFormat::Unknown`].
#[derive(Error, Debug)]
pub enum Error {
    /// The document source could not supply a document.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The document was retrieved but does not have the expected shape.
    #[error(transparent)]
    Structure(#[from] StructuralError),
}

impl Error {
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    pub fn is_structure(&self) -> bool {
        matches!(self, Self::Structure(_))
    }
}

/// Failure to obtain the raw content document.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to read the document from local storage.
    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The remote end answered with a non-success status.
    #[error("Request for {location} failed with status {status}")]
    Status { location: String, status: u16 },

    /// Network or protocol failure before a status was received.
    #[error("Transport error fetching {location}: {message}")]
    Transport { location: String, message: String },

    /// The payload is not valid JSON.
    #[error("Malformed JSON in {location}: {source}")]
    MalformedJson {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A required value is missing or has the wrong shape.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid {format} content at {path}{}: {message}", page_suffix(.page))]
pub struct StructuralError {
    /// Schema the document was being read as.
    pub format: ContentFormat,

    /// Zero-based index of the page being read, if the failure is inside one.
    pub page: Option<usize>,

    /// JSON path of the offending value, e.g. `chapters[2].params.content`.
    pub path: String,

    pub message: String,
}

impl StructuralError {
    pub fn new(
        format: ContentFormat,
        page: Option<usize>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            format,
            page,
            path: path.into(),
            message: message.into(),
        }
    }
}

fn page_suffix(page: &Option<usize>) -> String {
    match page {
        Some(index) => format!(" (page {})", index + 1),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_error_message_names_page() {
        let err = StructuralError::new(
            ContentFormat::Chapters,
            Some(1),
            "chapters[1].params.content[0].content.params.file",
            "missing field `path`",
        );
        assert_eq!(
            err.to_string(),
            "Invalid chapters content at chapters[1].params.content[0].content.params.file (page 2): missing field `path`"
        );
    }

    #[test]
    fn test_structural_error_without_page() {
        let err = StructuralError::new(
            ContentFormat::Presentation,
            None,
            "presentation.slides",
            "expected an array",
        );
        assert_eq!(
            err.to_string(),
            "Invalid presentation content at presentation.slides: expected an array"
        );
    }

    #[test]
    fn test_error_kinds_are_distinguishable() {
        let fetch: Error = FetchError::Status {
            location: "http://example.org/content.json".into(),
            status: 404,
        }
        .into();
        assert!(fetch.is_fetch());
        assert!(!fetch.is_structure());

        let shape: Error =
            StructuralError::new(ContentFormat::Chapters, None, "chapters", "expected an array")
                .into();
        assert!(shape.is_structure());
    }
}
