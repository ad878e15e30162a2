//! Typed records for the parts of a chapter export we read.

use book_core::schema::optional_number;
use serde::Deserialize;

/// `content[j].content`, just enough to pick a parser.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentHeader {
    pub library: String,
}

/// `content.params` of a text element.
#[derive(Debug, Deserialize)]
pub(crate) struct TextParams {
    pub text: String,
}

/// `content.params` of an image element.
///
/// The file is required here; chapter exports have no placeholder slots.
#[derive(Debug, Deserialize)]
pub(crate) struct ImageParams {
    #[serde(default, deserialize_with = "optional_number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub height: Option<f64>,
    pub file: FileRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileRef {
    pub path: String,
}
