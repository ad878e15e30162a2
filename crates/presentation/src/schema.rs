//! Typed records for the parts of a slide export we read.

use book_core::schema::number;
use serde::Deserialize;

/// `presentation.globalBackgroundSelector`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BackgroundSelector {
    pub fill_global_background: String,
}

/// `elements[i].action`, just enough to pick a parser.
#[derive(Debug, Deserialize)]
pub(crate) struct ActionHeader {
    pub library: String,
}

/// Absolute geometry of an element, percent of the slide.
#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    #[serde(deserialize_with = "number")]
    pub x: f64,
    #[serde(deserialize_with = "number")]
    pub y: f64,
    #[serde(deserialize_with = "number")]
    pub width: f64,
    #[serde(deserialize_with = "number")]
    pub height: f64,
}

/// `action.params` of a text element.
#[derive(Debug, Deserialize)]
pub(crate) struct TextParams {
    pub text: String,
}

/// `action.params` of an image element.
#[derive(Debug, Deserialize)]
pub(crate) struct ImageParams {
    /// Absent (or null) for an empty placeholder slot.
    #[serde(default)]
    pub file: Option<FileRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileRef {
    pub path: String,
}
