//! The capability shared by every per-format normalizer.

use crate::error::Result;
use crate::types::{ContentFormat, Document};
use serde_json::Value;

/// Library marker of rich-text elements.
pub const TEXT_LIBRARY: &str = "AdvancedText";

/// Library marker of image elements.
pub const IMAGE_LIBRARY: &str = "Image";

/// What an authored element becomes, decided from its library name
/// (e.g. `H5P.AdvancedText 1.1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Image,
    /// Any other library, audio included. Dropped without error.
    Unsupported,
}

impl ElementKind {
    pub fn from_library(library: &str) -> Self {
        if library.contains(TEXT_LIBRARY) {
            Self::Text
        } else if library.contains(IMAGE_LIBRARY) {
            Self::Image
        } else {
            Self::Unsupported
        }
    }
}

/// Turns a raw document of one known format into a [`Document`].
///
/// Implementations are stateless; the same input always yields an equal
/// document.
pub trait FormatNormalizer: Send + Sync {
    /// The format this normalizer reads.
    fn format(&self) -> ContentFormat;

    /// Normalize a raw document already classified as [`Self::format`].
    ///
    /// Reserved keys must have been stripped by the caller.
    fn normalize(&self, raw: &Value) -> Result<Document>;
}
