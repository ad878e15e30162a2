//! Core document model, format classification, and schema helpers for
//! normalizing digital-book content exports.

pub mod assets;
pub mod classify;
pub mod error;
pub mod normalizer;
pub mod schema;
pub mod source;
pub mod text;
pub mod types;

pub use assets::AssetPaths;
pub use error::{Error, FetchError, Result, StructuralError};
pub use normalizer::{ElementKind, FormatNormalizer};
pub use schema::{JsonPath, SchemaReader};
pub use source::{strip_reserved_keys, DocumentSource, JsonSource};
pub use text::HtmlText;
pub use types::{
    AudioElement, Bounds, ContentFormat, Document, ImageElement, ImageSource, Measure, Page,
    TextElement, VisualElement, WordTimestamp, CHAPTER_BACKGROUND, EMPTY_IMAGE_SENTINEL,
};
