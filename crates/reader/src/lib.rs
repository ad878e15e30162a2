//! Document assembler for digital-book content.
//!
//! Fetches the raw content document from a [`DocumentSource`], strips the
//! reserved keys, classifies the schema and hands it to the matching
//! normalizer.

pub mod parser;
pub mod sources;

pub use book_core::{ContentFormat, Document, DocumentSource, Error, JsonSource, Result};
pub use parser::ContentParser;
#[cfg(feature = "fs")]
pub use sources::FileSource;
#[cfg(feature = "http")]
pub use sources::HttpSource;
