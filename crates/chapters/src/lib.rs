//! Normalizer for chapter-based book content.
//!
//! Reads exports shaped as `chapters[*].params.content[*].content`. These
//! carry no positions; the renderer lays elements out by flow.

pub mod parser;
mod schema;

pub use parser::ChaptersNormalizer;
