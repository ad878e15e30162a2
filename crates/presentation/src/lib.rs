//! Normalizer for slide-based book content.
//!
//! Reads exports shaped as `presentation.slides[*].elements[*]`, where every
//! element carries absolute geometry in percent of the slide.

pub mod parser;
mod schema;

pub use parser::PresentationNormalizer;
