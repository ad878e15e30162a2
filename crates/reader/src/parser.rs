//! Content parser: fetch, classify and normalize.

use book_chapters::ChaptersNormalizer;
use book_core::{
    strip_reserved_keys, ContentFormat, Document, DocumentSource, FormatNormalizer, Result,
};
use book_presentation::PresentationNormalizer;
use serde_json::Value;

/// Turns raw book content into a [`Document`].
///
/// Holds no per-call state, so one parser can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct ContentParser {
    presentation: PresentationNormalizer,
    chapters: ChaptersNormalizer,
}

impl ContentParser {
    /// Create a parser that knows every supported format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the content document from `source` and normalize it.
    ///
    /// Fails with [`book_core::Error::Fetch`] when the source cannot supply a
    /// document and with [`book_core::Error::Structure`] when it has the wrong
    /// shape. Unrecognized content is not an error: it yields an empty
    /// document tagged [`ContentFormat::Unknown`].
    pub async fn parse<S>(&self, source: &S) -> Result<Document>
    where
        S: DocumentSource + ?Sized,
    {
        log::debug!("Fetching content from {}", source.location());
        let raw = source.fetch().await?;
        self.parse_value(raw)
    }

    /// Normalize a raw content document that is already in memory.
    pub fn parse_value(&self, mut raw: Value) -> Result<Document> {
        strip_reserved_keys(&mut raw);

        let format = ContentFormat::classify(&raw);
        log::debug!("Detected {} content", format);

        match self.normalizer_for(format) {
            Some(normalizer) => {
                let document = normalizer.normalize(&raw)?;
                log::debug!("Normalized {} pages", document.page_count());
                Ok(document)
            }
            None => {
                log::warn!("Unknown content format; no pages produced");
                Ok(Document::unsupported())
            }
        }
    }

    fn normalizer_for(&self, format: ContentFormat) -> Option<&dyn FormatNormalizer> {
        match format {
            ContentFormat::Presentation => Some(&self.presentation),
            ContentFormat::Chapters => Some(&self.chapters),
            ContentFormat::Unknown => None,
        }
    }
}
