//! Chapter export normalizer implementation.

use crate::schema::{ContentHeader, ImageParams, TextParams};
use book_core::{
    Bounds, ContentFormat, Document, ElementKind, FormatNormalizer, ImageElement, ImageSource,
    JsonPath, Measure, Page, Result, SchemaReader, StructuralError, TextElement, VisualElement,
    CHAPTER_BACKGROUND,
};
use serde_json::Value;

/// Normalizer for chapter-based content (`chapters`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaptersNormalizer;

impl ChaptersNormalizer {
    /// Create a new chapter normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Parse a single chapter into a page.
    fn parse_chapter(
        &self,
        reader: &SchemaReader,
        chapter: &Value,
        path: &JsonPath,
    ) -> std::result::Result<Page, StructuralError> {
        let mut page = Page::new(CHAPTER_BACKGROUND);
        let params = reader.field(chapter, path, "params")?;
        let params_path = path.key("params");
        let items = reader.array(params, &params_path, "content")?;
        let items_path = params_path.key("content");

        for (idx, item) in items.iter().enumerate() {
            if let Some(visual) = self.parse_item(reader, item, &items_path.index(idx))? {
                page.add_element(visual);
            }
        }

        Ok(page)
    }

    /// Parse one `content` entry. Unsupported libraries yield `None`.
    fn parse_item(
        &self,
        reader: &SchemaReader,
        item: &Value,
        path: &JsonPath,
    ) -> std::result::Result<Option<VisualElement>, StructuralError> {
        // Each entry wraps the element one level deeper than slide exports do
        let content = reader.field(item, path, "content")?;
        let content_path = path.key("content");
        let header: ContentHeader = reader.record(content, &content_path)?;

        let params_path = content_path.key("params");

        let element = match ElementKind::from_library(&header.library) {
            ElementKind::Text => {
                let params = reader.field(content, &content_path, "params")?;
                let text: TextParams = reader.record(params, &params_path)?;
                VisualElement::Text(TextElement::new(Bounds::flow(), text.text))
            }
            ElementKind::Image => {
                let params = reader.field(content, &content_path, "params")?;
                let image: ImageParams = reader.record(params, &params_path)?;
                let bounds = Bounds {
                    width: Measure::from(image.width),
                    height: Measure::from(image.height),
                    ..Bounds::flow()
                };
                let source = ImageSource::from_path(image.file.path);
                VisualElement::Image(ImageElement::new(bounds, source))
            }
            ElementKind::Unsupported => {
                log::debug!("Skipping element at {} ({})", path, header.library);
                return Ok(None);
            }
        };

        Ok(Some(element))
    }
}

impl FormatNormalizer for ChaptersNormalizer {
    fn format(&self) -> ContentFormat {
        ContentFormat::Chapters
    }

    fn normalize(&self, raw: &Value) -> Result<Document> {
        let reader = SchemaReader::new(ContentFormat::Chapters);
        let root = JsonPath::root();

        let chapters = reader.array(raw, &root, "chapters")?;
        let chapters_path = root.key("chapters");

        let mut document = Document::new(ContentFormat::Chapters);
        for (idx, chapter) in chapters.iter().enumerate() {
            let page = self.parse_chapter(&reader.for_page(idx), chapter, &chapters_path.index(idx))?;
            log::debug!("Chapter {}: {} elements", idx + 1, page.elements.len());
            document.add_page(page);
        }

        Ok(document)
    }
}
