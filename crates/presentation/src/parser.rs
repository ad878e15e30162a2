//! Slide export normalizer implementation.

use crate::schema::{ActionHeader, BackgroundSelector, Geometry, ImageParams, TextParams};
use book_core::{
    Bounds, ContentFormat, Document, ElementKind, FormatNormalizer, ImageElement, ImageSource,
    JsonPath, Page, Result, SchemaReader, StructuralError, TextElement, VisualElement,
};
use serde_json::Value;

/// Normalizer for slide-based content (`presentation.slides`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentationNormalizer;

impl PresentationNormalizer {
    /// Create a new slide normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Read the one background color shared by every slide.
    fn read_background(
        &self,
        reader: &SchemaReader,
        presentation: &Value,
        path: &JsonPath,
    ) -> std::result::Result<String, StructuralError> {
        let selector = reader.field(presentation, path, "globalBackgroundSelector")?;
        let selector: BackgroundSelector =
            reader.record(selector, &path.key("globalBackgroundSelector"))?;
        Ok(selector.fill_global_background)
    }

    /// Parse a single slide into a page.
    fn parse_slide(
        &self,
        reader: &SchemaReader,
        slide: &Value,
        path: &JsonPath,
        background: &str,
    ) -> std::result::Result<Page, StructuralError> {
        let mut page = Page::new(background);
        let elements = reader.array(slide, path, "elements")?;
        let elements_path = path.key("elements");

        for (idx, element) in elements.iter().enumerate() {
            if let Some(visual) = self.parse_element(reader, element, &elements_path.index(idx))? {
                page.add_element(visual);
            }
        }

        Ok(page)
    }

    /// Parse one slide element. Unsupported libraries yield `None`.
    fn parse_element(
        &self,
        reader: &SchemaReader,
        element: &Value,
        path: &JsonPath,
    ) -> std::result::Result<Option<VisualElement>, StructuralError> {
        let action = reader.field(element, path, "action")?;
        let action_path = path.key("action");
        let header: ActionHeader = reader.record(action, &action_path)?;

        match ElementKind::from_library(&header.library) {
            ElementKind::Text => {
                let bounds = self.read_bounds(reader, element, path)?;
                let params_path = action_path.key("params");
                let params: TextParams =
                    reader.record(reader.field(action, &action_path, "params")?, &params_path)?;
                Ok(Some(VisualElement::Text(TextElement::new(bounds, params.text))))
            }
            ElementKind::Image => {
                let bounds = self.read_bounds(reader, element, path)?;
                let params_path = action_path.key("params");
                let params: ImageParams =
                    reader.record(reader.field(action, &action_path, "params")?, &params_path)?;
                let source = match params.file {
                    Some(file) => ImageSource::from_path(file.path),
                    None => ImageSource::Placeholder,
                };
                Ok(Some(VisualElement::Image(ImageElement::new(bounds, source))))
            }
            ElementKind::Unsupported => {
                log::debug!("Skipping element at {} ({})", path, header.library);
                Ok(None)
            }
        }
    }

    fn read_bounds(
        &self,
        reader: &SchemaReader,
        element: &Value,
        path: &JsonPath,
    ) -> std::result::Result<Bounds, StructuralError> {
        let geometry: Geometry = reader.record(element, path)?;
        Ok(Bounds::absolute(
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
        ))
    }
}

impl FormatNormalizer for PresentationNormalizer {
    fn format(&self) -> ContentFormat {
        ContentFormat::Presentation
    }

    fn normalize(&self, raw: &Value) -> Result<Document> {
        let reader = SchemaReader::new(ContentFormat::Presentation);
        let root = JsonPath::root();

        let presentation = reader.field(raw, &root, "presentation")?;
        let path = root.key("presentation");
        let slides = reader.array(presentation, &path, "slides")?;
        let background = self.read_background(&reader, presentation, &path)?;

        let mut document = Document::new(ContentFormat::Presentation);
        let slides_path = path.key("slides");
        for (idx, slide) in slides.iter().enumerate() {
            let page = self.parse_slide(
                &reader.for_page(idx),
                slide,
                &slides_path.index(idx),
                &background,
            )?;
            log::debug!("Slide {}: {} elements", idx + 1, page.elements.len());
            document.add_page(page);
        }

        Ok(document)
    }
}
