//! Domain types for representing normalized book content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved image source marking an empty placeholder slot.
///
/// Slide exports keep image elements whose file was never chosen; those
/// carry this value instead of a path and must never be loaded as an asset.
pub const EMPTY_IMAGE_SENTINEL: &str = "empty_glow_image";

/// Background color applied to every page of chapter-based content.
pub const CHAPTER_BACKGROUND: &str = "#FCFCF2";

/// A whole book, normalized into pages of visual elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Detected schema of the source content.
    pub format: ContentFormat,

    /// Pages in display order.
    pub pages: Vec<Page>,
}

impl Document {
    /// Create an empty document for the given format.
    pub fn new(format: ContentFormat) -> Self {
        Self {
            format,
            pages: Vec::new(),
        }
    }

    /// Document produced for content whose schema was not recognized.
    pub fn unsupported() -> Self {
        Self::new(ContentFormat::Unknown)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether the content was in a schema this crate can normalize.
    pub fn is_supported(&self) -> bool {
        self.format != ContentFormat::Unknown
    }

    /// All image elements that point at a real asset, across all pages.
    ///
    /// Placeholder slots are skipped.
    pub fn real_images(&self) -> impl Iterator<Item = &ImageElement> {
        self.pages
            .iter()
            .flat_map(|p| p.images())
            .filter(|img| img.source.is_asset())
    }
}

/// The authoring-tool schema a raw content document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// Slide export: `presentation.slides[*].elements[*]` with absolute geometry.
    Presentation,
    /// Chapter export: `chapters[*].params.content[*].content`, flow layout.
    Chapters,
    /// Neither known schema.
    Unknown,
}

impl ContentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Presentation => "presentation",
            Self::Chapters => "chapters",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One screen of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Visual elements in display order.
    pub elements: Vec<VisualElement>,

    /// Background color, as authored (hex-like string, not validated).
    pub background_color: String,
}

impl Page {
    /// Create an empty page with the given background color.
    pub fn new(background_color: impl Into<String>) -> Self {
        Self {
            elements: Vec::new(),
            background_color: background_color.into(),
        }
    }

    /// Add an element to the end of this page.
    pub fn add_element(&mut self, element: VisualElement) {
        self.elements.push(element);
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextElement> {
        self.elements.iter().filter_map(|e| match e {
            VisualElement::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageElement> {
        self.elements.iter().filter_map(|e| match e {
            VisualElement::Image(image) => Some(image),
            _ => None,
        })
    }
}

/// A positioned content unit on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VisualElement {
    Text(TextElement),
    Image(ImageElement),
    /// Reserved: no content format currently produces audio elements.
    Audio(AudioElement),
}

impl VisualElement {
    /// Geometry of the element, whatever its kind.
    pub fn bounds(&self) -> &Bounds {
        match self {
            Self::Text(e) => &e.bounds,
            Self::Image(e) => &e.bounds,
            Self::Audio(e) => &e.bounds,
        }
    }

    /// Short lowercase name of the element kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Audio(_) => "audio",
        }
    }
}

/// HTML-bearing text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    #[serde(flatten)]
    pub bounds: Bounds,

    /// Inline markup exactly as authored; sanitizing is up to the renderer.
    pub html: String,
}

impl TextElement {
    pub fn new(bounds: Bounds, html: impl Into<String>) -> Self {
        Self {
            bounds,
            html: html.into(),
        }
    }
}

/// Image slot, either pointing at an asset or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    #[serde(flatten)]
    pub bounds: Bounds,

    pub source: ImageSource,
}

impl ImageElement {
    pub fn new(bounds: Bounds, source: ImageSource) -> Self {
        Self { bounds, source }
    }
}

/// Where an image's pixels come from.
///
/// Serialized as a plain string; the placeholder uses [`EMPTY_IMAGE_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageSource {
    /// Path of the image asset as authored (e.g. `images/cat.png`).
    Asset(String),
    /// Empty slot with no image chosen.
    Placeholder,
}

impl ImageSource {
    pub fn asset(path: impl Into<String>) -> Self {
        Self::Asset(path.into())
    }

    /// Source for an authored file path.
    ///
    /// A path equal to [`EMPTY_IMAGE_SENTINEL`] is a placeholder, so the
    /// source reads back the same after serialization.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        if path == EMPTY_IMAGE_SENTINEL {
            Self::Placeholder
        } else {
            Self::Asset(path)
        }
    }

    pub fn is_asset(&self) -> bool {
        matches!(self, Self::Asset(_))
    }

    /// The asset path, or `None` for a placeholder.
    pub fn asset_path(&self) -> Option<&str> {
        match self {
            Self::Asset(path) => Some(path),
            Self::Placeholder => None,
        }
    }

    /// The source as a string, placeholders rendering as the sentinel.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Asset(path) => path,
            Self::Placeholder => EMPTY_IMAGE_SENTINEL,
        }
    }
}

impl From<String> for ImageSource {
    fn from(value: String) -> Self {
        Self::from_path(value)
    }
}

impl From<ImageSource> for String {
    fn from(value: ImageSource) -> Self {
        match value {
            ImageSource::Asset(path) => path,
            ImageSource::Placeholder => EMPTY_IMAGE_SENTINEL.to_string(),
        }
    }
}

/// Narrated audio clip with per-word timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioElement {
    #[serde(flatten)]
    pub bounds: Bounds,

    /// Path of the audio asset.
    pub source: String,

    /// Words in playback order.
    pub words: Vec<WordTimestamp>,
}

/// One narrated word and the clip that speaks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTimestamp {
    pub word: String,

    /// Start of the word, in seconds.
    pub start: f64,

    /// End of the word, in seconds.
    pub end: f64,

    /// Audio clip for this single word.
    pub audio_source: String,
}

/// Position and size of an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: Measure,
    pub y: Measure,
    pub width: Measure,
    pub height: Measure,
}

impl Bounds {
    /// Absolutely positioned element, all values in percent of the page.
    pub fn absolute(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Measure::Fixed(x),
            y: Measure::Fixed(y),
            width: Measure::Fixed(width),
            height: Measure::Fixed(height),
        }
    }

    /// Element placed by the renderer's flow layout, with a known size.
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width: Measure::Fixed(width),
            height: Measure::Fixed(height),
            ..Self::flow()
        }
    }

    /// Element with no geometry at all.
    pub fn flow() -> Self {
        Self {
            x: Measure::Flow,
            y: Measure::Flow,
            width: Measure::Flow,
            height: Measure::Flow,
        }
    }

    /// Whether the element has an explicit position on the page.
    pub fn is_positioned(&self) -> bool {
        self.x.is_fixed() && self.y.is_fixed()
    }
}

/// A single coordinate or dimension.
///
/// `Flow` serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Fixed(f64),
    /// Not applicable: the renderer decides.
    Flow,
}

impl Measure {
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Fixed(v) => Some(*v),
            Self::Flow => None,
        }
    }
}

impl From<Option<f64>> for Measure {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Flow, Self::Fixed)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => write!(f, "{}", v),
            Self::Flow => f.write_str("auto"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_page() -> Page {
        let mut page = Page::new("#112233");
        page.add_element(VisualElement::Text(TextElement::new(
            Bounds::absolute(10.0, 20.0, 30.0, 40.0),
            "<b>Hi</b>",
        )));
        page.add_element(VisualElement::Image(ImageElement::new(
            Bounds::absolute(0.0, 0.0, 50.0, 50.0),
            ImageSource::Placeholder,
        )));
        page.add_element(VisualElement::Image(ImageElement::new(
            Bounds::absolute(50.0, 0.0, 50.0, 50.0),
            ImageSource::asset("images/a.png"),
        )));
        page
    }

    #[test]
    fn test_real_images_skip_placeholders() {
        let mut doc = Document::new(ContentFormat::Presentation);
        doc.add_page(sample_page());

        let real: Vec<&str> = doc
            .real_images()
            .filter_map(|img| img.source.asset_path())
            .collect();
        assert_eq!(real, vec!["images/a.png"]);
        assert_eq!(doc.pages[0].images().count(), 2);
    }

    #[test]
    fn test_placeholder_serializes_as_sentinel() {
        let value = serde_json::to_value(ImageSource::Placeholder).unwrap();
        assert_eq!(value, json!(EMPTY_IMAGE_SENTINEL));

        let back: ImageSource = serde_json::from_value(json!("empty_glow_image")).unwrap();
        assert_eq!(back, ImageSource::Placeholder);
    }

    #[test]
    fn test_sentinel_path_is_placeholder() {
        assert_eq!(ImageSource::from_path("empty_glow_image"), ImageSource::Placeholder);
        assert_eq!(
            ImageSource::from_path("images/empty_glow_image.png"),
            ImageSource::asset("images/empty_glow_image.png")
        );

        let mut page = Page::new("#FFFFFF");
        page.add_element(VisualElement::Image(ImageElement::new(
            Bounds::flow(),
            ImageSource::from_path(EMPTY_IMAGE_SENTINEL),
        )));
        let mut doc = Document::new(ContentFormat::Chapters);
        doc.add_page(page);

        let back: Document = serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
        assert_eq!(back, doc);
        assert_eq!(back.real_images().count(), doc.real_images().count());
    }

    #[test]
    fn test_element_json_shape() {
        let element = VisualElement::Text(TextElement::new(Bounds::flow(), "<p>x</p>"));
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "text",
                "x": null,
                "y": null,
                "width": null,
                "height": null,
                "html": "<p>x</p>"
            })
        );
    }

    #[test]
    fn test_document_json_round_trip() {
        let mut doc = Document::new(ContentFormat::Presentation);
        doc.add_page(sample_page());

        let text = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&text).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_sized_bounds_have_no_position() {
        let bounds = Bounds::sized(640.0, 480.0);
        assert!(!bounds.is_positioned());
        assert_eq!(bounds.width.value(), Some(640.0));
        assert_eq!(bounds.x, Measure::Flow);
        assert_eq!(Measure::Flow.to_string(), "auto");
    }

    #[test]
    fn test_unsupported_document() {
        let doc = Document::unsupported();
        assert!(doc.is_empty());
        assert!(!doc.is_supported());
        assert_eq!(doc.format.to_string(), "unknown");
    }
}
