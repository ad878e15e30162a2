//! Resolution of authored asset paths against local asset directories.

use crate::types::{Document, ImageElement, ImageSource};
use std::path::{Path, PathBuf};

/// Prefix authoring tools put in front of image file names.
const IMAGES_PREFIX: &str = "images/";

/// Prefix authoring tools put in front of audio file names.
const AUDIO_PREFIX: &str = "audios/";

/// Directories the renderer serves book assets from.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    images_dir: PathBuf,
    audio_dir: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("images"),
            audio_dir: PathBuf::from("audios"),
        }
    }
}

impl AssetPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = dir.into();
        self
    }

    pub fn with_audio_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.audio_dir = dir.into();
        self
    }

    /// Local path of an image, or `None` for a placeholder slot.
    pub fn image_path(&self, image: &ImageElement) -> Option<PathBuf> {
        match &image.source {
            ImageSource::Asset(path) => Some(join_asset(&self.images_dir, path, IMAGES_PREFIX)),
            ImageSource::Placeholder => None,
        }
    }

    /// Local path of an audio clip.
    pub fn audio_path(&self, source: &str) -> PathBuf {
        join_asset(&self.audio_dir, source, AUDIO_PREFIX)
    }

    /// Local paths of every real image in the document, in display order.
    pub fn document_images(&self, document: &Document) -> Vec<PathBuf> {
        document
            .real_images()
            .filter_map(|img| self.image_path(img))
            .collect()
    }
}

fn join_asset(dir: &Path, source: &str, prefix: &str) -> PathBuf {
    dir.join(source.strip_prefix(prefix).unwrap_or(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bounds, ContentFormat, Page, VisualElement};

    fn image(source: ImageSource) -> ImageElement {
        ImageElement::new(Bounds::flow(), source)
    }

    #[test]
    fn test_images_prefix_dropped() {
        let assets = AssetPaths::new().with_images_dir("/books/cat/images");
        assert_eq!(
            assets.image_path(&image(ImageSource::asset("images/cat-1234.png"))),
            Some(PathBuf::from("/books/cat/images/cat-1234.png"))
        );
        assert_eq!(
            assets.image_path(&image(ImageSource::asset("cover.jpg"))),
            Some(PathBuf::from("/books/cat/images/cover.jpg"))
        );
    }

    #[test]
    fn test_placeholder_has_no_path() {
        let assets = AssetPaths::new();
        assert_eq!(assets.image_path(&image(ImageSource::Placeholder)), None);
    }

    #[test]
    fn test_audio_path() {
        let assets = AssetPaths::new().with_audio_dir("media");
        assert_eq!(
            assets.audio_path("audios/page1.mp3"),
            PathBuf::from("media/page1.mp3")
        );
    }

    #[test]
    fn test_document_images() {
        let mut page = Page::new("#FCFCF2");
        page.add_element(VisualElement::Image(image(ImageSource::Placeholder)));
        page.add_element(VisualElement::Image(image(ImageSource::asset("images/b.png"))));
        let mut doc = Document::new(ContentFormat::Chapters);
        doc.add_page(page);

        assert_eq!(
            AssetPaths::new().document_images(&doc),
            vec![PathBuf::from("images/b.png")]
        );
    }
}
