//! CLI tool for inspecting and normalizing digital-book content documents.

use anyhow::{Context, Result};
use book_core::{AssetPaths, Document, DocumentSource, HtmlText, VisualElement};
use book_reader::{ContentParser, FileSource, HttpSource};
use clap::{Parser, ValueEnum};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Normalize book content exports (slide or chapter based) into pages of
/// text and image elements.
#[derive(Parser, Debug)]
#[command(name = "book-parse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input content document(s): local content.json paths or http(s) URLs
    #[arg(required = true)]
    input: Vec<String>,

    /// What to produce for each input
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Directory image assets are served from, for `assets` output
    #[arg(long, default_value = "images")]
    images_dir: PathBuf,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Page and element counts
    Summary,
    /// The normalized document as JSON
    Json,
    /// Plain text of every text element, page by page
    Text,
    /// Local paths of every real image asset
    Assets,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            Self::Summary => "summary.txt",
            Self::Json => "normalized.json",
            Self::Text => "txt",
            Self::Assets => "assets.txt",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let parser = ContentParser::new();
    let mut failures = 0usize;

    for input in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input);
        }

        match process_input(input, &args, &parser).await {
            Ok(output) => {
                if args.print {
                    print!("{}", output);
                } else {
                    let output_path = get_output_path(input, args.format, args.output.as_ref())?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("Error processing {}: {:#}", input, e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} inputs failed", failures, args.input.len());
    }

    Ok(())
}

/// Open the right document source for an input argument.
fn open_source(input: &str) -> Box<dyn DocumentSource> {
    if HttpSource::accepts(input) {
        log::debug!("Fetching over HTTP");
        Box::new(HttpSource::new(input))
    } else {
        Box::new(FileSource::new(input))
    }
}

/// Process a single content document.
async fn process_input(input: &str, args: &Args, parser: &ContentParser) -> Result<String> {
    let source = open_source(input);
    let document = parser
        .parse(source.as_ref())
        .await
        .with_context(|| format!("Failed to parse {}", source.location()))?;

    if args.verbose {
        eprintln!(
            "  Detected {} content with {} pages",
            document.format,
            document.page_count()
        );
    }

    if !document.is_supported() {
        eprintln!("Unsupported content in {}: no known book format", input);
    }

    let output = match args.format {
        OutputFormat::Summary => format_summary(&document),
        OutputFormat::Json => format_json(&document, args.pretty)?,
        OutputFormat::Text => format_text(&document),
        OutputFormat::Assets => {
            let assets = AssetPaths::new().with_images_dir(&args.images_dir);
            format_assets(&document, &assets)
        }
    };

    Ok(output)
}

fn format_summary(document: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Format: {}", document.format);
    let _ = writeln!(out, "Pages: {}", document.page_count());

    for (idx, page) in document.pages.iter().enumerate() {
        let texts = page.texts().count();
        let images = page.images().count();
        let placeholders = page.images().filter(|img| !img.source.is_asset()).count();
        let _ = write!(
            out,
            "  Page {} [{}]: {} text, {} image",
            idx + 1,
            page.background_color,
            texts,
            images
        );
        if placeholders > 0 {
            let _ = write!(out, " ({} empty)", placeholders);
        }
        out.push('\n');
    }

    out
}

fn format_json(document: &Document, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    }
    .context("Failed to serialize document")?;
    json.push('\n');
    Ok(json)
}

fn format_text(document: &Document) -> String {
    let pages = HtmlText::new().document_lines(document);
    let slides: Vec<String> = pages
        .iter()
        .filter(|lines| !lines.is_empty())
        .map(|lines| lines.join("\n"))
        .collect();

    if slides.is_empty() {
        return String::new();
    }

    let mut text = slides.join("\n\n");
    text.push('\n');
    text
}

fn format_assets(document: &Document, assets: &AssetPaths) -> String {
    let mut out = String::new();
    for (idx, page) in document.pages.iter().enumerate() {
        for element in &page.elements {
            if let VisualElement::Image(image) = element {
                if let Some(path) = assets.image_path(image) {
                    let _ = writeln!(out, "{}\t{}", idx + 1, path.display());
                }
            }
        }
    }
    out
}

/// Determine the output path for a processed input.
fn get_output_path(
    input: &str,
    format: OutputFormat,
    output_dir: Option<&PathBuf>,
) -> Result<PathBuf> {
    // URLs are written to the working directory under their last segment
    let name = if HttpSource::accepts(input) {
        input.rsplit('/').next().unwrap_or(input)
    } else {
        input
    };
    let input_path = Path::new(name);
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("content");

    let output_filename = format!("{}.{}", stem, format.extension());

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use book_core::{Bounds, ContentFormat, ImageElement, ImageSource, Page, TextElement};

    fn sample() -> Document {
        let mut page = Page::new("#112233");
        page.add_element(VisualElement::Text(TextElement::new(
            Bounds::absolute(10.0, 20.0, 30.0, 40.0),
            "<p>Hello</p><p>world</p>",
        )));
        page.add_element(VisualElement::Image(ImageElement::new(
            Bounds::absolute(0.0, 0.0, 100.0, 100.0),
            ImageSource::asset("images/a.png"),
        )));
        page.add_element(VisualElement::Image(ImageElement::new(
            Bounds::absolute(0.0, 0.0, 10.0, 10.0),
            ImageSource::Placeholder,
        )));
        let mut doc = Document::new(ContentFormat::Presentation);
        doc.add_page(page);
        doc.add_page(Page::new("#112233"));
        doc
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            format_summary(&sample()),
            "Format: presentation\nPages: 2\n  Page 1 [#112233]: 1 text, 2 image (1 empty)\n  Page 2 [#112233]: 0 text, 0 image\n"
        );
    }

    #[test]
    fn test_text_output() {
        assert_eq!(format_text(&sample()), "Hello\nworld\n");
        assert_eq!(format_text(&Document::unsupported()), "");
    }

    #[test]
    fn test_assets_skip_placeholders() {
        let assets = AssetPaths::new().with_images_dir("/srv/book/images");
        assert_eq!(
            format_assets(&sample(), &assets),
            "1\t/srv/book/images/a.png\n"
        );
    }

    #[test]
    fn test_json_output_is_parseable() {
        let json = format_json(&sample(), false).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_output_paths() {
        assert_eq!(
            get_output_path("books/cat/content.json", OutputFormat::Json, None).unwrap(),
            PathBuf::from("books/cat/content.normalized.json")
        );
        assert_eq!(
            get_output_path("https://example.org/cat/content.json", OutputFormat::Text, None)
                .unwrap(),
            PathBuf::from("content.txt")
        );
    }
}
