//! Visible-text extraction from HTML pages
//!
//! A page is parsed once and yields three things:
//! - the page title (used to label chunks)
//! - the visible text, with non-content regions removed
//! - every `<a href>` target, unresolved
//!
//! Text is flattened the way a browser's "select all, copy" roughly would:
//! each text node is trimmed, blank ones are dropped, and the rest are joined
//! with newlines so block boundaries survive as line breaks.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Elements whose whole subtree is dropped before flattening
pub const STRIPPED_ELEMENTS: [&str; 5] = ["script", "style", "nav", "footer", "header"];

/// Cleaned text at or below this many characters is treated as empty
pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 100;

/// Title used when a page has no usable `<title>`
pub const UNTITLED: &str = "No Title";

/// Errors that can occur while extracting a page
///
/// html5ever recovers from any malformed markup, so parsing itself never
/// fails; the only failure is a CSS selector that does not compile. The
/// crawl loop still treats an extraction error as a skipped page.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Everything the crawler needs from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Page title, or `"No Title"`
    pub title: String,

    /// Cleaned visible text; None when the page is too short to be useful
    pub text: Option<String>,

    /// Raw `href` values of all anchors, in document order
    pub hrefs: Vec<String>,
}

/// Converts raw markup into cleaned text
#[derive(Debug, Clone)]
pub struct Extractor {
    min_content_length: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONTENT_LENGTH)
    }
}

impl Extractor {
    /// Creates an extractor that rejects text of `min_content_length` characters or fewer
    pub fn new(min_content_length: usize) -> Self {
        Self { min_content_length }
    }

    /// Parses `html` and extracts title, text and links
    ///
    /// # Example
    ///
    /// ```
    /// use chunk_crawler::crawler::Extractor;
    ///
    /// let html = r#"<html><head><title>Docs</title></head>
    ///     <body><nav>Menu</nav><p>Hello there.</p><a href="/next">Next</a></body></html>"#;
    /// let page = Extractor::new(5).extract(html).unwrap();
    ///
    /// assert_eq!(page.title, "Docs");
    /// assert_eq!(page.text.as_deref(), Some("Docs\nHello there.\nNext"));
    /// assert_eq!(page.hrefs, vec!["/next".to_string()]);
    /// ```
    pub fn extract(&self, html: &str) -> Result<ExtractedPage, ExtractError> {
        let document = Html::parse_document(html);

        let title = extract_title(&document)?;
        let hrefs = extract_hrefs(&document)?;

        let text = clean_text(&document);
        let text = if text.chars().count() > self.min_content_length {
            Some(text)
        } else {
            None
        };

        Ok(ExtractedPage { title, text, hrefs })
    }
}

/// Flattens the document to visible text, skipping stripped elements
pub fn clean_text(document: &Html) -> String {
    let mut lines = Vec::new();
    collect_text(document.root_element(), &mut lines);
    lines.join("\n")
}

fn collect_text(element: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !STRIPPED_ELEMENTS.contains(&child_element.value().name()) {
                collect_text(child_element, lines);
            }
        }
    }
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Result<String, ExtractError> {
    let title_selector = selector("title")?;

    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    Ok(title)
}

/// Collects the raw href of every anchor
fn extract_hrefs(document: &Html) -> Result<Vec<String>, ExtractError> {
    let a_selector = selector("a[href]")?;

    Ok(document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect())
}
