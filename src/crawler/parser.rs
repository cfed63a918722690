//! HTML parser for extracting references
//!
//! This module handles parsing fetched pages to extract:
//! - Links to follow (`<a href="...">`)
//! - Images to download (`<img src="...">`)
//!
//! Every reference is resolved against the page's own URL. Filtering by
//! scope happens later in the coordinator; the parser reports everything.

use crate::crawler::fetcher::PageDocument;
use crate::url::resolve_reference;
use scraper::{Html, Selector};
use url::Url;

/// References extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Absolute anchor targets, in document order, duplicates kept
    pub links: Vec<String>,

    /// Absolute image sources, in document order, duplicates kept
    pub images: Vec<Url>,
}

/// Extracts links and images from a fetched page
///
/// Pages that are not HTML produce no references.
pub fn parse_page(doc: &PageDocument) -> ParsedPage {
    if !doc.is_html {
        return ParsedPage::default();
    }
    parse_html(&doc.body, &doc.url)
}

/// Parses HTML content and extracts links and images
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the content was served from
///
/// # Example
///
/// ```
/// use site_harvest::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<a href="/post">Post</a><img src="cat.webp">"#;
/// let page = Url::parse("https://example.com/blog/").unwrap();
/// let parsed = parse_html(html, &page);
/// assert_eq!(parsed.links, vec!["https://example.com/post"]);
/// assert_eq!(parsed.images[0].as_str(), "https://example.com/blog/cat.webp");
/// ```
pub fn parse_html(html: &str, page_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        links: extract_links(&document, page_url),
        images: extract_images(&document, page_url),
    }
}

/// Extracts every `a[href]` target as an absolute URL string
pub fn extract_links(document: &Html, page_url: &Url) -> Vec<String> {
    select_attr(document, "a[href]", "href")
        .into_iter()
        .filter_map(|href| resolve_reference(href, page_url))
        .map(String::from)
        .collect()
}

/// Extracts every `img[src]` source as an absolute URL
pub fn extract_images(document: &Html, page_url: &Url) -> Vec<Url> {
    select_attr(document, "img[src]", "src")
        .into_iter()
        .filter_map(|src| resolve_reference(src, page_url))
        .collect()
}

fn select_attr<'a>(document: &'a Html, selector: &str, attr: &str) -> Vec<&'a str> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .collect()
}
