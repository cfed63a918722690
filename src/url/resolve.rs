//! Resolution of `href`/`src` references to absolute URLs

use url::Url;

/// Resolves an `href`/`src` attribute value against the URL of the page it
/// was found on
///
/// Relative (`post`, `../post`, `/post`), protocol-relative (`//host/post`)
/// and absolute references all resolve. The fragment is dropped so that
/// `/post#top` and `/post` name the same page.
///
/// Returns None if the reference should be ignored:
/// - empty or fragment-only references
/// - references that do not parse
/// - anything that resolves to a scheme other than http or https
///   (`mailto:`, `javascript:`, `data:` ...)
///
/// # Example
///
/// ```
/// use site_harvest::url::resolve_reference;
/// use url::Url;
///
/// let page = Url::parse("https://example.com/blog/post1").unwrap();
/// let resolved = resolve_reference("../img/a.png", &page).unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/img/a.png");
/// ```
pub fn resolve_reference(reference: &str, page_url: &Url) -> Option<Url> {
    let reference = reference.trim();

    if reference.is_empty() || reference.starts_with('#') {
        return None;
    }

    let mut absolute = page_url.join(reference).ok()?;

    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    absolute.set_fragment(None);
    Some(absolute)
}
