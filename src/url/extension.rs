//! File extensions of image URLs

use url::Url;

/// Returns the file extension of the last path segment of `url`, including
/// the leading dot
///
/// The extension runs from the last `.` of the final segment to its end, so
/// `photo.tar.webp` yields `.webp` and `photo` yields an empty string. The
/// query string and fragment never contribute. Response headers are not
/// consulted; the URL alone decides how an image is stored.
pub fn path_extension(url: &Url) -> &str {
    let path = url.path();
    let file_name = path.rsplit('/').next().unwrap_or(path);

    match file_name.rfind('.') {
        Some(idx) => &file_name[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(raw: &str) -> String {
        path_extension(&Url::parse(raw).unwrap()).to_string()
    }

    #[test]
    fn test_simple_extension() {
        assert_eq!(ext("https://example.com/img/cat.jpg"), ".jpg");
        assert_eq!(ext("https://example.com/img/cat.webp"), ".webp");
    }

    #[test]
    fn test_last_dot_wins() {
        assert_eq!(ext("https://example.com/archive.tar.webp"), ".webp");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(ext("https://example.com/img/cat"), "");
        assert_eq!(ext("https://example.com/"), "");
    }

    #[test]
    fn test_dot_in_directory_is_ignored() {
        assert_eq!(ext("https://example.com/v1.2/cat"), "");
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        assert_eq!(ext("https://example.com/cat.webp?w=200#x"), ".webp");
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(ext("https://example.com/CAT.WEBP"), ".WEBP");
    }
}
