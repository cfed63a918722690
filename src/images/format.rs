//! Format handling for downloaded images
//!
//! Storage format is decided by the URL's path extension alone. Only WEBP is
//! transcoded; every other payload is stored exactly as received.

use crate::ImageError;
use image::ImageFormat;
use std::io::Cursor;

/// How a downloaded image is turned into file contents
///
/// Passthrough payloads are streamed to disk as they arrive. WEBP payloads
/// are buffered whole and converted to PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormatKind {
    /// Bytes are written verbatim
    Passthrough,

    /// WEBP input, decoded and re-encoded as PNG
    Webp,
}

impl ImageFormatKind {
    /// Looks up the handling for a path extension such as `.webp`
    ///
    /// The match is exact: `.WEBP` or `.webp2` are passed through.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            ".webp" => Self::Webp,
            _ => Self::Passthrough,
        }
    }

    /// Suffix appended to `image-<n><ext>` to form the output file name
    ///
    /// Converted images keep their original extension in front of the new
    /// one, so `a.webp` is stored as `image-<n>.webp.png`.
    pub fn output_suffix(self) -> &'static str {
        match self {
            Self::Passthrough => "",
            Self::Webp => ".png",
        }
    }

    /// Returns true if this format re-encodes its input
    pub fn transcodes(self) -> bool {
        matches!(self, Self::Webp)
    }
}

/// Decodes a WEBP payload and re-encodes the raster as PNG
///
/// `source_url` only appears in the decode error.
pub(crate) fn webp_to_png(source_url: &str, bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    let raster = image::load_from_memory_with_format(bytes, ImageFormat::WebP).map_err(|source| {
        ImageError::Decode {
            url: source_url.to_string(),
            source,
        }
    })?;

    let mut png = Cursor::new(Vec::new());
    raster
        .write_to(&mut png, ImageFormat::Png)
        .map_err(ImageError::Encode)?;

    Ok(png.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

    fn sample_webp(width: u32, height: u32) -> Vec<u8> {
        let raster = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7) as u8, (y * 13) as u8, 0x80, 0xff])
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(raster)
            .write_to(&mut out, ImageFormat::WebP)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ImageFormatKind::from_extension(".webp"), ImageFormatKind::Webp);
        assert_eq!(ImageFormatKind::from_extension(".jpg"), ImageFormatKind::Passthrough);
        assert_eq!(ImageFormatKind::from_extension(""), ImageFormatKind::Passthrough);
        assert_eq!(ImageFormatKind::from_extension(".WEBP"), ImageFormatKind::Passthrough);
    }

    #[test]
    fn test_output_suffix() {
        assert_eq!(ImageFormatKind::Webp.output_suffix(), ".png");
        assert_eq!(ImageFormatKind::Passthrough.output_suffix(), "");
        assert!(ImageFormatKind::Webp.transcodes());
        assert!(!ImageFormatKind::Passthrough.transcodes());
    }

    #[test]
    fn test_webp_becomes_png_with_same_dimensions() {
        let webp = sample_webp(17, 9);
        let rendered = webp_to_png("https://example.com/a.webp", &webp).unwrap();

        assert_eq!(image::guess_format(&rendered).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory_with_format(&rendered, ImageFormat::Png).unwrap();
        assert_eq!(decoded.dimensions(), (17, 9));
    }

    #[test]
    fn test_malformed_webp_is_decode_error() {
        let result = webp_to_png("https://example.com/a.webp", b"garbage");
        assert!(matches!(result, Err(ImageError::Decode { .. })));
    }
}
