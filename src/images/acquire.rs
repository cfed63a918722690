//! Single image acquisition
//!
//! Downloads one image and writes exactly one file, or fails and leaves
//! nothing behind.

use crate::images::format::{webp_to_png, ImageFormatKind};
use crate::state::ImageCounter;
use crate::url::path_extension;
use crate::ImageError;
use reqwest::{Client, Response};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use url::Url;

/// A file written by `acquire`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredImage {
    /// Where the file was written
    pub path: PathBuf,

    /// How the payload was handled
    pub format: ImageFormatKind,
}

/// Downloads `url` into `dir`
///
/// # Flow
///
/// 1. GET the image. The response status is not inspected: whatever body the
///    server returns is stored.
/// 2. Create `dir` and any missing parents.
/// 3. Take the extension from the URL path and allocate the next counter
///    value, giving `image-<n><ext>`.
/// 4. `.webp` → decode, re-encode as PNG, write `image-<n>.webp.png`.
///    Anything else → stream the body verbatim into `image-<n><ext>`.
/// 5. On any failure after the name is taken, remove the partial file.
///
/// There are no retries.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `counter` - Shared counter used to name the output file
/// * `url` - The image URL
/// * `dir` - The output directory
///
/// # Returns
///
/// * `Ok(AcquiredImage)` - The file that was written
/// * `Err(ImageError)` - Download, storage, decode, or encode failure
pub async fn acquire(
    client: &Client,
    counter: &ImageCounter,
    url: &Url,
    dir: &Path,
) -> Result<AcquiredImage, ImageError> {
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|source| download_error(url, source))?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ImageError::Storage {
            path: dir.to_path_buf(),
            source,
        })?;

    let extension = path_extension(url);
    let format = ImageFormatKind::from_extension(extension);
    let file_name = format!(
        "image-{}{}{}",
        counter.next(),
        extension,
        format.output_suffix()
    );
    let path = dir.join(file_name);

    let written = match format {
        ImageFormatKind::Passthrough => stream_to_file(url, response, &path).await,
        ImageFormatKind::Webp => convert_to_file(url, response, &path).await,
    };

    if let Err(e) = written {
        discard_partial(&path).await;
        return Err(e);
    }

    Ok(AcquiredImage { path, format })
}

/// Copies a response body into a new file chunk by chunk
async fn stream_to_file(url: &Url, mut response: Response, path: &Path) -> Result<(), ImageError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|source| storage_error(path, source))?;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|source| download_error(url, source))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|source| storage_error(path, source))?;
    }

    file.flush()
        .await
        .map_err(|source| storage_error(path, source))?;

    Ok(())
}

/// Buffers a WEBP body and writes it out as PNG
async fn convert_to_file(url: &Url, response: Response, path: &Path) -> Result<(), ImageError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|source| download_error(url, source))?;
    let png = webp_to_png(url.as_str(), &bytes)?;

    tokio::fs::write(path, png)
        .await
        .map_err(|source| storage_error(path, source))
}

/// Removes whatever a failed write left at `path`
async fn discard_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!("Removed partial file {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove partial file {}: {}", path.display(), e),
    }
}

fn download_error(url: &Url, source: reqwest::Error) -> ImageError {
    ImageError::Download {
        url: url.to_string(),
        source,
    }
}

fn storage_error(path: &Path, source: std::io::Error) -> ImageError {
    ImageError::Storage {
        path: path.to_path_buf(),
        source,
    }
}
