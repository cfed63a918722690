//! Image acquisition pipeline
//!
//! This module handles everything that happens to an image URL once the
//! traversal engine has found it:
//! - Downloading the payload
//! - Choosing passthrough or WEBP → PNG conversion from the URL extension
//! - Naming the output file from the shared counter and writing it
//! - Running each image as an independent task and reporting the outcome

mod acquire;
mod format;
mod pipeline;

pub use acquire::{acquire, AcquiredImage};
pub use format::ImageFormatKind;
pub use pipeline::ImagePipeline;
