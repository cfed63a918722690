//! Shared crawl state
//!
//! The only mutable state shared between concurrent tasks lives here. Both
//! components are owned values handed to the traversal engine and the image
//! pipeline behind an `Arc`; neither is a global.
//!
//! # Components
//!
//! - `VisitedSet`: URLs already admitted for fetching, with an atomic test-and-insert
//! - `ImageCounter`: monotonically increasing counter used to name image files

mod counter;
mod visited;

// Re-export main types
pub use counter::ImageCounter;
pub use visited::VisitedSet;
