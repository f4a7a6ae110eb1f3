/// Media discovery and decoding
///
/// This module handles:
/// - Deciding which files are displayable images (filter.rs)
/// - Listing the images in a folder (scanner.rs)
/// - Decoding square, center-cropped thumbnails off the UI thread (thumbnail.rs)

pub mod filter;
pub mod scanner;
pub mod thumbnail;
