use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task;

use crate::error::LoadError;

/// Decoded square thumbnail, ready to hand to the renderer
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, row major
    pub pixels: Vec<u8>,
}

/// Decode `path` and center-crop it to a `size`x`size` square.
///
/// Decoding is CPU bound, so it runs on the blocking pool. A permit from
/// `permits` is held for the whole decode; callers waiting for one stay
/// cheap futures until a slot frees up.
pub async fn load_thumbnail(
    path: PathBuf,
    size: u32,
    permits: Arc<Semaphore>,
) -> Result<Thumbnail, LoadError> {
    let permit = permits
        .acquire_owned()
        .await
        .map_err(|e| LoadError::Join(e.to_string()))?;

    task::spawn_blocking(move || {
        let _permit = permit;
        load_thumbnail_blocking(&path, size)
    })
    .await
    .map_err(|e| LoadError::Join(e.to_string()))?
}

/// Blocking implementation of thumbnail loading
fn load_thumbnail_blocking(path: &Path, size: u32) -> Result<Thumbnail, LoadError> {
    // Sniff the format from the header; the extension is only a fallback
    let img = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| LoadError::io(path, e))?
        .decode()
        .map_err(|e| LoadError::from_image(path, e))?;

    let square = center_crop_square(&img);
    let thumbnail = square.resize_exact(size, size, FilterType::Triangle);
    let rgba = thumbnail.to_rgba8();

    tracing::debug!(path = %path.display(), size, "decoded thumbnail");

    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Cut the largest centered square out of `img`
pub fn center_crop_square(img: &DynamicImage) -> DynamicImage {
    let (width, height) = img.dimensions();
    let side = width.min(height);
    let x = (width - side) / 2;
    let y = (height - side) / 2;
    img.crop_imm(x, y, side, side)
}
