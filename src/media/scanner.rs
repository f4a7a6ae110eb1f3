use std::path::Path;
use walkdir::WalkDir;

use super::filter::is_displayable_image;
use crate::state::data::ImageFileRef;

/// Lists the displayable images directly inside a folder
pub trait DirectoryScanner: Send + Sync + 'static {
    fn scan(&self, dir: &Path) -> Vec<ImageFileRef>;
}

/// Scanner backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsScanner;

impl DirectoryScanner for FsScanner {
    fn scan(&self, dir: &Path) -> Vec<ImageFileRef> {
        scan_directory(dir)
    }
}

/// List the images directly inside `dir`, in the order the OS returns them.
///
/// Subfolders are not entered. A missing or unreadable folder gives an
/// empty list.
pub fn scan_directory(dir: &Path) -> Vec<ImageFileRef> {
    let listing = list_images(dir);

    if listing.missing {
        tracing::info!(dir = %dir.display(), "folder missing or unreadable, nothing to show");
    } else {
        tracing::info!(
            dir = %dir.display(),
            found = listing.images.len(),
            unreadable = listing.unreadable,
            "scanned folder"
        );
    }
    listing.images
}

/// Outcome of one folder walk
#[derive(Debug, Default)]
struct Listing {
    images: Vec<ImageFileRef>,
    /// Entries inside the folder that could not be read
    unreadable: usize,
    /// The folder itself could not be opened
    missing: bool,
}

fn list_images(dir: &Path) -> Listing {
    let mut listing = Listing::default();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                listing.missing = true;
                tracing::debug!(dir = %dir.display(), error = %err, "cannot open folder");
                break;
            }
            Err(err) => {
                listing.unreadable += 1;
                tracing::debug!(dir = %dir.display(), error = %err, "skipping entry");
                continue;
            }
        };

        if is_displayable_image(entry.path()) {
            listing.images.push(ImageFileRef::new(entry.into_path()));
        }
    }

    listing
}
