/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the directory scanner and the UI layer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Represents a single displayable image on disk
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageFileRef {
    /// Full path to the image file
    path: PathBuf,
    /// Filename only (e.g., "IMG_0001.jpg")
    name: String,
}

impl ImageFileRef {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The two fixed source folders, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Downloads,
    Pictures,
}

impl SectionKind {
    pub const ALL: [SectionKind; 2] = [SectionKind::Downloads, SectionKind::Pictures];

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Downloads => "Downloads",
            SectionKind::Pictures => "Pictures",
        }
    }
}

/// A labeled group of images from one source folder
///
/// A rescan replaces `images` wholesale; the slice is never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySection {
    pub kind: SectionKind,
    pub images: Arc<[ImageFileRef]>,
}

impl GallerySection {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Whether the user has allowed the app to read their media folders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    /// Not checked yet
    #[default]
    Unknown,
    Denied,
    Granted,
}
