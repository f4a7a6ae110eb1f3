use std::path::PathBuf;

use crate::state::data::SectionKind;

/// Number of thumbnails per grid row
pub const GRID_COLUMNS: usize = 3;

/// Edge length of one grid cell, in logical pixels
pub const CELL_SIZE: f32 = 160.0;

/// Thumbnail decodes allowed to run at the same time
pub const MAX_CONCURRENT_DECODES: usize = 4;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "photo_gallery=info,warn";

/// Runtime settings for the gallery
///
/// The folders come from the platform's standard lookup and are not
/// user-configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    pub downloads_dir: Option<PathBuf>,
    pub pictures_dir: Option<PathBuf>,
    pub columns: usize,
    pub cell_size: f32,
    pub max_concurrent_decodes: usize,
}

impl GalleryConfig {
    /// Resolve the public folders for the current user
    ///
    /// - Linux: $XDG_DOWNLOAD_DIR / $XDG_PICTURES_DIR
    /// - macOS: ~/Downloads, ~/Pictures
    /// - Windows: {FOLDERID_Downloads}, {FOLDERID_Pictures}
    pub fn from_system() -> Self {
        let config = Self {
            downloads_dir: dirs::download_dir(),
            pictures_dir: dirs::picture_dir(),
            columns: GRID_COLUMNS,
            cell_size: CELL_SIZE,
            max_concurrent_decodes: MAX_CONCURRENT_DECODES,
        };

        for kind in SectionKind::ALL {
            match config.source_dir(kind) {
                Some(dir) => tracing::info!(section = kind.label(), dir = %dir.display(), "using folder"),
                None => tracing::warn!(section = kind.label(), "platform has no such folder"),
            }
        }
        config
    }

    pub fn source_dir(&self, kind: SectionKind) -> Option<&PathBuf> {
        match kind {
            SectionKind::Downloads => self.downloads_dir.as_ref(),
            SectionKind::Pictures => self.pictures_dir.as_ref(),
        }
    }

    /// Decoded thumbnail edge in physical pixels, rounded up
    pub fn thumbnail_pixels(&self) -> u32 {
        self.cell_size.ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_dir_mapping() {
        let config = GalleryConfig {
            downloads_dir: Some(PathBuf::from("/d")),
            pictures_dir: None,
            columns: GRID_COLUMNS,
            cell_size: 150.5,
            max_concurrent_decodes: MAX_CONCURRENT_DECODES,
        };
        assert_eq!(config.source_dir(SectionKind::Downloads), Some(&PathBuf::from("/d")));
        assert_eq!(config.source_dir(SectionKind::Pictures), None);
        assert_eq!(config.thumbnail_pixels(), 151);
    }
}
