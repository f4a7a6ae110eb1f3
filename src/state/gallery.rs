use iced::widget::image::Handle;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::data::{GallerySection, ImageFileRef, PermissionState, SectionKind};
use super::permission::PermissionGate;
use crate::error::LoadError;

/// What one grid cell currently shows
#[derive(Debug, Clone)]
pub enum CellState {
    Loading,
    Ready(Handle),
    Failed(LoadError),
}

/// What the screen should draw, derived from permission and scan results
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// Ask for access; `requesting` disables the button while the host answers
    PermissionPrompt { requesting: bool },
    /// Granted, nothing to show yet and at least one scan still running
    Scanning,
    /// Every scan finished and none found an image
    Empty,
    /// Non-empty sections, Downloads first
    Sections(Vec<GallerySection>),
}

/// State of the gallery screen for its whole lifetime
///
/// Scan results are cached per folder path and are never refreshed while
/// the screen lives.
#[derive(Debug)]
pub struct GalleryScreen {
    gate: PermissionGate,
    sources: Vec<(SectionKind, Option<PathBuf>)>,
    scans: HashMap<PathBuf, Arc<[ImageFileRef]>>,
    in_flight: HashSet<PathBuf>,
    cells: HashMap<PathBuf, CellState>,
}

impl GalleryScreen {
    pub fn new(downloads: Option<PathBuf>, pictures: Option<PathBuf>) -> Self {
        Self {
            gate: PermissionGate::new(),
            sources: vec![
                (SectionKind::Downloads, downloads),
                (SectionKind::Pictures, pictures),
            ],
            scans: HashMap::new(),
            in_flight: HashSet::new(),
            cells: HashMap::new(),
        }
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut PermissionGate {
        &mut self.gate
    }

    pub fn permission(&self) -> PermissionState {
        self.gate.state()
    }

    /// Folders that still need a scan, Downloads first.
    ///
    /// Returned folders are marked in flight, so each is handed out once.
    /// Nothing is returned unless permission is granted.
    pub fn take_scan_requests(&mut self) -> Vec<PathBuf> {
        if !self.gate.is_granted() {
            return Vec::new();
        }

        let mut requests = Vec::new();
        for (_, dir) in &self.sources {
            let Some(dir) = dir else { continue };
            if self.scans.contains_key(dir) || self.in_flight.contains(dir) {
                continue;
            }
            if requests.contains(dir) {
                continue;
            }
            requests.push(dir.clone());
        }
        self.in_flight.extend(requests.iter().cloned());
        requests
    }

    /// Store a finished scan. Returns the images whose thumbnails must load.
    ///
    /// Results for a folder that was not requested are dropped.
    pub fn record_scan(&mut self, dir: PathBuf, images: Vec<ImageFileRef>) -> Vec<PathBuf> {
        if !self.in_flight.remove(&dir) {
            tracing::debug!(dir = %dir.display(), "ignoring unrequested scan result");
            return Vec::new();
        }

        let mut to_load = Vec::new();
        for image in &images {
            if !self.cells.contains_key(image.path()) {
                self.cells.insert(image.path().to_path_buf(), CellState::Loading);
                to_load.push(image.path().to_path_buf());
            }
        }
        self.scans.insert(dir, images.into());
        to_load
    }

    /// Store a finished thumbnail decode. Unknown paths are ignored.
    pub fn record_thumbnail(&mut self, path: &Path, result: Result<Handle, LoadError>) {
        let Some(cell) = self.cells.get_mut(path) else {
            return;
        };
        *cell = match result {
            Ok(handle) => CellState::Ready(handle),
            Err(err) => {
                tracing::warn!(error = %err, "thumbnail failed");
                CellState::Failed(err)
            }
        };
    }

    /// Cached images for one section, empty until its scan lands
    pub fn section_images(&self, kind: SectionKind) -> &[ImageFileRef] {
        self.sources
            .iter()
            .find(|(k, _)| *k == kind)
            .and_then(|(_, dir)| self.scans.get(dir.as_ref()?))
            .map(|images| &images[..])
            .unwrap_or(&[])
    }

    pub fn cell(&self, path: &Path) -> Option<&CellState> {
        self.cells.get(path)
    }

    fn is_scanning(&self) -> bool {
        self.sources
            .iter()
            .filter_map(|(_, dir)| dir.as_ref())
            .any(|dir| !self.scans.contains_key(dir))
    }

    pub fn layout(&self) -> Layout {
        if !self.gate.is_granted() {
            return Layout::PermissionPrompt {
                requesting: self.gate.is_requesting(),
            };
        }

        let sections: Vec<GallerySection> = self
            .sources
            .iter()
            .filter_map(|(kind, dir)| {
                let images = self.scans.get(dir.as_ref()?)?;
                (!images.is_empty()).then(|| GallerySection {
                    kind: *kind,
                    images: Arc::clone(images),
                })
            })
            .collect();

        if !sections.is_empty() {
            Layout::Sections(sections)
        } else if self.is_scanning() {
            Layout::Scanning
        } else {
            Layout::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(paths: &[&str]) -> Vec<ImageFileRef> {
        paths.iter().map(|p| ImageFileRef::new(PathBuf::from(p))).collect()
    }

    fn screen() -> GalleryScreen {
        GalleryScreen::new(Some(PathBuf::from("/dl")), Some(PathBuf::from("/pics")))
    }

    fn granted() -> GalleryScreen {
        let mut screen = screen();
        screen.gate_mut().refresh(true);
        screen
    }

    #[test]
    fn test_denied_shows_prompt_and_requests_no_scans() {
        let mut screen = screen();
        screen.gate_mut().refresh(false);

        assert!(screen.take_scan_requests().is_empty());
        assert_eq!(screen.layout(), Layout::PermissionPrompt { requesting: false });
    }

    #[test]
    fn test_unknown_shows_prompt() {
        let mut screen = screen();
        assert!(screen.take_scan_requests().is_empty());
        assert!(matches!(screen.layout(), Layout::PermissionPrompt { .. }));
    }

    #[test]
    fn test_prompt_reports_pending_request() {
        let mut screen = screen();
        screen.gate_mut().refresh(false);
        screen.gate_mut().begin_request();
        assert_eq!(screen.layout(), Layout::PermissionPrompt { requesting: true });
    }

    #[test]
    fn test_granted_requests_downloads_then_pictures_once() {
        let mut screen = granted();
        assert_eq!(
            screen.take_scan_requests(),
            vec![PathBuf::from("/dl"), PathBuf::from("/pics")]
        );
        // In flight, not handed out twice
        assert!(screen.take_scan_requests().is_empty());
        assert_eq!(screen.layout(), Layout::Scanning);
    }

    #[test]
    fn test_scans_are_cached_per_path() {
        let mut screen = granted();
        screen.take_scan_requests();
        screen.record_scan(PathBuf::from("/dl"), refs(&["/dl/a.jpg"]));
        screen.record_scan(PathBuf::from("/pics"), Vec::new());

        assert!(screen.take_scan_requests().is_empty());

        // Losing and regaining access does not trigger a rescan
        screen.gate_mut().refresh(false);
        screen.gate_mut().refresh(true);
        assert!(screen.take_scan_requests().is_empty());
    }

    #[test]
    fn test_both_empty_renders_empty_message() {
        let mut screen = granted();
        screen.take_scan_requests();
        screen.record_scan(PathBuf::from("/dl"), Vec::new());
        screen.record_scan(PathBuf::from("/pics"), Vec::new());
        assert_eq!(screen.layout(), Layout::Empty);
    }

    #[test]
    fn test_missing_folders_render_empty_message() {
        let mut screen = GalleryScreen::new(None, None);
        screen.gate_mut().refresh(true);
        assert!(screen.take_scan_requests().is_empty());
        assert_eq!(screen.layout(), Layout::Empty);
    }

    #[test]
    fn test_sections_skip_empty_and_keep_order() {
        let mut screen = granted();
        screen.take_scan_requests();
        // Pictures finishes first
        screen.record_scan(PathBuf::from("/pics"), refs(&["/pics/p.png"]));
        screen.record_scan(PathBuf::from("/dl"), refs(&["/dl/a.jpg", "/dl/b.gif"]));

        let Layout::Sections(sections) = screen.layout() else {
            panic!("expected sections");
        };
        let labels: Vec<&str> = sections.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Downloads", "Pictures"]);
        assert_eq!(sections[0].images.len(), 2);
        assert_eq!(screen.section_images(SectionKind::Downloads)[1].name(), "b.gif");

        let mut screen = granted();
        screen.take_scan_requests();
        screen.record_scan(PathBuf::from("/dl"), Vec::new());
        screen.record_scan(PathBuf::from("/pics"), refs(&["/pics/p.png"]));
        let Layout::Sections(sections) = screen.layout() else {
            panic!("expected sections");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::Pictures);
    }

    #[test]
    fn test_ready_section_shows_while_other_scans() {
        let mut screen = granted();
        screen.take_scan_requests();
        screen.record_scan(PathBuf::from("/pics"), refs(&["/pics/p.png"]));
        assert!(matches!(screen.layout(), Layout::Sections(s) if s.len() == 1));
    }

    #[test]
    fn test_same_folder_for_both_sections_is_scanned_once() {
        let mut screen = GalleryScreen::new(Some(PathBuf::from("/home")), Some(PathBuf::from("/home")));
        screen.gate_mut().refresh(true);
        assert_eq!(screen.take_scan_requests(), vec![PathBuf::from("/home")]);
    }

    #[test]
    fn test_unrequested_scan_is_ignored() {
        let mut screen = granted();
        let loads = screen.record_scan(PathBuf::from("/dl"), refs(&["/dl/a.jpg"]));
        assert!(loads.is_empty());
        assert!(screen.cell(Path::new("/dl/a.jpg")).is_none());
    }

    #[test]
    fn test_failed_thumbnail_is_local_to_its_cell() {
        let mut screen = granted();
        screen.take_scan_requests();
        let loads = screen.record_scan(
            PathBuf::from("/dl"),
            refs(&["/dl/0.jpg", "/dl/1.jpg", "/dl/2.jpg"]),
        );
        assert_eq!(loads.len(), 3);

        let pixels = vec![0u8; 4];
        screen.record_thumbnail(Path::new("/dl/0.jpg"), Ok(Handle::from_rgba(1, 1, pixels)));
        screen.record_thumbnail(
            Path::new("/dl/1.jpg"),
            Err(LoadError::Decode {
                path: "/dl/1.jpg".into(),
                reason: "bad".into(),
            }),
        );

        assert!(matches!(screen.cell(Path::new("/dl/0.jpg")), Some(CellState::Ready(_))));
        assert!(matches!(screen.cell(Path::new("/dl/1.jpg")), Some(CellState::Failed(_))));
        assert!(matches!(screen.cell(Path::new("/dl/2.jpg")), Some(CellState::Loading)));
    }

    #[test]
    fn test_thumbnail_for_unknown_path_is_ignored() {
        let mut screen = granted();
        screen.record_thumbnail(Path::new("/elsewhere.jpg"), Err(LoadError::Join("x".into())));
        assert!(screen.cell(Path::new("/elsewhere.jpg")).is_none());
    }
}
