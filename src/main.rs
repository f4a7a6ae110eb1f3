use futures::future::{self, AbortHandle};
use futures::stream::{self, BoxStream, StreamExt};
use iced::event::{self, Event};
use iced::widget::image::Handle;
use iced::{window, Element, Subscription, Task, Theme};
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

mod config;
mod error;
mod media;
mod state;
mod ui;

use config::GalleryConfig;
use error::LoadError;
use media::scanner::{DirectoryScanner, FsScanner};
use media::thumbnail;
use state::data::ImageFileRef;
use state::gallery::GalleryScreen;
use state::permission::{DialogPermissionHost, PermissionHost};

/// Main application state
struct PhotoGallery {
    config: GalleryConfig,
    screen: GalleryScreen,
    host: Arc<dyn PermissionHost>,
    scanner: Arc<dyn DirectoryScanner>,
    /// Shared by every thumbnail decode; bounds how many run at once
    decode_permits: Arc<Semaphore>,
    /// Running scans and decodes, keyed by folder or image path
    tasks: HashMap<PathBuf, AbortHandle>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User pressed "Grant permission"
    RequestPermission,
    /// The host answered a permission request
    PermissionResolved(bool),
    /// The window regained focus; the grant may have changed outside the app
    WindowFocused,
    /// Background scan of one folder finished
    ScanComplete(PathBuf, Vec<ImageFileRef>),
    /// Background decode of one thumbnail finished
    ThumbnailLoaded(PathBuf, Result<Handle, LoadError>),
}

impl PhotoGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = GalleryConfig::from_system();
        Self::with_host(config, Arc::new(DialogPermissionHost::new()), Arc::new(FsScanner))
    }

    fn with_host(
        config: GalleryConfig,
        host: Arc<dyn PermissionHost>,
        scanner: Arc<dyn DirectoryScanner>,
    ) -> (Self, Task<Message>) {
        let screen = GalleryScreen::new(config.downloads_dir.clone(), config.pictures_dir.clone());
        let decode_permits = Arc::new(Semaphore::new(config.max_concurrent_decodes.max(1)));
        let mut app = PhotoGallery {
            config,
            screen,
            host,
            scanner,
            decode_permits,
            tasks: HashMap::new(),
        };

        app.screen.gate_mut().refresh(app.host.is_granted());
        tracing::info!(permission = ?app.screen.permission(), "photo gallery started");

        let task = app.start_scans();
        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::RequestPermission => {
                if !self.screen.gate_mut().begin_request() {
                    return Task::none();
                }
                tracing::info!("requesting media access");
                Task::perform(self.host.request(), Message::PermissionResolved)
            }
            Message::PermissionResolved(granted) => {
                self.screen.gate_mut().complete_request(granted);
                tracing::info!(permission = ?self.screen.permission(), "permission updated");
                self.start_scans()
            }
            Message::WindowFocused => {
                if self.screen.gate().is_requesting() {
                    return Task::none();
                }
                if self.screen.gate_mut().refresh(self.host.is_granted()) {
                    tracing::info!("media access granted while unfocused");
                }
                self.start_scans()
            }
            Message::ScanComplete(dir, images) => {
                self.tasks.remove(&dir);
                let to_load = self.screen.record_scan(dir, images);
                self.start_thumbnails(to_load)
            }
            Message::ThumbnailLoaded(path, result) => {
                self.tasks.remove(&path);
                self.screen.record_thumbnail(&path, result);
                Task::none()
            }
        }
    }

    /// Register `work` under `key` and return it as a stream of at most one
    /// message. Once aborted, the stream ends without yielding.
    fn track(
        &mut self,
        key: PathBuf,
        work: impl Future<Output = Message> + Send + 'static,
    ) -> BoxStream<'static, Message> {
        let (work, handle) = future::abortable(work);
        if let Some(previous) = self.tasks.insert(key, handle) {
            previous.abort();
        }
        stream::once(work)
            .filter_map(|outcome| future::ready(outcome.ok()))
            .boxed()
    }

    /// Background listing of one folder
    fn spawn_scan(&mut self, dir: PathBuf) -> BoxStream<'static, Message> {
        let scanner = Arc::clone(&self.scanner);
        let target = dir.clone();
        let scan = async move {
            let images = tokio::task::spawn_blocking({
                let target = target.clone();
                move || scanner.scan(&target)
            })
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(dir = %target.display(), error = %err, "scan task failed");
                Vec::new()
            });
            Message::ScanComplete(target, images)
        };
        self.track(dir, scan)
    }

    /// Background decode of one cell, waiting for a free decode slot first
    fn spawn_thumbnail(&mut self, path: PathBuf) -> BoxStream<'static, Message> {
        let size = self.config.thumbnail_pixels();
        let permits = Arc::clone(&self.decode_permits);
        let target = path.clone();
        let load = async move {
            let result = thumbnail::load_thumbnail(target.clone(), size, permits)
                .await
                .map(|thumb| Handle::from_rgba(thumb.width, thumb.height, thumb.pixels));
            Message::ThumbnailLoaded(target, result)
        };
        self.track(path, load)
    }

    /// Issue a background scan for every folder that has not been scanned yet
    fn start_scans(&mut self) -> Task<Message> {
        let scans: Vec<Task<Message>> = self
            .screen
            .take_scan_requests()
            .into_iter()
            .map(|dir| Task::run(self.spawn_scan(dir), |message| message))
            .collect();
        Task::batch(scans)
    }

    /// Decode thumbnails off the UI thread; each cell resolves on its own
    fn start_thumbnails(&mut self, paths: Vec<PathBuf>) -> Task<Message> {
        let loads: Vec<Task<Message>> = paths
            .into_iter()
            .map(|path| Task::run(self.spawn_thumbnail(path), |message| message))
            .collect();
        Task::batch(loads)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        ui::gallery::view(&self.screen, &self.config)
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::Focused) => Some(Message::WindowFocused),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

impl Drop for PhotoGallery {
    /// In-flight work never reports back to a screen that is gone
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

fn main() -> iced::Result {
    // Set RUST_LOG to override, e.g. RUST_LOG=photo_gallery=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    iced::application("Photo Gallery", PhotoGallery::update, PhotoGallery::view)
        .subscription(PhotoGallery::subscription)
        .theme(PhotoGallery::theme)
        .centered()
        .run_with(PhotoGallery::new)
}
