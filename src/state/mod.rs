/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The media-read permission gate and its host seam (permission.rs)
/// - Per-screen scan cache and thumbnail cells (gallery.rs)

pub mod data;
pub mod gallery;
pub mod permission;
