/// Widgets for the gallery screen
///
/// - `gallery.rs` - permission prompt, sections and the outer scroll container
/// - `grid.rs` - fixed-column thumbnail grid

pub mod gallery;
pub mod grid;
