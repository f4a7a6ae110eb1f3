use iced::widget::image::Handle;
use iced::widget::{container, image, text, tooltip, Column, Row, Space};
use iced::{ContentFit, Element, Length};

use crate::state::data::ImageFileRef;
use crate::state::gallery::{CellState, GalleryScreen};
use crate::Message;

/// Gap between cells, horizontally and vertically
const CELL_SPACING: f32 = 4.0;

/// Split `items` into rows of `columns`, left to right, in input order.
/// The last row may be short.
pub fn rows<T>(items: &[T], columns: usize) -> Vec<&[T]> {
    if columns == 0 {
        return Vec::new();
    }
    items.chunks(columns).collect()
}

/// What a grid cell draws
#[derive(Debug, Clone, Copy)]
pub enum CellFace<'a> {
    Placeholder,
    Image(&'a Handle),
    Error,
}

impl<'a> CellFace<'a> {
    fn of(state: Option<&'a CellState>) -> Self {
        match state {
            Some(CellState::Ready(handle)) => CellFace::Image(handle),
            Some(CellState::Failed(_)) => CellFace::Error,
            Some(CellState::Loading) | None => CellFace::Placeholder,
        }
    }
}

/// Each image with its face, laid out as `rows` lays them out
pub fn faces<'a>(
    images: &'a [ImageFileRef],
    screen: &'a GalleryScreen,
    columns: usize,
) -> Vec<Vec<(&'a ImageFileRef, CellFace<'a>)>> {
    rows(images, columns)
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|image_ref| (image_ref, CellFace::of(screen.cell(image_ref.path()))))
                .collect()
        })
        .collect()
}

/// Thumbnail grid for one section
///
/// The grid is not scrollable itself; it takes its natural height and
/// relies on the screen's scroll container.
pub fn view<'a>(
    images: &'a [ImageFileRef],
    screen: &'a GalleryScreen,
    columns: usize,
    cell_size: f32,
) -> Element<'a, Message> {
    let grid_rows = faces(images, screen, columns).into_iter().map(|row| {
        let mut cells: Vec<Element<'a, Message>> = row
            .into_iter()
            .map(|(image_ref, face)| cell(image_ref, face, cell_size))
            .collect();

        // Pad the last row so columns stay aligned
        while cells.len() < columns {
            cells.push(Space::new(cell_size, cell_size).into());
        }

        Row::with_children(cells).spacing(CELL_SPACING).into()
    });

    Column::with_children(grid_rows)
        .spacing(CELL_SPACING)
        .into()
}

/// One square cell: placeholder, error placeholder, or the cropped image
fn cell<'a>(image_ref: &'a ImageFileRef, face: CellFace<'a>, size: f32) -> Element<'a, Message> {
    let content: Element<'a, Message> = match face {
        CellFace::Image(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        CellFace::Error => text("⚠").size(32).into(),
        CellFace::Placeholder => text("…").size(24).into(),
    };

    let framed = container(content)
        .center(Length::Fixed(size))
        .style(container::rounded_box);

    tooltip(framed, text(image_ref.name()), tooltip::Position::Bottom).into()
}
