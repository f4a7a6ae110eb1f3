use iced::widget::{button, column, container, scrollable, text, Column};
use iced::{Alignment, Element, Length};

use super::grid;
use crate::config::GalleryConfig;
use crate::state::gallery::{GalleryScreen, Layout};
use crate::Message;

pub const PERMISSION_MESSAGE: &str = "Photo Gallery needs permission to read your photos.";
pub const EMPTY_MESSAGE: &str = "No images found in Downloads or Pictures.";

/// Build the whole screen from its current state
pub fn view<'a>(screen: &'a GalleryScreen, config: &GalleryConfig) -> Element<'a, Message> {
    match screen.layout() {
        Layout::PermissionPrompt { requesting } => {
            let request = button("Grant permission").padding(10);
            let request = if requesting {
                request
            } else {
                request.on_press(Message::RequestPermission)
            };

            centered(
                column![text(PERMISSION_MESSAGE).size(18), request]
                    .spacing(20)
                    .align_x(Alignment::Center),
            )
        }
        Layout::Scanning => centered(text("Looking for images...").size(16)),
        Layout::Empty => centered(text(EMPTY_MESSAGE).size(18)),
        Layout::Sections(sections) => {
            let columns = config.columns;
            let cell_size = config.cell_size;

            let content = sections.into_iter().fold(
                Column::new().spacing(24).padding(16),
                |content, section| {
                    // Borrow from the screen so the grid outlives this closure
                    let images = screen.section_images(section.kind);
                    content.push(
                        column![
                            text(format!("{} ({})", section.label(), section.images.len())).size(22),
                            grid::view(images, screen, columns, cell_size),
                        ]
                        .spacing(8),
                    )
                },
            );

            scrollable(container(content).center_x(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
    }
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(40)
        .center(Length::Fill)
        .into()
}
