// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! Composes the main UI from its components:
//! - Viewfinder (camera_preview module) or image preview (preview_overlay module)
//! - Thumbnail strip (camera_roll module)
//! - Shutter and bottom controls (controls module)

use crate::app::state::{AppModel, Message};
use cosmic::Element;
use cosmic::iced::{Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        // Flash: viewfinder under a white screen, no other UI
        if self.flash_active {
            let flash_overlay = widget::container(widget::Space::new(Length::Fill, Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| widget::container::Style {
                    background: Some(Background::Color(Color::WHITE)),
                    ..Default::default()
                });

            return black_background(
                cosmic::iced::widget::stack![self.build_camera_preview(), flash_overlay]
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into(),
            );
        }

        let main_area = match &self.state.current_preview {
            Some(path) => self.build_preview_overlay(path),
            None => self.build_camera_preview(),
        };

        let mut column = widget::column()
            .push(
                widget::container(main_area)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .width(Length::Fill)
            .height(Length::Fill);

        if !self.state.roll.is_empty() {
            column = column.push(self.build_camera_roll());
        }
        column = column.push(self.build_bottom_controls());

        widget::toaster(&self.toasts, black_background(column.into()))
    }
}

fn black_background(content: Element<'_, Message>) -> Element<'_, Message> {
    widget::container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::BLACK)),
            text_color: Some(Color::WHITE),
            ..Default::default()
        })
        .into()
}
