// SPDX-License-Identifier: MPL-2.0

//! Shutter button widget implementation

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use cosmic::Element;
use cosmic::iced::{Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the shutter button
    ///
    /// White circle, gray and slightly pressed while a capture runs. Without a
    /// camera it is grayed out and does nothing.
    pub fn build_shutter_button(&self) -> Element<'_, Message> {
        let has_camera = self.state.camera.is_some();
        let is_capturing = self.state.is_loading || self.flash_active;

        let color = if !has_camera {
            Color::from_rgba(0.5, 0.5, 0.5, 0.3)
        } else if is_capturing {
            Color::from_rgb(0.7, 0.7, 0.7)
        } else {
            Color::WHITE
        };

        let (inner_size, outer_size) = if is_capturing {
            (
                ui::CAPTURE_BUTTON_INNER * 0.85,
                ui::CAPTURE_BUTTON_OUTER * 0.85,
            )
        } else {
            (ui::CAPTURE_BUTTON_INNER, ui::CAPTURE_BUTTON_OUTER)
        };

        let inner = widget::container(widget::Space::new(
            Length::Fixed(inner_size),
            Length::Fixed(inner_size),
        ))
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(color)),
            border: cosmic::iced::Border {
                radius: (inner_size / 2.0).into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let mut button = widget::button::custom(inner)
            .padding(0)
            .width(Length::Fixed(outer_size))
            .height(Length::Fixed(outer_size));
        if has_camera && !is_capturing {
            button = button.on_press(Message::Capture);
        }

        // Fixed-size wrapper so the press effect does not shift the row
        widget::container(button)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .center_x(ui::CAPTURE_BUTTON_OUTER)
            .center_y(ui::CAPTURE_BUTTON_OUTER)
            .into()
    }
}
