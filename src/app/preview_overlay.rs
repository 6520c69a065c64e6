// SPDX-License-Identifier: MPL-2.0

//! Full-screen preview of a roll image
//!
//! Replaces the viewfinder until dismissed, with Save and Close actions.

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, ContentFit, Length};
use cosmic::widget::{self, icon};
use std::path::Path;

impl AppModel {
    /// Build the preview for `path`
    pub fn build_preview_overlay<'a>(&'a self, path: &'a Path) -> Element<'a, Message> {
        let spacing = cosmic::theme::spacing();

        let image = widget::image::Image::new(widget::image::Handle::from_path(path))
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill);

        // Tapping the image closes the preview
        let image = widget::mouse_area(
            widget::container(image)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .on_press(Message::DismissPreview);

        let save_button = widget::button::standard(fl!("save"))
            .leading_icon(icon::from_name("document-save-symbolic"))
            .on_press(Message::ExportImage(path.to_path_buf()));
        let close_button = widget::button::standard(fl!("close"))
            .leading_icon(icon::from_name("window-close-symbolic"))
            .on_press(Message::DismissPreview);

        let actions = widget::container(
            widget::row()
                .push(save_button)
                .push(close_button)
                .spacing(spacing.space_s)
                .align_y(Alignment::Center),
        )
        .padding(spacing.space_xs)
        .style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::from_rgba(
                0.0,
                0.0,
                0.0,
                ui::OVERLAY_BACKGROUND_ALPHA,
            ))),
            border: cosmic::iced::Border {
                radius: ui::CORNER_RADIUS.into(),
                ..Default::default()
            },
            ..Default::default()
        });

        cosmic::iced::widget::stack![
            image,
            widget::container(actions)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(cosmic::iced::alignment::Horizontal::Center)
                .align_y(cosmic::iced::alignment::Vertical::Bottom)
                .padding(spacing.space_m),
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}
