// SPDX-License-Identifier: MPL-2.0

//! Camera roll strip
//!
//! One tile per roll entry, oldest on the left. Tapping a tile previews it,
//! the small button in its corner removes it.

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, ContentFit, Length};
use cosmic::widget::{self, icon};
use std::path::PathBuf;

impl AppModel {
    /// Build the horizontal thumbnail strip
    pub fn build_camera_roll(&self) -> Element<'_, Message> {
        let tiles = self
            .state
            .roll
            .iter()
            .fold(widget::row().spacing(ui::ROLL_SPACING), |row, path| {
                row.push(self.build_roll_tile(path))
            })
            .align_y(Alignment::Center)
            .padding([0, ui::ROLL_SPACING]);

        widget::container(widget::scrollable::horizontal(tiles))
            .width(Length::Fill)
            .height(Length::Fixed(ui::ROLL_HEIGHT))
            .center_y(Length::Fixed(ui::ROLL_HEIGHT))
            .into()
    }

    fn build_roll_tile(&self, path: &PathBuf) -> Element<'_, Message> {
        let selected = self.state.current_preview.as_ref() == Some(path);

        let content: Element<'_, Message> = match self.thumbnails.get(path) {
            Some(handle) => widget::image::Image::new(handle.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fixed(ui::ROLL_TILE_SIZE))
                .height(Length::Fixed(ui::ROLL_TILE_SIZE))
                .into(),
            None => widget::container(icon::from_name("image-x-generic-symbolic").size(32))
                .center(ui::ROLL_TILE_SIZE)
                .into(),
        };

        let tile = widget::button::custom(content)
            .padding(0)
            .width(Length::Fixed(ui::ROLL_TILE_SIZE))
            .height(Length::Fixed(ui::ROLL_TILE_SIZE))
            .class(cosmic::theme::Button::Image)
            .selected(selected)
            .on_press(Message::PreviewImage(path.clone()));

        let remove = widget::button::icon(icon::from_name("window-close-symbolic").size(12))
            .padding(2)
            .on_press(Message::RemoveImage(path.clone()));

        let badge = widget::container(remove).style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::from_rgba(
                0.0,
                0.0,
                0.0,
                ui::OVERLAY_BACKGROUND_ALPHA,
            ))),
            text_color: Some(Color::WHITE),
            border: cosmic::iced::Border {
                radius: ui::CORNER_RADIUS.into(),
                ..Default::default()
            },
            ..Default::default()
        });

        cosmic::iced::widget::stack![
            tile,
            widget::container(badge)
                .width(Length::Fixed(ui::ROLL_TILE_SIZE))
                .align_x(cosmic::iced::alignment::Horizontal::Right)
                .padding(2),
        ]
        .into()
    }
}
