// SPDX-License-Identifier: GPL-3.0-only

//! Live viewfinder
//!
//! Shows the latest frame, or a centered notice while there is nothing to
//! show yet.

use crate::app::state::{AppModel, Message};
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, ContentFit, Length};
use cosmic::widget;

impl AppModel {
    /// Build the camera preview widget
    pub fn build_camera_preview(&self) -> Element<'_, Message> {
        if !self.state.camera_permission {
            return self.preview_notice("camera-disabled-symbolic", fl!("camera-permission-needed"));
        }

        if self.available_cameras.is_empty() {
            return self.preview_notice("camera-web-symbolic", fl!("initializing-camera"));
        }

        let Some(handle) = &self.viewfinder else {
            return self.preview_notice("camera-web-symbolic", fl!("waiting-for-camera"));
        };

        widget::container(
            widget::image::Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }

    fn preview_notice(&self, icon: &'static str, text: String) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        widget::container(
            widget::column()
                .push(widget::icon::from_name(icon).size(48))
                .push(widget::text(text).size(20))
                .spacing(spacing.space_s)
                .align_x(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(cosmic::iced::alignment::Horizontal::Center)
        .align_y(cosmic::iced::alignment::Vertical::Center)
        .style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::BLACK)),
            text_color: Some(Color::WHITE),
            ..Default::default()
        })
        .into()
    }
}
