// SPDX-License-Identifier: MPL-2.0

//! Capture controls module
//!
//! The bottom row: import button, shutter, flash toggle.

pub mod shutter_button;

use crate::app::state::{AppModel, Message};
use crate::backends::camera::types::FlashMode;
use crate::constants::ui;
use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, icon};

impl AppModel {
    /// Build the row below the viewfinder
    pub fn build_bottom_controls(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let import_button = widget::button::custom(
            widget::container(icon::from_name("folder-pictures-symbolic").size(24))
                .center(ui::ICON_BUTTON_WIDTH),
        )
        .padding(0)
        .width(Length::Fixed(ui::ICON_BUTTON_WIDTH))
        .height(Length::Fixed(ui::ICON_BUTTON_WIDTH))
        .class(cosmic::theme::Button::Icon)
        .on_press(Message::ImportImage);

        let flash_icon = match self.config.flash {
            FlashMode::Off => "flash-off-symbolic",
            FlashMode::On => "flash-symbolic",
            FlashMode::Auto => "flash-auto-symbolic",
        };
        let flash_button = widget::button::custom(
            widget::container(icon::from_name(flash_icon).size(24)).center(ui::ICON_BUTTON_WIDTH),
        )
        .padding(0)
        .width(Length::Fixed(ui::ICON_BUTTON_WIDTH))
        .height(Length::Fixed(ui::ICON_BUTTON_WIDTH))
        .class(cosmic::theme::Button::Icon)
        .on_press(Message::CycleFlash);

        // [Fill] [Import] [Fill] [Shutter] [Fill] [Flash] [Fill]
        widget::row()
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .push(import_button)
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .push(self.build_shutter_button())
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .push(flash_button)
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .align_y(Alignment::Center)
            .width(Length::Fill)
            .padding([spacing.space_xs, spacing.space_m])
            .into()
    }
}
