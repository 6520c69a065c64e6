// SPDX-License-Identifier: MPL-2.0

//! Settings drawer view

use crate::app::state::{AppModel, ContextPage, Message};
use crate::backends::camera::types::{CameraLens, Directory, FlashMode, ImageFormat};
use crate::config::AppTheme;
use crate::constants::{app_info, ui};
use crate::fl;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::widget;

impl AppModel {
    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let camera_dropdown = widget::dropdown(
            &self.camera_dropdown_options,
            (!self.camera_dropdown_options.is_empty()).then_some(self.current_camera_index),
            Message::SelectCamera,
        );

        let theme_dropdown = widget::dropdown(
            &self.theme_dropdown_options,
            AppTheme::ALL.iter().position(|t| *t == self.config.app_theme),
            Message::SetAppTheme,
        );

        let lens_dropdown = widget::dropdown(
            &self.lens_dropdown_options,
            CameraLens::ALL.iter().position(|l| *l == self.config.lens),
            Message::SelectLens,
        );

        let flash_dropdown = widget::dropdown(
            &self.flash_dropdown_options,
            FlashMode::ALL.iter().position(|f| *f == self.config.flash),
            Message::SelectFlashMode,
        );

        let format_dropdown = widget::dropdown(
            &self.format_dropdown_options,
            ImageFormat::ALL
                .iter()
                .position(|f| *f == self.config.image_format),
            Message::SelectImageFormat,
        );

        let directory_dropdown = widget::dropdown(
            &self.directory_dropdown_options,
            Directory::ALL
                .iter()
                .position(|d| *d == self.config.export_directory),
            Message::SelectExportDirectory,
        );

        // A hand-edited delay outside the choices shows no selection
        let preview_delay_dropdown = widget::dropdown(
            &self.preview_delay_dropdown_options,
            ui::PREVIEW_DELAY_CHOICES
                .iter()
                .position(|secs| *secs == self.config.preview_dismiss_secs),
            Message::SelectPreviewDelay,
        );

        let version_info = if app_info::is_flatpak() {
            format!("Version {} (Flatpak)", app_info::version())
        } else {
            format!("Version {}", app_info::version())
        };

        let heading = |label: String| widget::text(label).size(16).font(cosmic::font::bold());

        let settings_column: Element<'_, Message> = widget::column()
            .push(heading(fl!("camera")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(camera_dropdown)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(heading(fl!("lens")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(lens_dropdown)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(heading(fl!("flash")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(flash_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(heading(fl!("image-format")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(format_dropdown)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(heading(fl!("export-directory")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(directory_dropdown)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(heading(fl!("preview-delay")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(preview_delay_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(heading(fl!("appearance")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(theme_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::button::link(fl!("about"))
                    .on_press(Message::ToggleContextPage(ContextPage::About)),
            )
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(
                widget::text(version_info)
                    .size(12)
                    .class(cosmic::theme::Text::Accent),
            )
            .spacing(0)
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}
