// SPDX-License-Identifier: GPL-3.0-only

//! Camera roll handlers
//!
//! Handles importing, previewing, removing and exporting roll images, plus
//! loading their thumbnails.

use crate::app::state::{AppModel, Message, ViewState};
use crate::constants::file_formats;
use crate::fl;
use crate::storage::{self, Thumbnail};
use cosmic::Task;
use cosmic::widget::image;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

impl AppModel {
    // =========================================================================
    // Import
    // =========================================================================

    pub(crate) fn handle_import_image(&mut self) -> Task<cosmic::Action<Message>> {
        if let Err(request) = self.ensure_permissions(false) {
            return request;
        }

        let title = fl!("import-title");
        let filter_name = fl!("import-filter");
        Task::perform(
            async move {
                rfd::AsyncFileDialog::new()
                    .set_title(title)
                    .add_filter(filter_name, file_formats::IMAGE_EXTENSIONS)
                    .pick_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            |path| cosmic::Action::App(Message::ImagePicked(path)),
        )
    }

    pub(crate) fn handle_image_picked(
        &mut self,
        path: Option<PathBuf>,
    ) -> Task<cosmic::Action<Message>> {
        let Some(source) = path else {
            debug!("Import cancelled");
            return Task::none();
        };

        info!(source = %source.display(), "Importing image");
        let files = self.files.clone();
        Task::perform(
            async move { files.import(&source).await.map_err(|e| e.to_string()) },
            |result| cosmic::Action::App(Message::ImportFinished(result)),
        )
    }

    pub(crate) fn handle_import_finished(
        &mut self,
        result: Result<PathBuf, String>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(path) => {
                info!(path = %path.display(), "Image imported");
                self.reduce(|state| state.import_succeeded(path.clone()));
                Task::batch([self.start_preview_timer(), self.load_thumbnail_task(path)])
            }
            Err(err) => {
                error!(error = %err, "Import failed");
                self.reduce(|state| state.import_failed(format!("Failed to import image: {}", err)));
                Task::none()
            }
        }
    }

    // =========================================================================
    // Preview
    // =========================================================================

    pub(crate) fn handle_preview_image(&mut self, path: PathBuf) -> Task<cosmic::Action<Message>> {
        self.reduce(|state| state.preview(path));
        if self.state.is_previewing() {
            self.start_preview_timer()
        } else {
            Task::none()
        }
    }

    pub(crate) fn handle_dismiss_preview(&mut self) -> Task<cosmic::Action<Message>> {
        self.preview_timer.cancel();
        self.reduce(ViewState::dismiss_preview);
        Task::none()
    }

    pub(crate) fn handle_preview_timeout(&mut self, epoch: u64) -> Task<cosmic::Action<Message>> {
        if !self.preview_timer.is_current(epoch) {
            debug!(epoch, current = self.preview_timer.epoch(), "Stale preview timer");
            return Task::none();
        }
        debug!("Preview auto-dismissed");
        self.reduce(ViewState::dismiss_preview);
        Task::none()
    }

    /// Arm the auto-dismiss timer for the preview now on screen
    ///
    /// Each call starts a new generation, so older timers expire harmlessly.
    pub(crate) fn start_preview_timer(&mut self) -> Task<cosmic::Action<Message>> {
        let epoch = self.preview_timer.arm();
        Self::delay_task(self.config.preview_delay(), Message::PreviewTimeout(epoch))
    }

    // =========================================================================
    // Remove / Export
    // =========================================================================

    pub(crate) fn handle_remove_image(&mut self, path: PathBuf) -> Task<cosmic::Action<Message>> {
        if !self.state.roll.contains(&path) {
            warn!(path = %path.display(), "Remove requested for unknown image");
            return Task::none();
        }

        info!(path = %path.display(), "Removing image");
        let files = self.files.clone();
        Task::perform(
            async move {
                let result = files.delete(&path).await.map_err(|e| e.to_string());
                (path, result)
            },
            |(path, result)| cosmic::Action::App(Message::ImageRemoved(path, result)),
        )
    }

    pub(crate) fn handle_image_removed(
        &mut self,
        path: PathBuf,
        result: Result<(), String>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(()) => {
                self.thumbnails.remove(&path);
                self.reduce(|state| state.removed(&path));
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "Remove failed");
                self.reduce(|state| state.remove_failed(format!("Failed to delete image: {}", err)));
            }
        }
        Task::none()
    }

    pub(crate) fn handle_export_image(&mut self, path: PathBuf) -> Task<cosmic::Action<Message>> {
        if let Err(request) = self.ensure_permissions(false) {
            return request;
        }

        let target = self.config.export_directory.path();
        info!(path = %path.display(), target = %target.display(), "Exporting image");

        // Keep the preview up while the copy runs
        self.preview_timer.cancel();

        let files = self.files.clone();
        Task::perform(
            async move { files.export(&path, &target).await.map_err(|e| e.to_string()) },
            |result| cosmic::Action::App(Message::ImageExported(result)),
        )
    }

    pub(crate) fn handle_image_exported(
        &mut self,
        result: Result<PathBuf, String>,
    ) -> Task<cosmic::Action<Message>> {
        let outcome = match result {
            Ok(path) => {
                info!(path = %path.display(), "Image exported");
                self.push_toast(fl!("image-saved", path = path.display().to_string()))
            }
            Err(err) => {
                error!(error = %err, "Export failed");
                self.reduce(|state| state.export_failed(format!("Failed to save image: {}", err)));
                Task::none()
            }
        };

        // Save paused the countdown, resume it for the preview still open
        if self.state.is_previewing() {
            Task::batch([outcome, self.start_preview_timer()])
        } else {
            outcome
        }
    }

    // =========================================================================
    // Thumbnails
    // =========================================================================

    pub(crate) fn load_thumbnail_task(&self, path: PathBuf) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                let result = storage::load_thumbnail(path.clone())
                    .await
                    .map_err(|e| e.to_string());
                (path, result)
            },
            |(path, result)| cosmic::Action::App(Message::ThumbnailLoaded(path, result)),
        )
    }

    pub(crate) fn handle_thumbnail_loaded(
        &mut self,
        path: PathBuf,
        result: Result<Thumbnail, String>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(thumb) if self.state.roll.contains(&path) => {
                let handle = image::Handle::from_rgba(thumb.width, thumb.height, thumb.rgba);
                self.thumbnails.insert(path, handle);
            }
            Ok(_) => debug!(path = %path.display(), "Thumbnail for removed image dropped"),
            // The tile falls back to a placeholder icon
            Err(err) => warn!(path = %path.display(), error = %err, "Failed to load thumbnail"),
        }
        Task::none()
    }
}
