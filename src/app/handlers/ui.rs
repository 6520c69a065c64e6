// SPDX-License-Identifier: GPL-3.0-only

//! UI Navigation handlers
//!
//! Handles context pages, external links and toast notifications.

use crate::app::state::{AppModel, ContextPage, Message, ViewState};
use cosmic::Task;
use cosmic::widget;
use tracing::{error, warn};

impl AppModel {
    // =========================================================================
    // UI Navigation Handlers
    // =========================================================================

    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(url = %url, error = %err, "Failed to open URL");
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    pub(crate) fn handle_close_toast(
        &mut self,
        id: widget::ToastId,
    ) -> Task<cosmic::Action<Message>> {
        self.toasts.remove(id);
        Task::none()
    }

    /// Show a transient notification
    pub(crate) fn push_toast(&mut self, text: impl Into<String>) -> Task<cosmic::Action<Message>> {
        self.toasts
            .push(widget::toaster::Toast::new(text.into()))
            .map(cosmic::Action::App)
    }

    /// Turn a pending state error into a toast and clear it
    pub(crate) fn surface_error(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(error) = self.state.error.clone() else {
            return Task::none();
        };
        warn!(error = %error, "Showing error");
        self.reduce(ViewState::clear_error);
        self.push_toast(error)
    }
}
