// src/core/widget.rs

use strum::Display;
use tracing::{debug, info, warn};

use crate::core::models::{SelectedFile, UploadOutcome, UploadRequest};
use crate::core::preview::FilePreview;
use crate::core::render::{RenderedResult, ResultRenderer};

/// Lifecycle of the upload interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UiState {
    /// Nothing in flight, nothing shown.
    Idle,
    /// A request is in flight; busy indicators are visible, preview is not.
    Uploading,
    /// A response arrived; preview and result are visible.
    Settled,
}

/// Everything the widget is allowed to do to the screen.
///
/// The widget never touches a terminal directly; the host injects this
/// capability surface, which also makes every transition testable without
/// rendering anything.
pub trait UiPort {
    /// Make both busy indicators visible.
    fn show_busy(&mut self);
    /// Hide both busy indicators.
    fn hide_busy(&mut self);
    /// Replace (or clear) the preview of the submitted file.
    fn set_preview(&mut self, preview: Option<FilePreview>);
    /// Replace (or clear) the rendered result.
    fn set_result(&mut self, result: Option<RenderedResult>);
    /// Remove the "current" marker from the sample items.
    fn clear_highlight(&mut self);
    /// Toggle the drop target's drag-active emphasis.
    fn set_drag_active(&mut self, active: bool);
    /// Surface an upload failure to the user.
    fn show_error(&mut self, message: String);
}

/// Orchestrates the single upload interaction end to end.
///
/// Events come in from the host (file picked, drag over, drop, outcome
/// arrived); effects go out through the injected [`UiPort`]. The widget
/// itself owns only the state machine and the request sequencing.
pub struct UploadWidget {
    state: UiState,
    renderer: Box<dyn ResultRenderer>,
    next_seq: u64,
    /// Sequence of the most recently issued request. Outcomes carrying any
    /// other sequence lost the race and are discarded, so overlapping
    /// uploads resolve newest-wins instead of last-response-wins.
    current_seq: Option<u64>,
}

impl UploadWidget {
    pub fn new(renderer: Box<dyn ResultRenderer>) -> Self {
        Self {
            state: UiState::Idle,
            renderer,
            next_seq: 0,
            current_seq: None,
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == UiState::Uploading
    }

    /// The user picked a file through the input control. An empty selection
    /// is ignored without touching the UI.
    pub fn on_file_selected(
        &mut self,
        port: &mut dyn UiPort,
        file: Option<SelectedFile>,
    ) -> Option<UploadRequest> {
        let file = file?;
        Some(self.begin_upload(port, file))
    }

    /// Pointer dragged over the drop target. Cosmetic only.
    pub fn on_drag_over(&mut self, port: &mut dyn UiPort) {
        port.set_drag_active(true);
    }

    /// Pointer left the drop target. Cosmetic only.
    pub fn on_drag_leave(&mut self, port: &mut dyn UiPort) {
        port.set_drag_active(false);
    }

    /// A file was dropped on the drop target. Always clears the drag-active
    /// emphasis; a `Some` return means the drop was consumed here and must
    /// not be handled by anything else.
    pub fn on_drop(
        &mut self,
        port: &mut dyn UiPort,
        file: Option<SelectedFile>,
    ) -> Option<UploadRequest> {
        port.set_drag_active(false);
        let file = file?;
        Some(self.begin_upload(port, file))
    }

    /// Shared reset-to-busy sequence. The UI is fully cleared and both busy
    /// indicators are shown before the request is handed to the caller, so
    /// no stale preview or result can outlive a new selection.
    fn begin_upload(&mut self, port: &mut dyn UiPort, file: SelectedFile) -> UploadRequest {
        port.set_result(None);
        port.set_preview(None);
        port.clear_highlight();
        port.show_busy();

        self.state = UiState::Uploading;
        self.next_seq += 1;
        self.current_seq = Some(self.next_seq);
        info!(seq = self.next_seq, file = %file.name, "upload started");

        UploadRequest {
            seq: self.next_seq,
            file,
        }
    }

    /// An upload finished, successfully or not. Returns `true` when the
    /// outcome was current and applied, `false` when it was superseded.
    pub fn on_upload_settled(&mut self, port: &mut dyn UiPort, outcome: UploadOutcome) -> bool {
        if self.current_seq != Some(outcome.seq) {
            debug!(
                seq = outcome.seq,
                file = %outcome.file_name,
                "discarding superseded upload outcome"
            );
            return false;
        }
        self.current_seq = None;

        match outcome.result {
            Ok(success) => {
                let rendered = self.renderer.render(&success.response.result);
                port.hide_busy();
                port.set_preview(Some(success.preview));
                port.set_result(Some(rendered));
                self.state = UiState::Settled;
                info!(seq = outcome.seq, file = %outcome.file_name, state = %self.state, "upload settled");
            }
            Err(error) => {
                port.hide_busy();
                port.show_error(error.to_string());
                self.state = UiState::Idle;
                warn!(seq = outcome.seq, file = %outcome.file_name, error = %error, "upload failed");
            }
        }
        true
    }

    /// Back to a fresh idle screen, e.g. for the "new upload" key.
    pub fn reset(&mut self, port: &mut dyn UiPort) {
        self.state = UiState::Idle;
        self.current_seq = None;
        port.set_preview(None);
        port.set_result(None);
        port.set_drag_active(false);
    }
}
