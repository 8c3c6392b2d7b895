// src/app.rs

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::widgets::{ListState, ScrollbarState};

use crate::core::models::{SelectedFile, UploadOutcome};
use crate::core::preview::FilePreview;
use crate::core::render::{ClassificationRenderer, RenderedResult};
use crate::core::widget::{UiPort, UploadWidget};
use crate::logging;

pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// How many log lines the log panel keeps in memory.
const LOG_TAIL_LINES: usize = 200;

/// Everything the widget paints through its port. The `ui` module renders
/// straight from these fields each frame.
#[derive(Debug, Default)]
pub struct ViewSurface {
    pub busy: bool,
    pub preview: Option<FilePreview>,
    pub result: Option<RenderedResult>,
    pub drag_active: bool,
    pub error: Option<String>,
    /// Index into the sample list of the sample currently on display.
    pub current_sample: Option<usize>,
}

impl UiPort for ViewSurface {
    fn show_busy(&mut self) {
        self.busy = true;
        // A fresh upload also clears any stale failure message.
        self.error = None;
    }

    fn hide_busy(&mut self) {
        self.busy = false;
    }

    fn set_preview(&mut self, preview: Option<FilePreview>) {
        self.preview = preview;
    }

    fn set_result(&mut self, result: Option<RenderedResult>) {
        self.result = result;
    }

    fn clear_highlight(&mut self) {
        self.current_sample = None;
    }

    fn set_drag_active(&mut self, active: bool) {
        self.drag_active = active;
    }

    fn show_error(&mut self, message: String) {
        self.error = Some(message);
    }
}

pub struct App {
    pub should_quit: bool,
    pub widget: UploadWidget,
    pub surface: ViewSurface,
    pub input: String,
    pub samples: Vec<SelectedFile>,
    pub sample_list_state: ListState,
    /// Sample index picked up by a mouse drag, until the button is released.
    pub dragging_sample: Option<usize>,
    pub spinner_frame: usize,
    pub last_settled: Option<(String, DateTime<Utc>)>,
    pub result_scroll: usize,
    pub show_logs: bool,
    pub log_content: Vec<String>,
    pub log_horizontal_scroll: usize,
    pub log_horizontal_scroll_state: ScrollbarState,
    /// Hit areas captured during the last render, for mouse dispatch.
    pub samples_area: Rect,
    pub drop_area: Rect,
}

impl App {
    pub fn new(samples: Vec<SelectedFile>) -> Self {
        let mut sample_list_state = ListState::default();
        if !samples.is_empty() {
            sample_list_state.select(Some(0));
        }
        Self {
            should_quit: false,
            widget: UploadWidget::new(Box::new(ClassificationRenderer::default())),
            surface: ViewSurface::default(),
            input: String::new(),
            samples,
            sample_list_state,
            dragging_sample: None,
            spinner_frame: 0,
            last_settled: None,
            result_scroll: 0,
            show_logs: false,
            log_content: Vec::new(),
            log_horizontal_scroll: 0,
            log_horizontal_scroll_state: ScrollbarState::default(),
            samples_area: Rect::default(),
            drop_area: Rect::default(),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn on_tick(&mut self) {
        if self.widget.is_busy() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
        if self.show_logs {
            self.refresh_logs();
        }
    }

    /// The sample under the list cursor, if any.
    pub fn selected_sample(&self) -> Option<SelectedFile> {
        let index = self.sample_list_state.selected()?;
        self.samples.get(index).cloned()
    }

    pub fn select_next_sample(&mut self) {
        if self.samples.is_empty() {
            return;
        }
        let next = match self.sample_list_state.selected() {
            Some(i) => (i + 1) % self.samples.len(),
            None => 0,
        };
        self.sample_list_state.select(Some(next));
    }

    pub fn select_previous_sample(&mut self) {
        if self.samples.is_empty() {
            return;
        }
        let previous = match self.sample_list_state.selected() {
            Some(0) | None => self.samples.len() - 1,
            Some(i) => i - 1,
        };
        self.sample_list_state.select(Some(previous));
    }

    /// Index of the sample row at a given terminal position, if the position
    /// lies on one inside the sample list's inner area.
    pub fn sample_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = self.samples_area.inner(ratatui::layout::Margin::new(1, 1));
        if !inner.contains(ratatui::layout::Position::new(column, row)) {
            return None;
        }
        let index = (row - inner.y) as usize;
        (index < self.samples.len()).then_some(index)
    }

    /// Feeds a finished upload into the widget. Superseded outcomes change
    /// nothing; the current one updates the footer's settle note.
    pub fn on_upload_settled(&mut self, outcome: UploadOutcome) {
        let name = outcome.file_name.clone();
        let at = outcome.received_at;
        if self.widget.on_upload_settled(&mut self.surface, outcome) {
            self.last_settled = Some((name, at));
            self.result_scroll = 0;
        }
    }

    pub fn scroll_result_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn scroll_result_down(&mut self) {
        self.result_scroll = self.result_scroll.saturating_add(1);
    }

    /// Back to a fresh screen for the next upload.
    pub fn reset(&mut self) {
        self.widget.reset(&mut self.surface);
        self.input = String::new();
        self.surface.error = None;
        self.surface.current_sample = None;
        self.last_settled = None;
        self.result_scroll = 0;
    }

    /// Tails the log file into the panel's line buffer.
    fn refresh_logs(&mut self) {
        let Ok(contents) = std::fs::read_to_string(logging::log_file_path()) else {
            return;
        };
        let lines: Vec<String> = contents.lines().map(String::from).collect();
        let start = lines.len().saturating_sub(LOG_TAIL_LINES);
        self.log_content = lines[start..].to_vec();
    }

    pub fn scroll_logs_left(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_sub(4);
        self.log_horizontal_scroll_state = self
            .log_horizontal_scroll_state
            .position(self.log_horizontal_scroll);
    }

    pub fn scroll_logs_right(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_add(4);
        self.log_horizontal_scroll_state = self
            .log_horizontal_scroll_state
            .position(self.log_horizontal_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn app_with_samples(names: &[&str]) -> App {
        App::new(
            names
                .iter()
                .map(|n| SelectedFile::from_path(PathBuf::from(format!("/samples/{}", n))))
                .collect(),
        )
    }

    #[test]
    fn sample_selection_wraps_in_both_directions() {
        let mut app = app_with_samples(&["a.jpg", "b.jpg", "c.jpg"]);
        assert_eq!(app.sample_list_state.selected(), Some(0));

        app.select_previous_sample();
        assert_eq!(app.sample_list_state.selected(), Some(2));
        app.select_next_sample();
        assert_eq!(app.sample_list_state.selected(), Some(0));
    }

    #[test]
    fn selection_is_a_no_op_without_samples() {
        let mut app = app_with_samples(&[]);
        app.select_next_sample();
        app.select_previous_sample();
        assert_eq!(app.sample_list_state.selected(), None);
        assert!(app.selected_sample().is_none());
    }

    #[test]
    fn sample_hit_testing_respects_the_list_border() {
        let mut app = app_with_samples(&["a.jpg", "b.jpg"]);
        app.samples_area = Rect::new(0, 0, 20, 10);

        // On the border: no hit.
        assert_eq!(app.sample_at(0, 0), None);
        // First row inside the border.
        assert_eq!(app.sample_at(1, 1), Some(0));
        assert_eq!(app.sample_at(5, 2), Some(1));
        // Inside the block but below the last sample row.
        assert_eq!(app.sample_at(5, 3), None);
        // A different pane entirely.
        assert_eq!(app.sample_at(30, 1), None);
    }

    #[test]
    fn show_busy_clears_a_previous_error() {
        let mut surface = ViewSurface::default();
        surface.show_error("boom".to_string());
        assert!(surface.error.is_some());
        surface.show_busy();
        assert!(surface.error.is_none());
        assert!(surface.busy);
    }
}
