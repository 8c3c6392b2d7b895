// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Defines the areas of the application's user interface.
///
/// Each field is the `Rect` of one widget on screen, computed once per frame
/// so individual widgets never re-derive dimensions themselves.
pub struct AppLayout {
    pub input: Rect,
    pub samples: Rect,
    pub preview: Rect,
    pub result: Rect,
    pub log_panel: Rect,
    pub footer: Rect,
}

/// Splits the frame into the input bar, the three content panes (samples,
/// preview/drop target, prediction), an optional log panel, and the footer.
pub fn create_layout(frame_size: Rect, show_logs: bool) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame_size);

    let content_constraints = if show_logs {
        vec![
            Constraint::Percentage(20),
            Constraint::Percentage(28),
            Constraint::Percentage(27),
            Constraint::Percentage(25),
        ]
    } else {
        vec![
            Constraint::Percentage(24),
            Constraint::Percentage(38),
            Constraint::Percentage(38),
        ]
    };

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(content_constraints)
        .split(main_chunks[1]);

    AppLayout {
        input: main_chunks[0],
        samples: content_chunks[0],
        preview: content_chunks[1],
        result: content_chunks[2],
        log_panel: if show_logs {
            content_chunks[3]
        } else {
            Rect::default()
        },
        footer: main_chunks[2],
    }
}
