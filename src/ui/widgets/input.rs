// src/ui/widgets/input.rs

use crate::app::App;
use crate::core::widget::UiState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Renders the file path input box.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_block = Block::default().borders(Borders::ALL).title("Image Path");
    let input_paragraph = Paragraph::new(app.input.as_str())
        .block(input_block)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(input_paragraph, area);

    // Show the cursor only while the widget accepts a new selection.
    if let UiState::Idle = app.widget.state() {
        frame.set_cursor_position(Position::new(area.x + app.input.len() as u16 + 1, area.y + 1));
    }
}
