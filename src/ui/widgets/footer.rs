// src/ui/widgets/footer.rs

use crate::app::App;
use crate::core::widget::UiState;
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Renders the footer: an error if the last upload failed, otherwise the key
/// hints for the current state.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(error) = &app.surface.error {
        let line = Line::from(vec![
            Span::styled("✗ ", Style::new().fg(Color::Red).bold()),
            Span::styled(error.clone(), Style::new().fg(Color::Red)),
            Span::raw("  (pick a file to try again)"),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
        return;
    }

    let spans = match app.widget.state() {
        UiState::Idle => Line::from(vec![
            Span::raw("Type a path + "),
            Span::styled("Enter", Style::new().bold().fg(Color::Yellow)),
            Span::raw(", or "),
            Span::styled("Tab/↑/↓", Style::new().bold().fg(Color::Yellow)),
            Span::raw(" + "),
            Span::styled("Enter", Style::new().bold().fg(Color::Yellow)),
            Span::raw(" for a sample. "),
            Span::styled("Ctrl+L", Style::new().bold().fg(Color::Yellow)),
            Span::raw(" logs, "),
            Span::styled("Esc", Style::new().bold().fg(Color::Yellow)),
            Span::raw(" quit."),
        ]),
        UiState::Uploading => Line::from("Uploading... Press Esc to quit."),
        UiState::Settled => {
            let mut spans = vec![
                Span::styled("[N]", Style::new().bold().fg(Color::Yellow)),
                Span::raw("ew upload, "),
                Span::styled("[Enter]", Style::new().bold().fg(Color::Yellow)),
                Span::raw(" re-run sample, "),
                Span::styled("[Esc]", Style::new().bold().fg(Color::Yellow)),
                Span::raw(" quit."),
            ];
            if let Some((name, at)) = &app.last_settled {
                spans.push(Span::styled(
                    format!("  {} settled at {}", name, at.format("%H:%M:%S")),
                    Style::new().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
