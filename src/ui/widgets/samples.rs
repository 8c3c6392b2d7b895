// src/ui/widgets/samples.rs

use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};

/// Renders the sample image list.
///
/// The entry whose prediction is on display carries a "current" marker; it is
/// cleared the moment any new upload starts, mirroring how the sample tiles
/// lose their highlight on the original page.
pub fn render_samples(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Samples (Enter or drag →)");

    if app.samples.is_empty() {
        let empty = ratatui::widgets::Paragraph::new("No sample images found.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let is_current = app.surface.current_sample == Some(index);
            let marker = if is_current { "▶ " } else { "  " };
            let style = if is_current {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::styled(sample.name.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(list, area, &mut app.sample_list_state);
}
