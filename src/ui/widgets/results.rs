// src/ui/widgets/results.rs

use crate::app::{App, SPINNER_CHARS};
use crate::core::render::{LabelScore, RenderedBody, RenderedResult};
use crate::core::widget::UiState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

/// Renders the prediction pane based on the widget state.
pub fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Prediction");

    match app.widget.state() {
        UiState::Idle => {
            let placeholder = Paragraph::new("The prediction will appear here.")
                .block(block)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(placeholder, area);
        }
        UiState::Uploading => {
            // Busy indicator #2, the result-side twin of the preview spinner.
            let spinner_char = SPINNER_CHARS[app.spinner_frame];
            let busy = Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{} ", spinner_char),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw("Waiting for the model..."),
            ]))
            .block(block)
            .alignment(Alignment::Center);
            frame.render_widget(busy, area);
        }
        UiState::Settled => {
            let Some(rendered) = &app.surface.result else {
                frame.render_widget(block, area);
                return;
            };
            render_settled(frame, app, rendered, block, area);
        }
    }
}

fn render_settled(
    frame: &mut Frame,
    app: &App,
    rendered: &RenderedResult,
    block: Block,
    area: Rect,
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &rendered.body {
        RenderedBody::Labels(labels) => render_labels(frame, labels, &rendered.meta, inner),
        RenderedBody::Text(text) => {
            let mut lines = vec![Line::from(Span::styled(
                text.clone(),
                Style::default().fg(Color::Green).bold(),
            ))];
            lines.extend(meta_lines(&rendered.meta));
            let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
            frame.render_widget(paragraph, inner);
        }
        RenderedBody::Raw(raw) => {
            let paragraph = Paragraph::new(raw.as_str())
                .wrap(Wrap { trim: false })
                .scroll((app.result_scroll as u16, 0));
            frame.render_widget(paragraph, inner);
        }
    }
}

/// Ranked labels: the top entry gets a gauge, the rest a plain listing.
fn render_labels(frame: &mut Frame, labels: &[LabelScore], meta: &[(String, String)], area: Rect) {
    let Some(top) = labels.first() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let headline = Paragraph::new(Line::from(vec![
        Span::styled(top.label.clone(), Style::default().fg(Color::Green).bold()),
        Span::styled(
            format!("  {:.1}%", top.probability * 100.0),
            Style::default().fg(Color::Green),
        ),
    ]));
    frame.render_widget(headline, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(top.probability.clamp(0.0, 1.0));
    frame.render_widget(gauge, chunks[1]);

    let mut lines: Vec<Line> = labels
        .iter()
        .skip(1)
        .map(|entry| {
            Line::from(vec![
                Span::raw(format!("{:<24}", entry.label)),
                Span::styled(
                    format!("{:>6.1}%", entry.probability * 100.0),
                    Style::default().fg(Color::Cyan),
                ),
            ])
        })
        .collect();
    if !meta.is_empty() {
        lines.push(Line::from(""));
        lines.extend(meta_lines(meta));
    }
    let rest = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(rest, chunks[3]);
}

fn meta_lines(meta: &[(String, String)]) -> Vec<Line<'static>> {
    meta.iter()
        .map(|(key, value)| {
            Line::from(vec![
                Span::styled(format!("{}: ", key), Style::default().fg(Color::DarkGray)),
                Span::styled(value.clone(), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect()
}
