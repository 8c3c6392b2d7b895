// src/ui/widgets/preview.rs

use crate::app::{App, SPINNER_CHARS};
use crate::core::preview::{FilePreview, PreviewImage};
use crate::core::widget::UiState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Renders the preview pane, which doubles as the drop target.
///
/// While a drag hovers over it the border lights up, the terminal version of
/// the "dragging" class on the original drop box.
pub fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let (title, border_style) = if app.surface.drag_active {
        (
            "Drop to upload",
            Style::default().fg(Color::Yellow).bold(),
        )
    } else {
        ("Preview", Style::default())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    match app.widget.state() {
        UiState::Idle => {
            let instructions = Paragraph::new(
                "Type a path above and press Enter,\nor drag a sample here with the mouse.",
            )
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(instructions, area);
        }
        UiState::Uploading => {
            // Busy indicator #1: no preview is shown while the request is in
            // flight, only the spinner.
            let spinner_char = SPINNER_CHARS[app.spinner_frame];
            let busy = Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{} ", spinner_char),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw("Uploading..."),
            ]))
            .block(block)
            .alignment(Alignment::Center);
            frame.render_widget(busy, area);
        }
        UiState::Settled => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            match &app.surface.preview {
                Some(FilePreview::Image(image)) => {
                    render_thumbnail(frame.buffer_mut(), inner, image);
                }
                Some(FilePreview::Info { name, byte_count }) => {
                    let info = Paragraph::new(vec![
                        Line::from(""),
                        Line::from(Span::styled(name.clone(), Style::default().bold())),
                        Line::from(format!("{} bytes (no preview available)", byte_count)),
                    ])
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                    frame.render_widget(info, inner);
                }
                None => {}
            }
        }
    }
}

/// Paints the thumbnail with upper-half-block cells: each terminal row shows
/// two pixel rows, the top one as the foreground and the bottom one as the
/// background color.
fn render_thumbnail(buf: &mut Buffer, area: Rect, image: &PreviewImage) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    // One line is reserved for the caption under the image.
    let caption_rows = u16::from(area.height > 2);
    let max_rows = area.height - caption_rows;

    let cols = (image.width as u16).min(area.width);
    let rows = (image.height.div_ceil(2) as u16).min(max_rows);
    let x0 = area.x + (area.width - cols) / 2;
    let y0 = area.y + (max_rows - rows) / 2;

    for ty in 0..rows {
        for tx in 0..cols {
            let top = image.pixel(tx as u32, ty as u32 * 2).unwrap_or((0, 0, 0));
            let bottom = image
                .pixel(tx as u32, ty as u32 * 2 + 1)
                .unwrap_or((0, 0, 0));
            if let Some(cell) = buf.cell_mut(Position::new(x0 + tx, y0 + ty)) {
                cell.set_char('▀')
                    .set_fg(Color::Rgb(top.0, top.1, top.2))
                    .set_bg(Color::Rgb(bottom.0, bottom.1, bottom.2));
            }
        }
    }

    if caption_rows == 1 {
        let caption = format!(
            "{} ({}x{})",
            image.name, image.source_width, image.source_height
        );
        let caption_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        let caption_line = Paragraph::new(Line::from(Span::styled(
            caption,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        caption_line.render(caption_area, buf);
    }
}
