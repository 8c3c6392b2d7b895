// src/ui/mod.rs

use crate::app::App;
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area(), app.show_logs);

    // Remember the hit areas so the mouse handler can map positions back to
    // the sample list and the drop target.
    app.samples_area = layout.samples;
    app.drop_area = layout.preview;

    widgets::input::render_input(frame, app, layout.input);
    widgets::samples::render_samples(frame, app, layout.samples);
    widgets::preview::render_preview(frame, app, layout.preview);
    widgets::results::render_results(frame, app, layout.result);
    if app.show_logs {
        widgets::log_view::render_log_view(frame, app, layout.log_panel);
    }
    widgets::footer::render_footer(frame, app, layout.footer);
}
