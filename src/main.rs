// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

mod app;
mod config;
mod core;
mod logging;
mod ui;

use app::App;
use crate::core::models::{SelectedFile, UploadOutcome, UploadRequest};
use crate::core::widget::UiState;

/// Everything an upload task needs, cloned into each spawn.
struct UploadContext {
    client: reqwest::Client,
    server: String,
    tx: mpsc::Sender<UploadOutcome>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;
    let cli = config::parse()?;
    info!(server = %cli.server, samples_dir = %cli.samples_dir.display(), "starting up");

    let samples = core::samples::discover_samples(&cli.samples_dir);
    let client = core::uploader::build_client()?;
    let (tx, mut rx) = mpsc::channel(4);
    let ctx = UploadContext {
        client,
        server: cli.server.clone(),
        tx,
    };

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new(samples);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, &ctx)?;
        }
        app.on_tick();

        while let Ok(outcome) = rx.try_recv() {
            app.on_upload_settled(outcome);
        }
    }

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

fn handle_events(app: &mut App, ctx: &UploadContext) -> Result<()> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, ctx, key),
        Event::Mouse(mouse) => handle_mouse(app, ctx, mouse),
        _ => {}
    }
    Ok(())
}

fn handle_key(app: &mut App, ctx: &UploadContext, key: KeyEvent) {
    // Global keys first, independent of the widget state.
    match key.code {
        KeyCode::Esc => {
            app.quit();
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return;
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.show_logs = !app.show_logs;
            return;
        }
        KeyCode::Left if app.show_logs => {
            app.scroll_logs_left();
            return;
        }
        KeyCode::Right if app.show_logs => {
            app.scroll_logs_right();
            return;
        }
        _ => {}
    }

    match app.widget.state() {
        UiState::Idle => handle_idle_key(app, ctx, key),
        UiState::Uploading => {}
        UiState::Settled => handle_settled_key(app, ctx, key),
    }
}

/// Input handling while waiting for a selection.
fn handle_idle_key(app: &mut App, ctx: &UploadContext, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => start_upload_from_selection(app, ctx),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Tab | KeyCode::Down => app.select_next_sample(),
        KeyCode::BackTab | KeyCode::Up => app.select_previous_sample(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.push(c);
        }
        _ => {}
    }
}

/// Input handling while a prediction is on display.
fn handle_settled_key(app: &mut App, ctx: &UploadContext, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => app.reset(),
        KeyCode::Enter => start_upload_from_selection(app, ctx),
        KeyCode::Tab => app.select_next_sample(),
        KeyCode::BackTab => app.select_previous_sample(),
        KeyCode::Up => app.scroll_result_up(),
        KeyCode::Down => app.scroll_result_down(),
        _ => {}
    }
}

/// Starts an upload for the typed path, or the highlighted sample when the
/// input box is empty. The widget guards an empty selection itself.
fn start_upload_from_selection(app: &mut App, ctx: &UploadContext) {
    let typed = app.input.trim();
    let (file, sample_index) = if typed.is_empty() {
        (app.selected_sample(), app.sample_list_state.selected())
    } else {
        (Some(SelectedFile::from_path(PathBuf::from(typed))), None)
    };

    if let Some(request) = app.widget.on_file_selected(&mut app.surface, file) {
        app.surface.current_sample = sample_index;
        spawn_upload(ctx, request);
    }
}

/// Maps mouse gestures onto the widget's drag-and-drop handlers: pressing on
/// a sample picks it up, dragging it across the preview pane highlights the
/// drop target, releasing over it drops the file.
fn handle_mouse(app: &mut App, ctx: &UploadContext, mouse: MouseEvent) {
    let position = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.sample_at(mouse.column, mouse.row) {
                app.sample_list_state.select(Some(index));
                app.dragging_sample = Some(index);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.dragging_sample.is_some() {
                let over_drop_target = app.drop_area.contains(position);
                if over_drop_target && !app.surface.drag_active {
                    app.widget.on_drag_over(&mut app.surface);
                } else if !over_drop_target && app.surface.drag_active {
                    app.widget.on_drag_leave(&mut app.surface);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(index) = app.dragging_sample.take() {
                if app.drop_area.contains(position) {
                    let file = app.samples.get(index).cloned();
                    // A consumed drop never reaches any other handler.
                    if let Some(request) = app.widget.on_drop(&mut app.surface, file) {
                        app.surface.current_sample = Some(index);
                        spawn_upload(ctx, request);
                    }
                } else if app.surface.drag_active {
                    app.widget.on_drag_leave(&mut app.surface);
                }
            }
        }
        _ => {}
    }
}

/// Fires the upload task. Its outcome comes back through the channel and is
/// applied (or discarded as superseded) by the widget on the next loop turn.
fn spawn_upload(ctx: &UploadContext, request: UploadRequest) {
    let client = ctx.client.clone();
    let server = ctx.server.clone();
    let tx = ctx.tx.clone();
    tokio::spawn(async move {
        let outcome = core::uploader::perform_upload(&client, &server, request).await;
        // The receiver only disappears during shutdown; the outcome can drop.
        let _ = tx.send(outcome).await;
    });
}
