use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState};
use crate::ui;

const TICK: Duration = Duration::from_millis(100);

/// Whether the event loop should keep running after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    info!("event loop started");
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key) == Flow::Quit {
                    break;
                }
            }
        }
        app.tick();
    }
    info!("event loop finished");
    Ok(())
}

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => {
            handle_search_key(app, key);
            Flow::Continue
        }
        InputMode::Modal => {
            handle_modal_key(app, key.code);
            Flow::Continue
        }
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            let mut q = app.query.clone();
            q.pop();
            app.set_query(q);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.set_query(""),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut q = app.query.clone();
            q.push(c);
            app.set_query(q);
        }
        _ => {}
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    apply_action(app, action)
}

pub fn apply_action(app: &mut AppState, action: KeyAction) -> Flow {
    let edit_mode = app.selection.edit_mode();
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::ToggleEditMode => app.selection.toggle_edit_mode(),
        KeyAction::ToggleSelect if edit_mode => {
            if let Some(user) = app.highlighted().cloned() {
                app.selection.toggle_select(&user);
            }
        }
        KeyAction::ToggleSelectAll if edit_mode => app.selection.toggle_select_all(),
        KeyAction::DuplicateSelected if edit_mode => {
            debug!(count = app.selection.selected_count(), "duplicating selection");
            app.selection.duplicate_selected();
        }
        KeyAction::DeleteSelected if edit_mode => {
            debug!(count = app.selection.selected_count(), "deleting selection");
            app.selection.delete_selected();
            app.clamp_cursor();
        }
        KeyAction::ToggleSelect
        | KeyAction::ToggleSelectAll
        | KeyAction::DuplicateSelected
        | KeyAction::DeleteSelected => {}
        KeyAction::OpenProfile => open_profile(app),
        KeyAction::OpenHelp => {
            app.modal = Some(ModalState::Help { scroll: 0 });
            app.input_mode = InputMode::Modal;
        }
        KeyAction::ToggleKeybindsPane => app.show_keybinds = !app.show_keybinds,
        KeyAction::MoveUp => app.cursor = app.cursor.saturating_sub(1),
        KeyAction::MoveDown => {
            app.cursor = app.cursor.saturating_add(1);
            app.clamp_cursor();
        }
        KeyAction::PageUp => app.cursor = app.cursor.saturating_sub(app.rows_per_page.max(1)),
        KeyAction::PageDown => {
            app.cursor = app.cursor.saturating_add(app.rows_per_page.max(1));
            app.clamp_cursor();
        }
        KeyAction::Ignore => {}
    }
    Flow::Continue
}

fn open_profile(app: &mut AppState) {
    let Some(url) = app.highlighted().map(|u| u.html_url.clone()) else {
        return;
    };
    if url.is_empty() {
        return;
    }
    if let Err(e) = open::that(&url) {
        warn!(%url, "could not open profile: {e}");
        app.modal = Some(ModalState::Info {
            message: format!("Could not open {url}: {e}"),
        });
        app.input_mode = InputMode::Modal;
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => close_modal(app),
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            _ => {}
        },
        Some(ModalState::Info { .. }) => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                close_modal(app);
            }
        }
        None => app.input_mode = InputMode::Normal,
    }
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}
