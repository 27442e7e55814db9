pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(root[3]);

    render_search_input(f, root[0], app);
    components::render_selection_bar(f, root[1], app);
    components::render_status_line(f, root[2], app);
    users::render_results_table(f, body[0], app);
    if app.show_keybinds {
        components::render_keybinds_panel(f, body[1], app);
    } else {
        users::render_user_details(f, body[1], app);
    }
    components::render_status_bar(f, root[4], app);

    if let Some(modal) = app.modal.clone() {
        render_modal(f, f.area(), app, &modal);
    }
}

fn render_search_input(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.input_mode == InputMode::Search;
    let (text, style) = if app.query.is_empty() && !focused {
        ("Search input (press / to type)".to_string(), Style::default().fg(app.theme.muted))
    } else {
        let cursor = if focused { "▏" } else { "" };
        (format!("{}{cursor}", app.query), Style::default().fg(app.theme.text))
    };
    let border = if focused { app.theme.highlight_fg } else { app.theme.border };
    let p = Paragraph::new(text).style(style).block(
        Block::default()
            .title("GitHub Search")
            .title_style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState, modal: &ModalState) {
    match modal {
        ModalState::Help { scroll } => components::render_help_modal(f, area, app, *scroll),
        ModalState::Info { message } => components::render_info_modal(f, area, app, message),
    }
}
