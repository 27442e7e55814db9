use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use crate::app::AppState;

pub fn render_results_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let list = app.selection.working_list();
    let edit_mode = app.selection.edit_mode();
    let start = (app.cursor / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(list.len());
    let slice = &list[start.min(end)..end];

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let style = if start + i == app.cursor {
            Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let mut cells = Vec::with_capacity(4);
        if edit_mode {
            let mark = if app.selection.is_selected(u.id) { "[x]" } else { "[ ]" };
            cells.push(Cell::from(mark));
        }
        cells.push(Cell::from(u.id.to_string()));
        cells.push(Cell::from(u.login.clone()));
        cells.push(Cell::from(u.html_url.clone()));
        Row::new(cells).style(style)
    });

    let mut widths = Vec::with_capacity(4);
    let mut header = Vec::with_capacity(4);
    if edit_mode {
        widths.push(Constraint::Length(3));
        header.push("SEL");
    }
    widths.extend([Constraint::Length(10), Constraint::Length(24), Constraint::Min(10)]);
    header.extend(["ID", "LOGIN", "PROFILE"]);

    let title = format!("Users ({})", list.len());
    let table = Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

pub fn render_user_details(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match app.highlighted() {
        Some(u) => {
            let selected = if app.selection.is_selected(u.id) { "yes" } else { "no" };
            format!(
                "Login: {}\nID: {}\nProfile: {}\nAvatar: {}\nSelected: {selected}",
                u.login, u.id, u.html_url, u.avatar_url
            )
        }
        None => String::new(),
    };
    let p = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title("Details")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}
