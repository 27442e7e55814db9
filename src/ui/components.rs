//! Shared UI components (selection bar, status lines, panels, modals).
//!
use std::collections::{BTreeMap, BTreeSet};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, InputMode, StatusLine};
use crate::messages;

/// Select-all checkbox, selection counter, edit-mode switch and action hints.
pub fn render_selection_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let sel = &app.selection;
    let switch = if sel.edit_mode() { "[on ]" } else { "[off]" };
    let mut spans = vec![
        Span::styled(format!("{switch} Edit mode"), Style::default().fg(app.theme.accent)),
    ];
    if sel.edit_mode() {
        let all = if sel.is_all_selected() { "[x]" } else { "[ ]" };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("{all} {}", messages::selection_count(sel.selected_count())),
            Style::default().fg(app.theme.text),
        ));
        spans.push(Span::styled(
            "   a: all  space: select  d: duplicate  del: delete",
            Style::default().fg(app.theme.muted),
        ));
    }
    let p = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("Selection")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

pub fn render_status_line(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(status) = app.status_line() else {
        return;
    };
    let color = match status {
        StatusLine::Error(_) => app.theme.error,
        StatusLine::Loading => app.theme.highlight_fg,
        StatusLine::NoResults(_) | StatusLine::Hint(_) => app.theme.muted,
    };
    let p = Paragraph::new(format!(" {}", status.text())).style(Style::default().fg(color));
    f.render_widget(p, area);
}

/// Render the bottom status bar with mode, counts and rate-limit notice.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let state = app.search.state();
    let mut msg = format!(
        "mode: {mode}  shown:{}  total:{}  selected:{}",
        app.selection.working_list().len(),
        state.total_count,
        app.selection.selected_count(),
    );
    if state.is_rate_limited {
        match state.rate_limit_reset_at {
            Some(at) => msg.push_str(&format!("  rate limited until {}", at.format("%H:%M:%S UTC"))),
            None => msg.push_str("  rate limited"),
        }
    }
    msg.push_str("  ?: help  q: quit");
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// Keybindings panel, grouped into general and navigation sections.
pub fn render_keybinds_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Keybindings")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);

    let mut general: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    let mut editing: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    let mut navigation: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    for ((mods, code), action) in app.keymap.all_bindings() {
        let section = match action {
            KeyAction::Quit
            | KeyAction::StartSearch
            | KeyAction::OpenProfile
            | KeyAction::OpenHelp
            | KeyAction::ToggleKeybindsPane => &mut general,
            KeyAction::ToggleEditMode
            | KeyAction::ToggleSelect
            | KeyAction::ToggleSelectAll
            | KeyAction::DuplicateSelected
            | KeyAction::DeleteSelected => &mut editing,
            KeyAction::MoveUp | KeyAction::MoveDown | KeyAction::PageUp | KeyAction::PageDown => {
                &mut navigation
            }
            KeyAction::Ignore => continue,
        };
        section
            .entry(action.label())
            .or_default()
            .insert(Keymap::format_key(mods, code));
    }

    let label_w = [&general, &editing, &navigation]
        .iter()
        .flat_map(|m| m.keys())
        .map(|k| k.len())
        .max()
        .unwrap_or(0)
        .min((inner.width as usize).saturating_sub(8));

    let mut lines: Vec<Line> = Vec::new();
    for (title, section) in [("General:", &general), ("Edit mode:", &editing), ("Navigation:", &navigation)] {
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))));
        for (label, keys) in section {
            let label: String = label.chars().take(label_w).collect();
            let joined = keys.iter().cloned().collect::<Vec<_>>().join(", ");
            lines.push(Line::from(vec![
                Span::raw(format!("  {label:>label_w$} │ ")),
                Span::styled(joined, Style::default().add_modifier(Modifier::ITALIC)),
            ]));
        }
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(block, area);
    f.render_widget(p, inner);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let width = 50u16.min(area.width.saturating_sub(4)).max(30);
    let approx_lines = (message.len() as u16 / width.saturating_sub(4).max(10)).max(1);
    let height = (approx_lines + 4).min(area.height.saturating_sub(4)).max(5);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Info")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = 20u16.min(area.height.saturating_sub(4)).max(10);
    let rect = centered_rect(width, height, area);

    let key = |k: &'static str| Span::styled(k, Style::default().add_modifier(Modifier::ITALIC));
    let bold = |t: &'static str| Line::from(Span::styled(t, Style::default().add_modifier(Modifier::BOLD)));
    let min_len = app.search.config().min_query_length;

    let lines: Vec<Line> = vec![
        bold("Search"),
        Line::from(vec![Span::raw("Start typing: "), key("/"), Span::raw(", leave with "), key("Enter / Esc")]),
        Line::raw(format!(
            "Results refresh after a short pause; queries under {min_len} characters are not sent."
        )),
        Line::from(vec![Span::raw("Clear the query: "), key("Ctrl+u")]),
        Line::raw(""),
        bold("Edit mode"),
        Line::from(vec![Span::raw("Toggle edit mode: "), key("e")]),
        Line::from(vec![Span::raw("Select highlighted user: "), key("Space")]),
        Line::from(vec![Span::raw("Select all / none: "), key("a")]),
        Line::from(vec![Span::raw("Duplicate selected: "), key("d")]),
        Line::from(vec![Span::raw("Delete selected: "), key("Delete / x")]),
        Line::raw("Edits apply to the current results only; a new search replaces them."),
        Line::raw(""),
        bold("General"),
        Line::from(vec![Span::raw("Move: "), key("Up/Down, j/k; PageUp/PageDown, h/l")]),
        Line::from(vec![Span::raw("Open profile in browser: "), key("Enter / o")]),
        Line::from(vec![Span::raw("Keybindings panel: "), key("Shift+K")]),
        Line::from(vec![Span::raw("Quit: "), key("q")]),
        Line::raw(""),
        Line::from(vec![Span::raw("Close help: "), key("Esc / Enter")]),
    ];

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
