//! Application state types and entry glue.
//!
//! [`AppState`] composes the search controller and the selection store the
//! way the page composes them: the query feeds the controller, and the
//! controller's user list is the source of the selection store's working
//! copy. The event loop lives in [`update`] (re-exported as `run`).
//!
pub mod config;
pub mod keymap;
pub mod update;

use std::path::Path;
use std::sync::Arc;

use ratatui::style::Color;

use crate::github::{GithubUser, UserSearchApi};
use crate::messages;
use crate::search::SearchController;
use crate::selection::SelectionStore;
use config::Settings;
use keymap::Keymap;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    Help { scroll: u16 },
    Info { message: String },
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub accent: Color,
    pub error: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            accent: Color::Green,
            error: Color::Red,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
        }
    }

    /// Catppuccin Mocha.
    pub fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            accent: Color::Rgb(0xa6, 0xe3, 0xa1),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x31, 0x32, 0x44),
        }
    }

    fn slots(&mut self) -> [(&'static str, &mut Color); 10] {
        [
            ("text", &mut self.text),
            ("muted", &mut self.muted),
            ("title", &mut self.title),
            ("border", &mut self.border),
            ("accent", &mut self.accent),
            ("error", &mut self.error),
            ("status_bg", &mut self.status_bg),
            ("status_fg", &mut self.status_fg),
            ("highlight_fg", &mut self.highlight_fg),
            ("highlight_bg", &mut self.highlight_bg),
        ]
    }

    /// Parse `key = color` lines over the `mocha` defaults.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for (key, value) in config::parse_kv(contents) {
            let Some(color) = parse_color(value) else { continue };
            if let Some((_, slot)) = theme.slots().into_iter().find(|(k, _)| *k == key) {
                *slot = color;
            }
        }
        theme
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::from("# gh-user-search theme\n# Colors: #RRGGBB or 'reset'\n\n");
        let mut copy = *self;
        for (key, color) in copy.slots() {
            let _ = writeln!(&mut buf, "{key} = {}", color_to_str(*color));
        }
        std::fs::write(path, buf)
    }

    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        if let Some(existing) = config::config_file_read_path(config::THEME_FILE) {
            return Self::from_file(&existing).unwrap_or_else(Self::mocha);
        }
        let theme = Self::mocha();
        let _ = theme.write_file(path);
        theme
    }
}

/// Parse `#RRGGBB`, `RRGGBB` or `reset`.
fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_str(c: Color) -> String {
    match c {
        Color::Rgb(r, g, b) => format!("#{r:02X}{g:02X}{b:02X}"),
        Color::Black => "#000000".to_string(),
        Color::Red => "#FF0000".to_string(),
        Color::Green => "#00FF00".to_string(),
        Color::Yellow => "#FFFF00".to_string(),
        Color::Cyan => "#00FFFF".to_string(),
        Color::Gray => "#B3B3B3".to_string(),
        Color::DarkGray => "#4D4D4D".to_string(),
        Color::White => "#FFFFFF".to_string(),
        _ => "reset".to_string(),
    }
}

/// One-line feedback under the selection bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusLine {
    Loading,
    Error(String),
    NoResults(String),
    Hint(String),
}

impl StatusLine {
    pub fn text(&self) -> String {
        match self {
            StatusLine::Loading => messages::LOADING.to_string(),
            StatusLine::Error(m) | StatusLine::Hint(m) => m.clone(),
            StatusLine::NoResults(q) => messages::no_results(q),
        }
    }
}

pub struct AppState {
    pub search: SearchController,
    pub selection: SelectionStore<GithubUser>,
    pub query: String,
    /// Index of the highlighted row in the working list.
    pub cursor: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub modal: Option<ModalState>,
    pub theme: Theme,
    pub keymap: Keymap,
    pub show_keybinds: bool,
    pub settings: Settings,
}

impl AppState {
    /// Must be called from within a tokio runtime.
    pub fn new(api: Arc<dyn UserSearchApi>, settings: Settings, theme: Theme, keymap: Keymap) -> Self {
        let search = SearchController::new(api, settings.search_config());
        let mut selection = SelectionStore::new(settings.edit_mode);
        selection.sync_source(&search.state().users);
        Self {
            search,
            selection,
            query: String::new(),
            cursor: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            modal: None,
            theme,
            keymap,
            show_keybinds: false,
            settings,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.search.set_query(&self.query);
        self.sync_selection();
    }

    /// Apply finished searches and reseed the working list when the results changed.
    pub fn tick(&mut self) -> bool {
        let changed = self.search.poll();
        self.sync_selection() || changed
    }

    fn sync_selection(&mut self) -> bool {
        let reseeded = self.selection.sync_source(&self.search.state().users);
        if reseeded {
            self.cursor = 0;
        }
        self.clamp_cursor();
        reseeded
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.selection.working_list().len().saturating_sub(1));
    }

    pub fn highlighted(&self) -> Option<&GithubUser> {
        self.selection.working_list().get(self.cursor)
    }

    pub fn status_line(&self) -> Option<StatusLine> {
        let state = self.search.state();
        let config = self.search.config();
        if state.loading {
            Some(StatusLine::Loading)
        } else if let Some(msg) = &state.error_message {
            Some(StatusLine::Error(msg.clone()))
        } else if state.is_empty && config.accepts(&self.query) {
            Some(StatusLine::NoResults(self.query.clone()))
        } else if !self.query.is_empty() && !config.accepts(&self.query) {
            Some(StatusLine::Hint(messages::short_query_hint(config.min_query_length)))
        } else {
            None
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
