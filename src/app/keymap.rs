//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Bindings map `(KeyModifiers, KeyCode)` pairs to semantic [`KeyAction`]s.
//! A config file only needs to list the bindings it changes; everything else
//! keeps its default.

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions available in normal mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Focus the query input.
    StartSearch,
    /// Switch edit mode (selection, duplicate, delete) on or off.
    ToggleEditMode,
    /// Select or unselect the highlighted user.
    ToggleSelect,
    /// Select every user, or clear the selection when all are selected.
    ToggleSelectAll,
    /// Append copies of the selected users.
    DuplicateSelected,
    /// Remove the selected users from the list.
    DeleteSelected,
    /// Open the highlighted user's profile in the browser.
    OpenProfile,
    OpenHelp,
    ToggleKeybindsPane,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Bound keys that should do nothing.
    Ignore,
}

const ACTION_NAMES: &[(KeyAction, &str)] = &[
    (KeyAction::Quit, "Quit"),
    (KeyAction::StartSearch, "StartSearch"),
    (KeyAction::ToggleEditMode, "ToggleEditMode"),
    (KeyAction::ToggleSelect, "ToggleSelect"),
    (KeyAction::ToggleSelectAll, "ToggleSelectAll"),
    (KeyAction::DuplicateSelected, "DuplicateSelected"),
    (KeyAction::DeleteSelected, "DeleteSelected"),
    (KeyAction::OpenProfile, "OpenProfile"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::ToggleKeybindsPane, "ToggleKeybindsPane"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::PageUp, "PageUp"),
    (KeyAction::PageDown, "PageDown"),
    (KeyAction::Ignore, "Ignore"),
];

impl KeyAction {
    pub fn name(self) -> &'static str {
        ACTION_NAMES
            .iter()
            .find(|(a, _)| *a == self)
            .map(|(_, n)| *n)
            .unwrap_or("Ignore")
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        ACTION_NAMES.iter().find(|(_, n)| *n == s).map(|(a, _)| *a)
    }

    /// Human label for the keybindings panel.
    pub fn label(self) -> &'static str {
        match self {
            KeyAction::Quit => "Quit",
            KeyAction::StartSearch => "Search",
            KeyAction::ToggleEditMode => "Edit mode",
            KeyAction::ToggleSelect => "Select",
            KeyAction::ToggleSelectAll => "Select all",
            KeyAction::DuplicateSelected => "Duplicate selected",
            KeyAction::DeleteSelected => "Delete selected",
            KeyAction::OpenProfile => "Open profile",
            KeyAction::OpenHelp => "Help",
            KeyAction::ToggleKeybindsPane => "Toggle keybindings",
            KeyAction::MoveUp => "Move up",
            KeyAction::MoveDown => "Move down",
            KeyAction::PageUp => "Page up",
            KeyAction::PageDown => "Page down",
            KeyAction::Ignore => "",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let defaults = [
            ((M::NONE, Char('q')), KeyAction::Quit),
            ((M::NONE, Esc), KeyAction::Ignore),
            ((M::NONE, Char('/')), KeyAction::StartSearch),
            ((M::NONE, Char('e')), KeyAction::ToggleEditMode),
            ((M::NONE, Char(' ')), KeyAction::ToggleSelect),
            ((M::NONE, Char('a')), KeyAction::ToggleSelectAll),
            ((M::NONE, Char('d')), KeyAction::DuplicateSelected),
            ((M::NONE, Delete), KeyAction::DeleteSelected),
            ((M::NONE, Char('x')), KeyAction::DeleteSelected),
            ((M::NONE, Enter), KeyAction::OpenProfile),
            ((M::NONE, Char('o')), KeyAction::OpenProfile),
            ((M::NONE, Char('?')), KeyAction::OpenHelp),
            // Terminals disagree on how Shift+k is reported
            ((M::SHIFT, Char('K')), KeyAction::ToggleKeybindsPane),
            ((M::SHIFT, Char('k')), KeyAction::ToggleKeybindsPane),
            ((M::NONE, Char('K')), KeyAction::ToggleKeybindsPane),
            ((M::NONE, Up), KeyAction::MoveUp),
            ((M::NONE, Down), KeyAction::MoveDown),
            ((M::NONE, Char('k')), KeyAction::MoveUp),
            ((M::NONE, Char('j')), KeyAction::MoveDown),
            ((M::NONE, PageUp), KeyAction::PageUp),
            ((M::NONE, PageDown), KeyAction::PageDown),
            ((M::NONE, Left), KeyAction::PageUp),
            ((M::NONE, Right), KeyAction::PageDown),
            ((M::NONE, Char('h')), KeyAction::PageUp),
            ((M::NONE, Char('l')), KeyAction::PageDown),
        ];
        Self {
            bindings: defaults.into_iter().collect(),
        }
    }

    /// Load `path`, or the first `keybinds.conf` in the standard locations,
    /// writing the defaults to `path` when neither exists.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        if let Some(existing) = super::config::config_file_read_path(super::config::KEYBINDS_FILE) {
            return Self::from_file(&existing).unwrap_or_default();
        }
        let km = Self::default();
        let _ = km.write_file(path);
        km
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Defaults overridden by `<Action> = <KeySpec>` lines
    /// (`<KeySpec> = <Action>` is accepted too).
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for (lhs, rhs) in super::config::parse_kv(contents) {
            if let (Some(action), Some(key)) = (KeyAction::parse(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
            } else if let (Some(key), Some(action)) = (parse_key(lhs), KeyAction::parse(rhs)) {
                map.bindings.insert(key, action);
            }
        }
        map
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# gh-user-search keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Enter, Esc, Space, Delete, Up, Down, Left, Right, PageUp, PageDown, /\n");
        let names: Vec<&str> = ACTION_NAMES.iter().map(|(_, n)| *n).collect();
        let _ = writeln!(&mut buf, "# Actions: {}\n", names.join(", "));

        let mut rows: Vec<(String, &str)> = self
            .bindings
            .iter()
            .filter(|((mods, _), _)| !mods.contains(KeyModifiers::SHIFT))
            .map(|((mods, code), action)| (Self::format_key(*mods, *code), action.name()))
            .collect();
        rows.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(&b.0)));
        for (key, action) in rows {
            let _ = writeln!(&mut buf, "{action} = {key}");
        }
        std::fs::write(path, buf)
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Format a key into a spec like `Ctrl+q` or `Space`.
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        let base = match code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            _ => format!("{code:?}"),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{base}")
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let spec = spec.trim();
    let (mods, rest) = match spec.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, spec),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Space" => Char(' '),
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Backspace" => Backspace,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(mods: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn defaults_cover_bulk_edit_actions() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char(' '))), Some(KeyAction::ToggleSelect));
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('d'))), Some(KeyAction::DuplicateSelected));
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Delete)), Some(KeyAction::DeleteSelected));
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('z'))), None);
    }

    #[test]
    fn parse_accepts_both_orders_and_ctrl() {
        let km = Keymap::parse("Quit = Ctrl+c\nSpace = ToggleSelectAll\nBogus = q\n");
        assert_eq!(km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('c'))), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char(' '))), Some(KeyAction::ToggleSelectAll));
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('q'))), Some(KeyAction::Quit));
    }

    #[test]
    fn key_specs_round_trip() {
        for spec in ["Space", "Ctrl+q", "Enter", "PageDown", "/"] {
            let (mods, code) = parse_key(spec).expect("parses");
            assert_eq!(Keymap::format_key(mods, code), spec);
        }
        assert!(parse_key("NotAKey").is_none());
    }

    #[test]
    fn action_names_round_trip() {
        for (action, name) in ACTION_NAMES {
            assert_eq!(KeyAction::parse(name), Some(*action));
            assert_eq!(action.name(), *name);
        }
    }
}
