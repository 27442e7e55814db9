//! Settings configuration: parse/write `settings.conf` and locate config files.
//!
//! All configuration files share one format: `<key> = <value>` lines, with
//! `#` comments and blank lines ignored. Files are looked up in the config
//! directory (`$XDG_CONFIG_HOME/gh-user-search`, else
//! `~/.config/gh-user-search`) and then in the working directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::github::DEFAULT_API_BASE_URL;
use crate::search::{DEFAULT_DEBOUNCE, DEFAULT_MIN_QUERY_LENGTH, SearchConfig};

pub const APP_DIR: &str = "gh-user-search";
pub const SETTINGS_FILE: &str = "settings.conf";
pub const THEME_FILE: &str = "theme.conf";
pub const KEYBINDS_FILE: &str = "keybinds.conf";

/// Per-user config directory, if one can be determined from the environment.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg).join(APP_DIR));
    }
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(|home| PathBuf::from(home).join(".config").join(APP_DIR))
}

/// First existing location of `name`: the config directory, then the working directory.
pub fn config_file_read_path(name: &str) -> Option<PathBuf> {
    config_dir()
        .map(|dir| dir.join(name))
        .into_iter()
        .chain(std::iter::once(PathBuf::from(name)))
        .find(|p| p.exists())
}

/// Where `name` should be written inside `dir` (or the default config dir).
pub fn config_file_write_path(dir: Option<&Path>, name: &str) -> PathBuf {
    match dir.map(Path::to_path_buf).or_else(config_dir) {
        Some(dir) => {
            let _ = std::fs::create_dir_all(&dir);
            dir.join(name)
        }
        None => PathBuf::from(name),
    }
}

/// Split a config file into trimmed `(key, value)` pairs.
pub fn parse_kv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (lhs, rhs) = line.split_once('=')?;
            let (lhs, rhs) = (lhs.trim(), rhs.trim());
            (!lhs.is_empty() && !rhs.is_empty()).then_some((lhs, rhs))
        })
        .collect()
}

pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Tunables read from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub min_query_length: usize,
    pub debounce_ms: u64,
    pub api_base_url: String,
    /// Whether edit mode is on at startup.
    pub edit_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            edit_mode: true,
        }
    }
}

impl Settings {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            min_query_length: self.min_query_length,
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }

    /// Parse settings text; unknown keys and malformed values keep their defaults.
    pub fn parse(contents: &str) -> Self {
        let mut s = Self::default();
        for (key, value) in parse_kv(contents) {
            match key {
                "min_query_length" => {
                    if let Ok(v) = value.parse() {
                        s.min_query_length = v;
                    }
                }
                "debounce_ms" => {
                    if let Ok(v) = value.parse() {
                        s.debounce_ms = v;
                    }
                }
                "api_base_url" => s.api_base_url = value.to_string(),
                "edit_mode" => {
                    if let Some(v) = parse_bool(value) {
                        s.edit_mode = v;
                    }
                }
                _ => tracing::debug!(key, "ignoring unknown settings key"),
            }
        }
        s
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        let buf = format!(
            "# gh-user-search settings\n\
             # Minimum trimmed query length before a search is sent\n\
             min_query_length = {}\n\
             # Idle time after the last keystroke before searching (milliseconds)\n\
             debounce_ms = {}\n\
             api_base_url = {}\n\
             # Start with edit mode (selection, duplicate, delete) enabled\n\
             edit_mode = {}\n",
            self.min_query_length, self.debounce_ms, self.api_base_url, self.edit_mode
        );
        std::fs::write(path, buf)
    }

    /// Load `settings.conf` from `dir` (or the standard locations), writing
    /// defaults there on first run.
    pub fn load_or_init(dir: Option<&Path>) -> Self {
        if let Some(dir) = dir {
            let path = dir.join(SETTINGS_FILE);
            if path.exists() {
                return Self::from_file(&path).unwrap_or_default();
            }
        } else if let Some(existing) = config_file_read_path(SETTINGS_FILE) {
            return Self::from_file(&existing).unwrap_or_default();
        }
        let settings = Self::default();
        let path = config_file_write_path(dir, SETTINGS_FILE);
        if let Err(e) = settings.write_file(&path) {
            tracing::warn!(path = %path.display(), "could not write default settings: {e}");
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kv_skips_comments_and_blanks() {
        let pairs = parse_kv("# header\n\n a = 1 \nb=\n=c\nd = x = y\n");
        assert_eq!(pairs, vec![("a", "1"), ("d", "x = y")]);
    }

    #[test]
    fn settings_parse_overrides_known_keys() {
        let s = Settings::parse(
            "min_query_length = 3\ndebounce_ms = 250\napi_base_url = http://localhost:1\nedit_mode = off\n",
        );
        assert_eq!(s.min_query_length, 3);
        assert_eq!(s.debounce_ms, 250);
        assert_eq!(s.api_base_url, "http://localhost:1");
        assert!(!s.edit_mode);
        assert_eq!(s.search_config().debounce, Duration::from_millis(250));
    }

    #[test]
    fn settings_parse_keeps_defaults_on_garbage() {
        let s = Settings::parse("min_query_length = many\nedit_mode = maybe\ncolour = red\n");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("perhaps"), None);
    }
}
