//! gh-user-search binary entry point.
//!
//! Parses the command line, installs file logging, starts the tokio runtime
//! that carries search requests, runs the TUI event loop, and restores the
//! terminal state on exit.
//!
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use gh_user_search::app::config::{self, Settings};
use gh_user_search::app::keymap::Keymap;
use gh_user_search::app::{self, AppState, Theme};
use gh_user_search::github::{ClientConfig, GithubClient};

#[derive(Parser, Debug)]
#[command(name = "gh-user-search", version, about = "Search GitHub users from the terminal")]
struct Cli {
    /// Query to search for at startup.
    #[arg(short, long)]
    query: Option<String>,
    /// Minimum trimmed query length before a search is sent.
    #[arg(long)]
    min_query_length: Option<usize>,
    /// Idle time after the last keystroke before searching.
    #[arg(long)]
    debounce_ms: Option<u64>,
    /// Base URL of the GitHub REST API.
    #[arg(long, env = "GH_USER_SEARCH_API")]
    api_base_url: Option<String>,
    /// Directory holding settings.conf, theme.conf and keybinds.conf.
    #[arg(long, env = "GH_USER_SEARCH_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
    /// Log file (the terminal is taken by the UI).
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(n) = self.min_query_length {
            settings.min_query_length = n;
        }
        if let Some(ms) = self.debounce_ms {
            settings.debounce_ms = ms;
        }
        if let Some(url) = &self.api_base_url {
            settings.api_base_url = url.clone();
        }
    }
}

fn init_tracing(path: &Path, level: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install tracing subscriber: {e}"))
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = cli.config_dir.as_deref();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| config::config_file_write_path(dir, "gh-user-search.log"));
    init_tracing(&log_path, &cli.log_level)?;

    let mut settings = Settings::load_or_init(dir);
    cli.apply_to(&mut settings);
    let theme = Theme::load_or_init(&config::config_file_write_path(dir, config::THEME_FILE));
    let keymap = Keymap::load_or_init(&config::config_file_write_path(dir, config::KEYBINDS_FILE));
    tracing::info!(?settings, "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    let _guard = runtime.enter();

    let client = GithubClient::new(ClientConfig {
        base_url: settings.api_base_url.clone(),
        ..ClientConfig::default()
    })
    .context("build HTTP client")?;

    let mut app = AppState::new(Arc::new(client), settings, theme, keymap);
    if let Some(q) = &cli.query {
        app.set_query(q.clone());
    }

    let mut terminal = init_terminal().context("init terminal")?;
    let res = app::run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);
    drop(app);

    if let Err(err) = &res {
        tracing::error!("application error: {err:#}");
        eprintln!("application error: {err:#}");
    }
    res
}
