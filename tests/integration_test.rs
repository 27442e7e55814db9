// Integration tests for gh-user-search

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(tag: &str) -> PathBuf {
    let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let dir = std::env::temp_dir().join(format!("ghus_{tag}_{}_{}", std::process::id(), nonce));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

// 1) Settings, theme and keybindings survive a write/read cycle
#[test]
fn settings_roundtrip_and_init() {
    use gh_user_search::app::config::{SETTINGS_FILE, Settings};

    let dir = temp_dir("settings");
    let created = Settings::load_or_init(Some(&dir));
    assert_eq!(created, Settings::default());
    assert!(dir.join(SETTINGS_FILE).exists());

    let custom = Settings {
        min_query_length: 3,
        debounce_ms: 150,
        api_base_url: "http://127.0.0.1:9".to_string(),
        edit_mode: false,
    };
    custom.write_file(&dir.join(SETTINGS_FILE)).expect("write settings");
    assert_eq!(Settings::load_or_init(Some(&dir)), custom);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn theme_roundtrip() {
    use gh_user_search::app::Theme;
    use ratatui::style::Color;

    let dir = temp_dir("theme");
    let path = dir.join("theme.conf");
    let mut t = Theme::mocha();
    t.accent = Color::Rgb(1, 2, 3);
    t.highlight_bg = Color::Reset;
    t.write_file(&path).expect("write theme");

    let back = Theme::from_file(&path).expect("read theme");
    assert_eq!(back, t);
    assert_eq!(Theme::load_or_init(&path), t);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn keymap_roundtrip_keeps_custom_binding() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use gh_user_search::app::keymap::{KeyAction, Keymap};

    let dir = temp_dir("keys");
    let path = dir.join("keybinds.conf");
    let km = Keymap::parse("Quit = Ctrl+c\n");
    km.write_file(&path).expect("write keymap");

    let back = Keymap::from_file(&path).expect("read keymap");
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(back.resolve(&ctrl_c), Some(KeyAction::Quit));
    let del = KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE);
    assert_eq!(back.resolve(&del), Some(KeyAction::DeleteSelected));
    assert_eq!(back.all_bindings().len(), km.all_bindings().len());

    let _ = std::fs::remove_dir_all(&dir);
}

// 2) The app wired to a scripted search backend, driven by key events
mod app_flow {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use gh_user_search::app::config::Settings;
    use gh_user_search::app::keymap::Keymap;
    use gh_user_search::app::update::{Flow, handle_key};
    use gh_user_search::app::{AppState, InputMode, StatusLine, Theme};
    use gh_user_search::error::{SearchError, ServiceError};
    use gh_user_search::github::{GithubUser, SearchResponse, UserSearchApi};
    use gh_user_search::messages;
    use gh_user_search::search::cancel::CancelToken;

    /// Four users for "octo", none for "nobody", rate limited for "limited".
    struct ScriptedApi;

    #[async_trait]
    impl UserSearchApi for ScriptedApi {
        async fn search_users(&self, query: &str, _cancel: &CancelToken) -> Result<SearchResponse, SearchError> {
            match query {
                "octo" => Ok(SearchResponse {
                    total_count: 40,
                    incomplete_results: false,
                    items: (1..=4)
                        .map(|id| GithubUser {
                            id,
                            login: format!("octo{id}"),
                            avatar_url: String::new(),
                            html_url: format!("https://github.com/octo{id}"),
                        })
                        .collect(),
                }),
                "limited" => Err(ServiceError::rate_limited(None).into()),
                _ => Ok(SearchResponse::default()),
            }
        }
    }

    fn app() -> AppState {
        AppState::new(Arc::new(ScriptedApi), Settings::default(), Theme::mocha(), Keymap::default())
    }

    fn press(app: &mut AppState, code: KeyCode) -> Flow {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_query(app: &mut AppState, q: &str) {
        press(app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Search);
        for c in q.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    async fn settle(app: &mut AppState) {
        tokio::time::sleep(Duration::from_millis(500)).await;
        app.tick();
    }

    fn ids(app: &AppState) -> Vec<u64> {
        app.selection.working_list().iter().map(|u| u.id).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn search_then_bulk_edit_with_keys() {
        let mut app = app();
        type_query(&mut app, "octo");
        assert_eq!(app.query, "octo");
        assert_eq!(app.status_line(), Some(StatusLine::Loading));

        settle(&mut app).await;
        assert_eq!(ids(&app), vec![1, 2, 3, 4]);
        assert_eq!(app.search.state().total_count, 40);
        assert_eq!(app.status_line(), None);

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.selection.selected_ids(), &[1, 3]);
        assert_eq!(messages::selection_count(app.selection.selected_count()), "2 elements selected");

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(ids(&app), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(app.selection.working_list()[4].login, "octo1");
        assert_eq!(app.selection.working_list()[5].login, "octo3");

        press(&mut app, KeyCode::Delete);
        assert_eq!(ids(&app), vec![2, 4, 5, 6]);
        assert!(app.selection.selected_ids().is_empty());
        assert!(app.cursor < 4);

        // Selection keys do nothing outside edit mode
        press(&mut app, KeyCode::Char('e'));
        assert!(!app.selection.edit_mode());
        press(&mut app, KeyCode::Char('a'));
        assert!(app.selection.selected_ids().is_empty());

        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn new_results_discard_local_edits() {
        let mut app = app();
        type_query(&mut app, "octo");
        settle(&mut app).await;
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(ids(&app).len(), 8);

        // Shortening below the minimum clears results and shows the hint
        press(&mut app, KeyCode::Char('/'));
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.query, "o");
        assert!(ids(&app).is_empty());
        assert!(app.selection.selected_ids().is_empty());
        assert_eq!(app.status_line(), Some(StatusLine::Hint(messages::short_query_hint(2))));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_result_reports_no_user_found() {
        let mut app = app();
        type_query(&mut app, "nobody");
        settle(&mut app).await;
        let status = app.status_line().expect("status shown");
        assert_eq!(status, StatusLine::NoResults("nobody".into()));
        assert_eq!(status.text(), "No user found for \"nobody\"");
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_is_reported_and_remembered() {
        let mut app = app();
        type_query(&mut app, "limited");
        settle(&mut app).await;
        assert_eq!(app.status_line(), Some(StatusLine::Error(messages::RATE_LIMIT.into())));
        assert!(app.search.state().is_rate_limited);

        // Clearing the query resets results but keeps the rate-limit flag
        press(&mut app, KeyCode::Char('/'));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.query, "");
        assert_eq!(app.status_line(), None);
        assert!(app.search.state().is_rate_limited);
    }

    #[tokio::test(start_paused = true)]
    async fn help_modal_opens_and_closes() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, InputMode::Modal);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Continue);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.modal.is_none());
    }
}
