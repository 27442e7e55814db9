// Unit tests for gh-user-search
// These exercise the public API of the library crate

#[cfg(test)]
mod selection_tests {
    use std::sync::Arc;

    use gh_user_search::github::GithubUser;
    use gh_user_search::selection::SelectionStore;

    fn user(id: u64) -> GithubUser {
        GithubUser {
            id,
            login: format!("login{id}"),
            avatar_url: format!("https://avatars.githubusercontent.com/u/{id}"),
            html_url: format!("https://github.com/login{id}"),
        }
    }

    fn store(ids: &[u64]) -> SelectionStore<GithubUser> {
        let mut s = SelectionStore::default();
        s.sync_source(&Arc::new(ids.iter().copied().map(user).collect()));
        s
    }

    fn working_ids(s: &SelectionStore<GithubUser>) -> Vec<u64> {
        s.working_list().iter().map(|u| u.id).collect()
    }

    #[test]
    fn delete_second_and_fourth_of_four() {
        let mut s = store(&[1, 2, 3, 4]);
        s.toggle_select(&user(2));
        s.toggle_select(&user(4));
        s.delete_selected();
        assert_eq!(working_ids(&s), vec![1, 3]);
        assert!(s.selected_ids().is_empty());
    }

    #[test]
    fn duplicate_two_of_three_appends_fresh_ids() {
        let mut s = store(&[1, 2, 3]);
        s.toggle_select(&user(2));
        s.toggle_select(&user(3));
        s.duplicate_selected();
        assert_eq!(working_ids(&s), vec![1, 2, 3, 4, 5]);
        let copies = &s.working_list()[3..];
        assert_eq!(copies[0].login, "login2");
        assert_eq!(copies[1].login, "login3");
        assert_eq!(copies[0].html_url, "https://github.com/login2");
        assert_eq!(s.selected_ids(), &[2, 3]);
    }

    #[test]
    fn all_selected_iff_every_working_id_selected() {
        let mut s = store(&[1, 2]);
        s.toggle_select(&user(1));
        assert!(!s.is_all_selected());
        s.toggle_select(&user(2));
        assert!(s.is_all_selected());

        s.duplicate_selected();
        assert!(!s.is_all_selected());
        s.toggle_select_all();
        assert!(s.is_all_selected());
        assert_eq!(s.selected_count(), 4);
    }

    #[test]
    fn replacing_source_always_clears_selection() {
        let mut s = store(&[1, 2, 3]);
        s.toggle_select_all();
        let same_content = Arc::new(vec![user(1), user(2), user(3)]);
        assert!(s.sync_source(&same_content));
        assert!(s.selected_ids().is_empty());
        assert_eq!(working_ids(&s), vec![1, 2, 3]);
    }

    #[test]
    fn edit_mode_flag_is_independent_of_selection() {
        let mut s = store(&[1]);
        s.toggle_select(&user(1));
        s.toggle_edit_mode();
        assert!(!s.edit_mode());
        assert_eq!(s.selected_ids(), &[1]);
    }
}

#[cfg(test)]
mod search_tests {
    use std::time::Duration;

    use gh_user_search::error::ErrorKind;
    use gh_user_search::search::{SearchConfig, SearchState};

    #[test]
    fn default_config_matches_documented_values() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.min_query_length, 2);
        assert_eq!(cfg.debounce, Duration::from_millis(400));
    }

    #[test]
    fn custom_min_length_is_respected() {
        let cfg = SearchConfig { min_query_length: 4, ..SearchConfig::default() };
        assert!(!cfg.accepts("abc"));
        assert!(cfg.accepts("abcd"));
    }

    #[test]
    fn default_state_is_blank() {
        let s = SearchState::default();
        assert!(s.users.is_empty());
        assert_eq!(s.total_count, 0);
        assert!(!s.loading);
        assert_eq!(s.error_kind, ErrorKind::None);
        assert!(s.error_message.is_none());
        assert!(!s.is_empty);
        assert!(!s.is_rate_limited);
        assert!(s.rate_limit_reset_at.is_none());
    }
}

#[cfg(test)]
mod error_tests {
    use gh_user_search::error::{ErrorKind, SearchError, ServiceError};
    use gh_user_search::messages;

    #[test]
    fn kinds_have_stable_names() {
        assert_eq!(ErrorKind::None.as_str(), "NONE");
        assert_eq!(ErrorKind::RateLimit.as_str(), "RATE_LIMIT");
        assert_eq!(ErrorKind::Validation.as_str(), "VALIDATION");
    }

    #[test]
    fn service_error_displays_its_message() {
        let e = SearchError::from(ServiceError::rate_limited(None));
        assert_eq!(e.to_string(), messages::RATE_LIMIT);
        assert!(!e.is_cancelled());
    }

    #[test]
    fn validation_prefers_server_message() {
        assert_eq!(ServiceError::validation(Some("nope".into())).message, "nope");
        assert_eq!(ServiceError::validation(None).message, messages::VALIDATION);
    }
}
