//! User-visible strings.

pub const RATE_LIMIT: &str = "GitHub rate limit reached. Try again in a few moments.";
pub const VALIDATION: &str = "The search query is not valid for the GitHub API.";
pub const NETWORK: &str = "Network error while calling the GitHub API.";
pub const LOADING: &str = "Loading…";

pub fn server_error(status: u16) -> String {
    format!("GitHub server error ({status}).")
}

pub fn no_results(query: &str) -> String {
    format!("No user found for \"{query}\"")
}

pub fn short_query_hint(min_len: usize) -> String {
    format!("Type at least {min_len} characters to search")
}

pub fn selection_count(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} element{plural} selected")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_count_pluralizes() {
        assert_eq!(selection_count(0), "0 elements selected");
        assert_eq!(selection_count(1), "1 element selected");
        assert_eq!(selection_count(3), "3 elements selected");
    }

    #[test]
    fn templates_embed_arguments() {
        assert_eq!(server_error(502), "GitHub server error (502).");
        assert_eq!(no_results("zzz"), "No user found for \"zzz\"");
        assert_eq!(short_query_hint(2), "Type at least 2 characters to search");
    }
}
