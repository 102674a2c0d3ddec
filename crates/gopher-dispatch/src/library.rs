//! "library for <name>": search term extraction and reply.

use std::sync::LazyLock;

use regex::Regex;

/// Longest search term we are willing to forward.
const MAX_TERM_LEN: usize = 100;

/// Phrases introducing the search term, in priority order.
static PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["library for", "library in go for", "go library for"]
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", regex::escape(p))).expect("phrase regex"))
        .collect()
});

/// Slack user and channel references (`<@U123>`, `<#C123|general>`).
static SLACK_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:@u|#c)[0-9a-z]+(?:\|[^>]*)?>").expect("link regex"));

/// Emoji codes (`:gopher:`).
static EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[[:alnum:]_+-]+:").expect("emoji regex"));

/// Extract the search term from a case-preserved message.
///
/// Returns `None` when no phrase is present or the cleaned term is empty or
/// longer than 100 bytes.
pub fn search_term(text: &str) -> Option<String> {
    let rest = PHRASES
        .iter()
        .find_map(|re| re.find(text).map(|m| &text[m.end()..]))?;

    let rest = SLACK_LINK.replace_all(rest, "");
    let rest = EMOJI.replace_all(&rest, "");
    let rest = rest.replacen("in go", "", 1);

    let term = rest.trim_matches(|c| matches!(c, '?' | ';' | '.' | ',' | ' '));
    if term.is_empty() || term.len() > MAX_TERM_LEN {
        return None;
    }
    Some(term.to_string())
}

/// Reply text pointing at package search engines for `term`.
pub fn search_reply(term: &str) -> String {
    let query: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
    format!(
        "You can try to look here: <https://godoc.org/?q={query}> or here <http://go-search.org/search?q={query}>"
    )
}
