use std::sync::LazyLock;

use regex::Regex;

use crate::db::PLACEHOLDER_CASE_NO;

static SLASHED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+/\d+/\d+").unwrap());
static LONG_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{5,}").unwrap());

/// `a/b/c` in title then summary, else a 5+ digit run in title then summary.
pub fn extract(title: &str, summary: &str) -> String {
    find(&SLASHED_RE, title)
        .or_else(|| find(&SLASHED_RE, summary))
        .or_else(|| find(&LONG_NUMBER_RE, title))
        .or_else(|| find(&LONG_NUMBER_RE, summary))
        .unwrap_or_else(|| PLACEHOLDER_CASE_NO.to_string())
}

fn find(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().to_string())
}
