use std::sync::LazyLock;

use regex::Regex;

use crate::db::DEFAULT_BENCH;

/// `<token> ሰበር ችሎት`, the token naming which cassation bench decided.
static BENCH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\S+)\s+ሰበር\s+ችሎት").unwrap());

pub fn extract(title: &str, summary: &str) -> String {
    BENCH_RE
        .captures(summary)
        .or_else(|| BENCH_RE.captures(title))
        .map(|caps| format!("{} ሰበር ችሎት", &caps[1]))
        .unwrap_or_else(|| DEFAULT_BENCH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_bench() {
        assert_eq!(
            extract("", "የፌዴራል ጠቅላይ ፍርድ ቤት ሁለተኛ ሰበር  ችሎት ውሳኔ"),
            "ሁለተኛ ሰበር ችሎት"
        );
    }

    #[test]
    fn summary_checked_before_title() {
        assert_eq!(extract("አንደኛ ሰበር ችሎት", "ሶስተኛ ሰበር ችሎት"), "ሶስተኛ ሰበር ችሎት");
        assert_eq!(extract("አንደኛ ሰበር ችሎት", ""), "አንደኛ ሰበር ችሎት");
    }

    #[test]
    fn needs_a_qualifying_token() {
        assert_eq!(extract("ሰበር ችሎት", "ሰበር ችሎት"), DEFAULT_BENCH);
    }
}
