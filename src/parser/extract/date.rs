use std::sync::LazyLock;

use regex::Regex;

use crate::db::NOT_AVAILABLE;

static NUMERIC_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}[/.-]\d{1,2}[/.-]\d{4}").unwrap());
/// `<month> <day> ቀን <year>`, e.g. "ጥር 12 ቀን 2015".
static ETHIOPIC_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([ሀ-ፐ]+)\s+(\d{1,2})\s+ቀን\s+(\d{4})").unwrap());

/// Only the summary is searched; titles carry case numbers that look like dates.
pub fn extract(summary: &str) -> String {
    NUMERIC_DATE_RE
        .find(summary)
        .map(|m| m.as_str().to_string())
        .or_else(|| {
            ETHIOPIC_DATE_RE
                .captures(summary)
                .map(|caps| format!("{} {}, {}", &caps[1], &caps[2], &caps[3]))
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
