pub mod bench;
pub mod case_number;
pub mod date;
pub mod outcome;
pub mod parties;

use crate::db::CaseRecord;
use crate::fetch::resolve_url;

const SUMMARY_MAX_CHARS: usize = 250;
const ELLIPSIS: &str = "...";

/// Run every field rule over one title/summary pair. Never fails: each field
/// has a fallback value.
pub fn extract_all(title: &str, summary: &str, link: &str, origin: &str) -> CaseRecord {
    let parties = parties::extract(title);
    let (decision, winner) = outcome::classify(title, summary);

    CaseRecord {
        case_file_no: case_number::extract(title, summary),
        plaintiff: parties.plaintiff,
        defendant: parties.defendant,
        bench: bench::extract(title, summary),
        who_won: winner,
        decision_compared: decision,
        date_resolved: date::extract(summary),
        summary: truncate_summary(summary),
        link: resolve_url(origin, link),
        scraped_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Cut to 250 characters (not bytes) and mark the cut.
pub fn truncate_summary(summary: &str) -> String {
    if summary.chars().count() <= SUMMARY_MAX_CHARS {
        summary.to_string()
    } else {
        let truncated: String = summary.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{}{}", truncated, ELLIPSIS)
    }
}

// ── Tests ──
