pub mod entries;
pub mod extract;

use crate::config::SITE_ORIGIN;
use crate::db::CaseRecord;

/// A raw listing row or heading before field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    pub title: String,
    pub summary: String,
    pub link: String,
}

/// Parse a title/summary pair into a case record, resolving links against the FSC site.
pub fn parse_case_info(title: &str, summary: &str, link: &str) -> CaseRecord {
    extract::extract_all(title, summary, link, SITE_ORIGIN)
}
