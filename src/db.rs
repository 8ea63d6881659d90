use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreError;

/// Sentinel for fields the heuristics could not resolve.
pub const NOT_AVAILABLE: &str = "N/A";
/// Case number used when no identifier pattern matches.
pub const PLACEHOLDER_CASE_NO: &str = "FSC-NEW";
pub const DEFAULT_BENCH: &str = "Federal Supreme Court";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "Reversed/Modified (ተሽሮ/ተሻሽሎ)")]
    ReversedModified,
    #[serde(rename = "Upheld (ጸንቷል)")]
    Upheld,
    #[serde(rename = "Guilty (ጥፋተኛ)")]
    Guilty,
    #[serde(rename = "Judgment Available")]
    JudgmentAvailable,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::ReversedModified => "Reversed/Modified (ተሽሮ/ተሻሽሎ)",
            Decision::Upheld => "Upheld (ጸንቷል)",
            Decision::Guilty => "Guilty (ጥፋተኛ)",
            Decision::JudgmentAvailable => "Judgment Available",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "Plaintiff (ከሳሽ)")]
    Plaintiff,
    #[serde(rename = "Appellant (አመልካች)")]
    Appellant,
    #[serde(rename = "Appellant/Plaintiff")]
    AppellantOrPlaintiff,
    #[serde(rename = "Respondent (ተጠሪ)")]
    Respondent,
    #[serde(rename = "Defendant (ተከሳሽ)")]
    Defendant,
    #[serde(rename = "Respondent/Defendant")]
    RespondentOrDefendant,
    #[serde(rename = "Prosecution/State")]
    Prosecution,
    Unknown,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Plaintiff => "Plaintiff (ከሳሽ)",
            Winner::Appellant => "Appellant (አመልካች)",
            Winner::AppellantOrPlaintiff => "Appellant/Plaintiff",
            Winner::Respondent => "Respondent (ተጠሪ)",
            Winner::Defendant => "Defendant (ተከሳሽ)",
            Winner::RespondentOrDefendant => "Respondent/Defendant",
            Winner::Prosecution => "Prosecution/State",
            Winner::Unknown => "Unknown",
        }
    }
}

/// One parsed judgment, as written to `cases.json` and the remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub case_file_no: String,
    pub plaintiff: String,
    pub defendant: String,
    pub bench: String,
    pub who_won: Winner,
    pub decision_compared: Decision,
    pub date_resolved: String,
    pub summary: String,
    pub link: String,
    pub scraped_at: String,
}

impl CaseRecord {
    pub fn has_placeholder_case_no(&self) -> bool {
        self.case_file_no == PLACEHOLDER_CASE_NO
    }
}

// ── Local JSON array file ──

/// Truncate the output file to an empty array.
pub fn reset(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, "[]")?;
    Ok(())
}

/// Read all records. A missing or corrupt file reads as empty.
pub fn load(path: &Path) -> Vec<CaseRecord> {
    let Ok(raw) = fs::read_to_string(path) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("{} is not a valid case array ({}), treating as empty", path.display(), e);
            Vec::new()
        }
    }
}

/// Append one record, rewriting the whole array. Returns the new record count.
pub fn append(path: &Path, record: &CaseRecord) -> Result<usize, StoreError> {
    let mut records = load(path);
    records.push(record.clone());
    fs::write(path, to_pretty_json(&records)?)?;
    Ok(records.len())
}

fn to_pretty_json(records: &[CaseRecord]) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    Ok(buf)
}
