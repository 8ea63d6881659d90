use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::db::{self, CaseRecord};
use crate::detail::{self, Enriched};
use crate::fetch::PageSource;
use crate::firestore::{document_id, RemoteStore};
use crate::parser::{entries, extract};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Drop entries repeated across the table and heading scans.
    pub dedupe: bool,
}

/// Counts reported after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub entries: usize,
    pub saved: usize,
    pub enriched: usize,
    pub fallbacks: usize,
    pub local_errors: usize,
    pub uploaded: usize,
    pub upload_errors: usize,
}

/// Fetch the listing, then enrich, parse and persist each entry in order.
///
/// Only an unreachable listing page is an error; everything per-entry is
/// logged and counted.
pub async fn run<S: PageSource, R: RemoteStore>(
    source: &S,
    remote: Option<&R>,
    settings: &Settings,
    opts: &RunOptions,
) -> Result<RunStats> {
    let output = settings.output_file.as_path();
    db::reset(output).with_context(|| format!("Failed to initialize {}", output.display()))?;

    info!("Scraping {}...", settings.listing_url);
    let html = match source
        .fetch(&settings.listing_url, settings.listing_timeout())
        .await
    {
        Ok(html) => html,
        Err(e) => {
            error!("Failed to fetch FSC page: {}", e);
            return Err(e).context("listing page unavailable");
        }
    };

    let mut candidates = entries::parse_listing(&html);
    if opts.dedupe {
        let before = candidates.len();
        candidates = entries::dedupe(candidates);
        info!("Dropped {} duplicate entries", before - candidates.len());
    }
    info!("Total entries found: {}. Starting deep scrape...", candidates.len());

    let mut stats = RunStats {
        entries: candidates.len(),
        ..RunStats::default()
    };

    let pb = ProgressBar::new(candidates.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    for entry in &candidates {
        let enriched = detail::enrich(source, settings, entry).await;
        match enriched {
            Enriched::Detail(_) => stats.enriched += 1,
            Enriched::Fallback(_) => stats.fallbacks += 1,
            Enriched::NoLink(_) => {}
        }
        let summary = enriched.into_text();

        let record = extract::extract_all(&entry.title, &summary, &entry.link, &settings.site_origin);
        persist(output, remote, &entry.title, &record, &mut stats).await;
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Scraping complete. Total cases saved: {}", stats.saved);
    Ok(stats)
}

/// Write one record to both sinks. Each sink fails independently.
async fn persist<R: RemoteStore>(
    output: &Path,
    remote: Option<&R>,
    title: &str,
    record: &CaseRecord,
    stats: &mut RunStats,
) {
    match db::append(output, record) {
        Ok(_) => {
            stats.saved += 1;
            info!(count = stats.saved, "Saved: {}", record.case_file_no);
        }
        Err(e) => {
            stats.local_errors += 1;
            error!(
                "Error writing {} to {}: {}",
                entry_label(title, &record.case_file_no),
                output.display(),
                e
            );
        }
    }

    let Some(remote) = remote else {
        return;
    };
    let doc_id = document_id(&record.case_file_no);
    match remote.upsert(&doc_id, record).await {
        Ok(()) => {
            stats.uploaded += 1;
            info!("Uploaded to Firestore: {}", doc_id);
        }
        Err(e) => {
            stats.upload_errors += 1;
            warn!("Error uploading {} to Firestore: {}", entry_label(title, &doc_id), e);
        }
    }
}

/// Case number plus listing title, so `FSC-NEW` failures stay distinguishable.
fn entry_label(title: &str, case_no: &str) -> String {
    format!("{} ({})", case_no, title)
}

// ── Tests ──
