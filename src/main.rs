mod config;
mod db;
mod detail;
mod error;
mod fetch;
mod firestore;
mod parser;
mod pipeline;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::db::CaseRecord;
use crate::fetch::HttpFetcher;
use crate::firestore::FirestoreClient;
use crate::pipeline::RunOptions;

#[derive(Parser)]
#[command(name = "fsc_scraper", about = "Federal Supreme Court judgment scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the judgments listing, enrich each entry and save it
    Scrape {
        /// Listing page to start from
        #[arg(long)]
        listing_url: Option<String>,
        /// Local JSON output file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip Firestore even if credentials are present
        #[arg(long)]
        local_only: bool,
        /// Drop entries found by both the table and heading scans
        #[arg(long)]
        dedupe: bool,
    },
    /// Parse a single title/summary pair and print the record
    Parse {
        #[arg(short, long)]
        title: String,
        #[arg(short, long, default_value = "")]
        summary: String,
        #[arg(short, long, default_value = "")]
        link: String,
    },
    /// Cases overview table from the local output file
    Overview {
        /// Filter by decision (substring, case-insensitive)
        #[arg(short, long)]
        decision: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Outcome breakdown of the local output file
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load();

    let result = match cli.command {
        Commands::Scrape {
            listing_url,
            output,
            local_only,
            dedupe,
        } => {
            if let Some(url) = listing_url {
                settings.listing_url = url;
            }
            if let Some(path) = output {
                settings.output_file = path;
            }

            let fetcher = HttpFetcher::new(&settings.user_agent)?;
            let remote = if local_only {
                None
            } else {
                FirestoreClient::connect(&settings)
            };

            let stats =
                pipeline::run(&fetcher, remote.as_ref(), &settings, &RunOptions { dedupe }).await?;
            println!(
                "Scraping complete. Total cases saved: {} of {} ({} enriched, {} fallbacks).",
                stats.saved, stats.entries, stats.enriched, stats.fallbacks
            );
            if stats.local_errors > 0 {
                println!("Local write errors: {}", stats.local_errors);
            }
            if remote.is_some() {
                println!(
                    "Firestore: {} uploaded, {} errors.",
                    stats.uploaded, stats.upload_errors
                );
            }
            Ok(())
        }
        Commands::Parse {
            title,
            summary,
            link,
        } => {
            let record = parser::parse_case_info(&title, &summary, &link);
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Commands::Overview { decision, limit } => {
            let records = db::load(&settings.output_file);
            let needle = decision.map(|d| d.to_lowercase());
            let rows: Vec<&CaseRecord> = records
                .iter()
                .filter(|r| match &needle {
                    Some(n) => r.decision_compared.as_str().to_lowercase().contains(n),
                    None => true,
                })
                .take(limit)
                .collect();
            if rows.is_empty() {
                println!("No cases found in {}.", settings.output_file.display());
                return Ok(());
            }

            println!(
                "{:>3} | {:<12} | {:<20} | {:<20} | {:<20} | {:<20} | {:<12}",
                "#", "Case No", "Plaintiff", "Defendant", "Decision", "Winner", "Date"
            );
            println!("{}", "-".repeat(125));

            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<12} | {:<20} | {:<20} | {:<20} | {:<20} | {:<12}",
                    i + 1,
                    truncate(&r.case_file_no, 12),
                    truncate(&r.plaintiff, 20),
                    truncate(&r.defendant, 20),
                    truncate(r.decision_compared.as_str(), 20),
                    truncate(r.who_won.as_str(), 20),
                    truncate(&r.date_resolved, 12),
                );
            }

            println!("\n{} of {} cases", rows.len(), records.len());
            Ok(())
        }
        Commands::Stats => {
            let records = db::load(&settings.output_file);
            let mut decisions: BTreeMap<&str, usize> = BTreeMap::new();
            let mut winners: BTreeMap<&str, usize> = BTreeMap::new();
            for r in &records {
                *decisions.entry(r.decision_compared.as_str()).or_default() += 1;
                *winners.entry(r.who_won.as_str()).or_default() += 1;
            }
            let placeholders = records.iter().filter(|r| r.has_placeholder_case_no()).count();
            let linked = records.iter().filter(|r| !r.link.is_empty()).count();

            println!("Total:        {}", records.len());
            println!("With link:    {}", linked);
            println!("No case no.:  {}", placeholders);
            println!("\n--- Decisions ---");
            for (k, v) in &decisions {
                println!("  {:<32} {}", k, v);
            }
            println!("\n--- Who won ---");
            for (k, v) in &winners {
                println!("  {:<32} {}", k, v);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
