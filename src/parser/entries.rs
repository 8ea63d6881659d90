use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

use super::CandidateEntry;

/// First-column text that marks a table header row rather than a case.
const HEADER_KEYWORDS: &[&str] = &["Case", "Plaintiff", "መለያ", "ተከሳሽ"];

/// Collect candidate entries from both table rows and linked headings.
///
/// The two scans run independently over the same document and their results
/// are concatenated, so a page using both layouts yields duplicates.
pub fn extract_entries(document: &Html) -> Vec<CandidateEntry> {
    let mut entries = scan_tables(document);
    entries.extend(scan_headings(document));
    entries
}

pub fn parse_listing(html: &str) -> Vec<CandidateEntry> {
    let document = Html::parse_document(html);
    extract_entries(&document)
}

/// Drop repeated `(title, link)` pairs, keeping the first occurrence.
pub fn dedupe(entries: Vec<CandidateEntry>) -> Vec<CandidateEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert((e.title.clone(), e.link.clone())))
        .collect()
}

fn scan_tables(document: &Html) -> Vec<CandidateEntry> {
    let (Ok(table_sel), Ok(row_sel), Ok(cell_sel), Ok(anchor_sel)) = (
        Selector::parse("table"),
        Selector::parse("tr"),
        Selector::parse("td, th"),
        Selector::parse("a"),
    ) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for table in document.select(&table_sel) {
        for row in table.select(&row_sel) {
            let cols: Vec<ElementRef> = row.select(&cell_sel).collect();
            if cols.len() < 3 {
                continue;
            }

            let title = element_text(cols[0]);
            if HEADER_KEYWORDS.iter().any(|kw| title.contains(kw)) {
                continue;
            }

            let link = cols[0]
                .select(&anchor_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .unwrap_or("")
                .to_string();
            let summary = cols[1..]
                .iter()
                .map(|c| element_text(*c))
                .collect::<Vec<_>>()
                .join(" ");

            entries.push(CandidateEntry { title, summary, link });
        }
    }
    entries
}

fn scan_headings(document: &Html) -> Vec<CandidateEntry> {
    let (Ok(heading_sel), Ok(anchor_sel)) = (Selector::parse("h2, h3"), Selector::parse("a"))
    else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for heading in document.select(&heading_sel) {
        let Some(anchor) = heading.select(&anchor_sel).next() else {
            continue;
        };

        // Nearest following <p>/<div> sibling, skipping other elements
        let summary = heading
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| matches!(el.value().name(), "p" | "div"))
            .map(element_text)
            .unwrap_or_default();

        entries.push(CandidateEntry {
            title: element_text(anchor),
            summary,
            link: anchor.value().attr("href").unwrap_or("").to_string(),
        });
    }
    entries
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ── Tests ──
