use std::time::Duration;

use rand::Rng;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::fetch::{resolve_url, PageSource};
use crate::parser::CandidateEntry;

/// EasyDNNNews article body classes used by the court's CMS.
const ARTICLE_SELECTOR: &str = ".edn_articleContent, .edn_articleSummary, .edn_fullArticle";
const REGION_SELECTORS: &[&str] = &["main", "article", "#content"];

/// Outcome of a detail-page lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enriched {
    /// Body text pulled from the detail page.
    Detail(String),
    /// Fetch failed or no known content region; shallow listing summary kept.
    Fallback(String),
    /// Entry had no link to follow.
    NoLink(String),
}

impl Enriched {
    pub fn into_text(self) -> String {
        match self {
            Enriched::Detail(s) | Enriched::Fallback(s) | Enriched::NoLink(s) => s,
        }
    }
}

/// Replace the entry's summary with the linked page's body text when possible.
///
/// Every fetch attempt, successful or not, is followed by a randomized pause.
pub async fn enrich<S: PageSource>(
    source: &S,
    settings: &Settings,
    entry: &CandidateEntry,
) -> Enriched {
    if entry.link.is_empty() {
        return Enriched::NoLink(entry.summary.clone());
    }

    let url = resolve_url(&settings.site_origin, &entry.link);
    info!("Fetching detail: {}", url);

    let enriched = match source.fetch(&url, settings.detail_timeout()).await {
        Ok(html) => match extract_body(&html) {
            Some(body) => Enriched::Detail(body),
            None => {
                debug!(url = %url, "no recognizable content region");
                Enriched::Fallback(entry.summary.clone())
            }
        },
        Err(e) => {
            warn!("Error fetching detail for {}: {}", entry.title, e);
            Enriched::Fallback(entry.summary.clone())
        }
    };

    polite_pause(settings).await;
    enriched
}

/// Body text of a detail page: the CMS article block verbatim (trimmed), else
/// the first generic content region with whitespace collapsed.
pub fn extract_body(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    if let Ok(sel) = Selector::parse(ARTICLE_SELECTOR) {
        if let Some(article) = document.select(&sel).next() {
            return Some(article.text().collect::<String>().trim().to_string());
        }
    }

    REGION_SELECTORS
        .iter()
        .filter_map(|css| Selector::parse(css).ok())
        .find_map(|sel| document.select(&sel).next())
        .map(|region| compact_ws(&region.text().collect::<String>()))
}

fn compact_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

async fn polite_pause(settings: &Settings) {
    let ms = rand::thread_rng().gen_range(settings.delay_range());
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    struct OnePage(Option<String>);

    impl PageSource for OnePage {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
            self.0.clone().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    fn quiet_settings() -> Settings {
        Settings {
            delay_min_ms: 0,
            delay_max_ms: 0,
            ..Settings::default()
        }
    }

    fn slow_settings() -> Settings {
        Settings {
            delay_min_ms: 150,
            delay_max_ms: 300,
            ..Settings::default()
        }
    }

    async fn timed<S: PageSource>(source: &S, link: &str) -> (Enriched, Duration) {
        let started = std::time::Instant::now();
        let got = enrich(source, &slow_settings(), &entry(link)).await;
        (got, started.elapsed())
    }

    fn entry(link: &str) -> CandidateEntry {
        CandidateEntry {
            title: "አበበ እና ከበደ".to_string(),
            summary: "shallow".to_string(),
            link: link.to_string(),
        }
    }

    #[test]
    fn article_block_preferred_over_main() {
        let body = extract_body(&fixture("detail_article")).unwrap();
        assert!(body.starts_with("የፌዴራል ጠቅላይ ፍርድ ቤት"));
        assert!(body.ends_with("አመልካች አሸንፏል።"));
        assert!(!body.contains("ዋና ገጽ"));
    }

    #[test]
    fn main_region_whitespace_collapsed() {
        let body = extract_body(&fixture("detail_main")).unwrap();
        assert_eq!(body, "ውሳኔ ተከሳሽ ጥፋተኛ ተብሏል። ቀን 03.04.2014");
    }

    #[test]
    fn article_tag_and_content_id() {
        assert_eq!(
            extract_body("<body><article>  a \n b </article></body>").as_deref(),
            Some("a b")
        );
        assert_eq!(
            extract_body("<body><div id=\"content\">x\ty</div></body>").as_deref(),
            Some("x y")
        );
    }

    #[test]
    fn unknown_layout_has_no_body() {
        assert_eq!(extract_body(&fixture("detail_unknown")), None);
    }

    #[tokio::test]
    async fn enrich_uses_detail_body() {
        let source = OnePage(Some(fixture("detail_main")));
        let got = enrich(&source, &quiet_settings(), &entry("/Judgments/1")).await;
        assert!(matches!(got, Enriched::Detail(ref s) if s.contains("ጥፋተኛ")));
    }

    #[tokio::test]
    async fn enrich_falls_back_on_fetch_error() {
        let source = OnePage(None);
        let got = enrich(&source, &quiet_settings(), &entry("/Judgments/1")).await;
        assert_eq!(got, Enriched::Fallback("shallow".to_string()));
    }

    #[tokio::test]
    async fn enrich_falls_back_on_unknown_layout() {
        let source = OnePage(Some(fixture("detail_unknown")));
        let got = enrich(&source, &quiet_settings(), &entry("https://www.fsc.gov.et/x")).await;
        assert_eq!(got.into_text(), "shallow");
    }

    #[tokio::test]
    async fn no_link_skips_fetch() {
        let source = OnePage(Some(fixture("detail_main")));
        let got = enrich(&source, &quiet_settings(), &entry("")).await;
        assert_eq!(got, Enriched::NoLink("shallow".to_string()));
    }

    #[tokio::test]
    async fn pause_follows_successful_fetch() {
        let (got, elapsed) = timed(&OnePage(Some(fixture("detail_main"))), "/Judgments/1").await;
        assert!(matches!(got, Enriched::Detail(_)));
        assert!(elapsed >= Duration::from_millis(150), "{:?}", elapsed);
        // sleep may overshoot slightly on a loaded machine
        assert!(elapsed < Duration::from_millis(300 + 250), "{:?}", elapsed);
    }

    #[tokio::test]
    async fn pause_follows_failed_fetch() {
        let (got, elapsed) = timed(&OnePage(None), "/Judgments/1").await;
        assert_eq!(got, Enriched::Fallback("shallow".to_string()));
        assert!(elapsed >= Duration::from_millis(150), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(300 + 250), "{:?}", elapsed);
    }

    #[tokio::test]
    async fn no_link_does_not_pause() {
        let (got, elapsed) = timed(&OnePage(None), "").await;
        assert_eq!(got, Enriched::NoLink("shallow".to_string()));
        assert!(elapsed < Duration::from_millis(150), "{:?}", elapsed);
    }
}
