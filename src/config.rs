use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

pub const LISTING_URL: &str = "https://www.fsc.gov.et/Digital-Law-Library/Judgments/";
pub const SITE_ORIGIN: &str = "https://www.fsc.gov.et";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Runtime settings: defaults, then `fsc_scraper.*` file, then `FSC_*` env vars.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub listing_url: String,
    pub site_origin: String,
    pub output_file: PathBuf,
    pub service_account_path: PathBuf,
    pub collection: String,
    pub user_agent: String,
    pub listing_timeout_secs: u64,
    pub detail_timeout_secs: u64,
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    pub firestore_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            listing_url: LISTING_URL.to_string(),
            site_origin: SITE_ORIGIN.to_string(),
            output_file: PathBuf::from("cases.json"),
            service_account_path: PathBuf::from("service-account.json"),
            collection: "cases".to_string(),
            user_agent: USER_AGENT.to_string(),
            listing_timeout_secs: 15,
            detail_timeout_secs: 10,
            delay_min_ms: 1500,
            delay_max_ms: 3000,
            firestore_base_url: "https://firestore.googleapis.com/v1".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        let built = ::config::Config::builder()
            .add_source(::config::File::with_name("fsc_scraper").required(false))
            .add_source(::config::Environment::with_prefix("FSC"))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>());

        match built {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring invalid configuration ({}), using defaults", e);
                Settings::default()
            }
        }
    }

    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_timeout_secs)
    }

    pub fn detail_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_timeout_secs)
    }

    /// Pause bounds between detail requests, in milliseconds.
    pub fn delay_range(&self) -> RangeInclusive<u64> {
        let lo = self.delay_min_ms.min(self.delay_max_ms);
        let hi = self.delay_min_ms.max(self.delay_max_ms);
        lo..=hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_fsc() {
        let s = Settings::default();
        assert_eq!(s.site_origin, "https://www.fsc.gov.et");
        assert!(s.listing_url.starts_with(&s.site_origin));
        assert_eq!(s.listing_timeout(), Duration::from_secs(15));
        assert_eq!(s.detail_timeout(), Duration::from_secs(10));
        assert_eq!(s.delay_range(), 1500..=3000);
    }

    #[test]
    fn inverted_delay_bounds_are_swapped() {
        let s = Settings {
            delay_min_ms: 500,
            delay_max_ms: 100,
            ..Settings::default()
        };
        assert_eq!(s.delay_range(), 100..=500);
    }
}
