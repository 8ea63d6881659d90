use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;

/// Anything that can return the HTML body of a URL.
pub trait PageSource {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(HttpFetcher { client })
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        debug!(url, "GET");
        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Prefix site-relative links with `origin`. Absolute and empty links pass through.
pub fn resolve_url(origin: &str, link: &str) -> String {
    if link.is_empty() || link.starts_with("http") {
        return link.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if link.starts_with('/') {
        format!("{}{}", origin, link)
    } else {
        format!("{}/{}", origin, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.fsc.gov.et";

    #[test]
    fn relative_link_gets_origin() {
        assert_eq!(resolve_url(ORIGIN, "/x/y"), "https://www.fsc.gov.et/x/y");
    }

    #[test]
    fn bare_relative_link_gets_separator() {
        assert_eq!(resolve_url(ORIGIN, "x/y"), "https://www.fsc.gov.et/x/y");
        assert_eq!(resolve_url("https://www.fsc.gov.et/", "/x"), "https://www.fsc.gov.et/x");
    }

    #[test]
    fn absolute_and_empty_unchanged() {
        assert_eq!(resolve_url(ORIGIN, "https://example.org/a"), "https://example.org/a");
        assert_eq!(resolve_url(ORIGIN, "http://example.org/a"), "http://example.org/a");
        assert_eq!(resolve_url(ORIGIN, ""), "");
    }
}
