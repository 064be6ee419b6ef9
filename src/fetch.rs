//! Fetching remote documents for extraction
//!
//! Extraction itself is synchronous and never does I/O. This module adds
//! the one step before it: obtaining markup from a URL. Fetchers are
//! pluggable through [`HtmlFetcher`] so callers and tests can supply their
//! own transport.
//!
//! ```rust,ignore
//! use html_microdata::{HttpFetcher, MicrodataParser};
//!
//! let fetcher = HttpFetcher::new()?;
//! let items = MicrodataParser::new()
//!     .parse_url(&fetcher, "https://example.com/recipes/brownie")
//!     .await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::parser::MicrodataParser;

/// Configuration for fetching remote documents
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Timeout for the whole request
    pub timeout: Duration,
    /// Maximum number of redirects to follow
    pub max_redirects: usize,
    /// User agent string
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_redirects: 5,
            user_agent: concat!("html-microdata/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Source of HTML markup addressed by URL
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches `http(s)://` URLs over the network and `file://` URLs from disk
///
/// Both paths are asynchronous and need a tokio runtime.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Create a fetcher with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl HtmlFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(tokio::fs::read_to_string(path).await?);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::http_owned(format!("Unsupported URL scheme: {}", url)));
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_owned(format!("{} returned status {}", url, status)));
        }

        let body = response.text().await?;
        debug!(url = %url, bytes = body.len(), "fetched document");
        Ok(body)
    }
}

impl MicrodataParser {
    /// Fetch `url` with `fetcher` and extract its top-level items
    #[instrument(skip(self, fetcher))]
    pub async fn parse_url<F: HtmlFetcher + ?Sized>(
        &self,
        fetcher: &F,
        url: &str,
    ) -> Result<Vec<Map<String, JsonValue>>> {
        let html = fetcher.fetch(url).await?;
        self.parse(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl HtmlFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| Error::http_owned(format!("{} returned status 404 Not Found", url)))
        }
    }

    #[test]
    fn test_default_fetch_config() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_redirects, 5);
        assert!(config.user_agent.starts_with("html-microdata/"));
    }

    #[tokio::test]
    async fn test_parse_url_with_custom_fetcher() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.com/book".to_string(),
            r#"<div itemscope itemtype="Book"><span itemprop="title">Dune</span></div>"#.to_string(),
        );
        let fetcher = StaticFetcher { pages };

        let items = MicrodataParser::new()
            .parse_url(&fetcher, "https://example.com/book")
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Dune");

        let err = MicrodataParser::new()
            .parse_url(&fetcher, "https://example.com/missing")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::HttpError(_)));
    }

    #[tokio::test]
    async fn test_http_fetcher_rejects_unknown_scheme() {
        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch("ftp://example.com/page.html").await.unwrap_err();
        assert!(err.to_string().contains("Unsupported URL scheme"));
    }

    #[tokio::test]
    async fn test_http_fetcher_reads_file_urls() {
        let path = std::env::temp_dir().join(format!("html-microdata-fetch-{}.html", std::process::id()));
        std::fs::write(&path, r#"<div itemscope><span itemprop="name">local</span></div>"#).unwrap();

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("file://{}", path.display());
        let items = MicrodataParser::new().parse_url(&fetcher, &url).await.unwrap();
        assert_eq!(items[0]["name"], "local");

        std::fs::remove_file(&path).unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
