//! HTTP fetcher implementation
//!
//! This module handles the only network calls Robots-Lens makes:
//! - GET requests for remote policy documents
//! - HEAD requests to check sitemap and URL liveness
//! - Error classification into [`FetchError`]
//!
//! Every call is a single bounded request with no retry.

use crate::config::{Config, FetcherConfig, UserAgentConfig};
use crate::robots::{SitemapEntry, SitemapStatus};
use crate::url::parse_fetch_url;
use crate::{FetchError, FetchResult};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// A fetched policy document
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl FetchedDocument {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```
/// use robots_lens::config::{FetcherConfig, UserAgentConfig};
/// use robots_lens::fetch::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    fetcher: &FetcherConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetcher.timeout_secs))
        .connect_timeout(Duration::from_secs(fetcher.connect_timeout_secs))
        .redirect(Policy::limited(fetcher.max_redirects))
        .https_only(fetcher.https_only)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Transport collaborator for documents and liveness checks
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    probe_timeout: Duration,
}

impl Fetcher {
    /// Creates a fetcher from the application configuration
    pub fn new(config: &Config) -> FetchResult<Self> {
        let client = build_http_client(&config.fetcher, &config.user_agent).map_err(FetchError::Client)?;
        Ok(Self {
            client,
            probe_timeout: Duration::from_secs(config.fetcher.probe_timeout_secs),
        })
    }

    /// Fetches a policy document
    ///
    /// Any HTTP status is a successful fetch; callers decide what a non-200
    /// status means. Only transport failures are errors.
    pub async fn fetch_document(&self, url: &str) -> FetchResult<FetchedDocument> {
        let target = checked_url(url)?;
        tracing::debug!("Fetching {}", target);

        let response = self
            .client
            .get(target.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        tracing::info!("Fetched {} (HTTP {}, {} bytes)", final_url, status, body.len());
        Ok(FetchedDocument {
            final_url,
            status,
            body,
        })
    }

    /// Sends a HEAD request and returns the final status code
    pub async fn probe(&self, url: &str) -> FetchResult<u16> {
        let target = checked_url(url)?;
        let response = self
            .client
            .head(target)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;
        Ok(response.status().as_u16())
    }

    /// Checks the liveness of each sitemap, in order
    ///
    /// Relative sitemap URLs are resolved against `base` when one is known. Any
    /// failure becomes [`SitemapStatus::Error`]; this never fails as a whole.
    pub async fn probe_sitemaps(&self, entries: &[SitemapEntry], base: Option<&Url>) -> Vec<SitemapStatus> {
        let mut statuses = Vec::with_capacity(entries.len());
        for entry in entries {
            let target = match base {
                Some(base) => base
                    .join(&entry.url)
                    .map(|url| url.to_string())
                    .unwrap_or_else(|_| entry.url.clone()),
                None => entry.url.clone(),
            };

            let status = match self.probe(&target).await {
                Ok(code) => SitemapStatus::Status(code),
                Err(e) => {
                    tracing::warn!("Sitemap check failed for {}: {}", entry.url, e);
                    SitemapStatus::Error
                }
            };
            statuses.push(status);
        }
        statuses
    }
}

fn checked_url(url: &str) -> FetchResult<Url> {
    parse_fetch_url(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Maps a reqwest failure onto the transport error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&FetcherConfig::default(), &UserAgentConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_user_agent_format() {
        let config = UserAgentConfig {
            crawler_name: "TestLens".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        };
        assert_eq!(
            config.header_value(),
            "TestLens/1.0 (+https://example.com/about; admin@example.com)"
        );
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_before_request() {
        let fetcher = Fetcher::new(&Config::default()).unwrap();
        let err = fetcher.fetch_document("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_relative_sitemap_without_base_is_error() {
        let fetcher = Fetcher::new(&Config::default()).unwrap();
        let entries = vec![SitemapEntry {
            url: "/sitemap.xml".to_string(),
            status: None,
        }];
        let statuses = fetcher.probe_sitemaps(&entries, None).await;
        assert_eq!(statuses, vec![SitemapStatus::Error]);
    }

    // Network behavior is covered with wiremock in the integration tests
}
