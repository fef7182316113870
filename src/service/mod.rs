//! Robots-Lens operations
//!
//! [`RobotsLens`] exposes the five request-scoped operations: Analyze, Compare,
//! TestURL, MultiTest and CheckUrl. Each call is self-contained; the only state
//! kept between calls is the configuration and the HTTP client.
//!
//! Request-shape problems and document-fetch failures are returned as
//! [`RequestError`]. A document that is not a policy file, or a non-200 fetch in
//! Analyze, is a successful [`AnalyzeResponse`] carrying an error message.

mod types;

pub use types::{
    AnalysisReport, AnalyzeRequest, AnalyzeResponse, CheckUrlRequest, CheckUrlResponse,
    CompareRequest, CompareResponse, ErrorBody, MultiTestRequest, MultiTestResponse,
    TestUrlRequest, TestUrlResponse,
};

use crate::config::Config;
use crate::diff::{unified_diff, DEFAULT_CONTEXT};
use crate::fetch::Fetcher;
use crate::robots::batch::{evaluation_count, normalize_agents};
use crate::robots::{evaluate_all, evaluate_single, is_policy_document, lint, parse_policy};
use crate::{FetchError, RequestError};
use url::Url;

/// Labels used for the two sides of a Compare diff
pub const FROM_LABEL: &str = "Version 1";
pub const TO_LABEL: &str = "Version 2";

const INVALID_CONTENT_MESSAGE: &str =
    "Invalid robots.txt content. It might be an HTML page or malformed content.";

/// Entry point for all operations
#[derive(Debug, Clone)]
pub struct RobotsLens {
    config: Config,
    fetcher: Fetcher,
}

impl RobotsLens {
    /// Creates the service from a validated configuration
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze: validate, lint and parse a document given inline or by URL
    ///
    /// When both `url` and `content` are present the URL is used.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse, RequestError> {
        let (content, fetch_status, base) = match (non_blank(request.url), request.content) {
            (Some(url), _) => {
                let fetched = self.fetcher.fetch_document(&url).await?;
                if !fetched.is_ok() {
                    tracing::info!("Fetch of {} returned HTTP {}", url, fetched.status);
                    return Ok(AnalyzeResponse::FetchRejected {
                        fetch_status: fetched.status,
                        error: format!(
                            "Failed to fetch robots.txt. HTTP Status Code: {}",
                            fetched.status
                        ),
                        robots_content: fetched.body,
                    });
                }
                let base = Url::parse(&fetched.final_url).ok();
                (fetched.body, Some(fetched.status), base)
            }
            (None, Some(content)) => (content, None, None),
            (None, None) => {
                return Err(RequestError::Invalid(
                    "Either 'url' or 'content' must be provided.".to_string(),
                ))
            }
        };

        let report = match inspect(content, fetch_status) {
            AnalyzeResponse::Analyzed(report) => report,
            rejected => return Ok(rejected),
        };

        if !self.config.fetcher.check_sitemaps || report.parsed_data.sitemaps().is_empty() {
            return Ok(AnalyzeResponse::Analyzed(report));
        }

        let AnalysisReport {
            fetch_status,
            errors,
            parsed_data,
            robots_content,
        } = report;
        let statuses = self
            .fetcher
            .probe_sitemaps(parsed_data.sitemaps(), base.as_ref())
            .await;

        Ok(AnalyzeResponse::Analyzed(AnalysisReport {
            fetch_status,
            errors,
            parsed_data: parsed_data.with_sitemap_statuses(statuses),
            robots_content,
        }))
    }

    /// Compare: unified diff between two document versions
    pub fn compare(&self, request: CompareRequest) -> Result<CompareResponse, RequestError> {
        let (Some(content1), Some(content2)) = (request.content1, request.content2) else {
            return Err(RequestError::Invalid(
                "Both 'content1' and 'content2' are required.".to_string(),
            ));
        };

        let limit = self.config.compare.max_lines;
        for content in [&content1, &content2] {
            let lines = content.lines().count();
            if lines > limit {
                return Err(RequestError::DocumentTooLarge { lines, limit });
            }
        }

        Ok(CompareResponse {
            diff: unified_diff(&content1, &content2, FROM_LABEL, TO_LABEL, DEFAULT_CONTEXT),
        })
    }

    /// TestURL: decide every URL for every agent against one document
    pub async fn test_urls(&self, request: TestUrlRequest) -> Result<TestUrlResponse, RequestError> {
        if request.test_urls.is_empty() {
            return Err(RequestError::Invalid(
                "'test_urls' must contain at least one URL.".to_string(),
            ));
        }

        let content = match non_blank(request.robots_url) {
            Some(url) => self.fetcher.fetch_document(&url).await?.body,
            None => request.robots_content.unwrap_or_default(),
        };
        if content.trim().is_empty() {
            return Err(RequestError::Invalid(
                "No robots.txt content provided.".to_string(),
            ));
        }

        let agents = self.resolve_agents(request.user_agents);
        self.check_batch_size(1, agents.len(), request.test_urls.len())?;

        let document = parse_policy(&content);
        Ok(TestUrlResponse {
            results: evaluate_single(&document, &agents, &request.test_urls),
        })
    }

    /// MultiTest: decide every URL for every agent against several documents
    pub fn multi_test(&self, request: MultiTestRequest) -> Result<MultiTestResponse, RequestError> {
        if request.robots_contents.is_empty() {
            return Err(RequestError::Invalid(
                "'robots_contents' must contain at least one document.".to_string(),
            ));
        }
        if request.test_urls.is_empty() {
            return Err(RequestError::Invalid(
                "'test_urls' must contain at least one URL.".to_string(),
            ));
        }

        let agents = self.resolve_agents(request.user_agents);
        self.check_batch_size(
            request.robots_contents.len(),
            agents.len(),
            request.test_urls.len(),
        )?;

        let documents: Vec<_> = request
            .robots_contents
            .iter()
            .map(|content| parse_policy(content))
            .collect();
        Ok(MultiTestResponse {
            results: evaluate_all(&documents, &agents, &request.test_urls),
        })
    }

    /// CheckUrl: HEAD a URL and report its status code
    pub async fn check_url(&self, request: CheckUrlRequest) -> Result<CheckUrlResponse, RequestError> {
        let Some(url) = non_blank(request.url) else {
            return Err(RequestError::Invalid("URL is required.".to_string()));
        };
        let status_code = self.fetcher.probe(&url).await?;
        Ok(CheckUrlResponse { status_code })
    }

    fn resolve_agents(&self, requested: Option<Vec<String>>) -> Vec<String> {
        match requested {
            Some(agents) if agents.iter().any(|agent| !agent.trim().is_empty()) => {
                normalize_agents(&agents)
            }
            _ => normalize_agents(&self.config.batch.default_agents),
        }
    }

    fn check_batch_size(&self, documents: usize, agents: usize, urls: usize) -> Result<(), RequestError> {
        let requested = evaluation_count(documents, agents, urls);
        let limit = self.config.batch.max_evaluations;
        tracing::debug!("Batch of {} evaluations (limit {})", requested, limit);
        if requested > limit {
            return Err(RequestError::BatchTooLarge { requested, limit });
        }
        Ok(())
    }
}

/// Validates, lints and parses document text without any network access
///
/// Sitemap entries are returned unresolved.
pub fn inspect(content: String, fetch_status: Option<u16>) -> AnalyzeResponse {
    if !is_policy_document(&content) {
        tracing::info!("Content rejected: not a robots.txt document");
        return AnalyzeResponse::FormatRejected {
            error: INVALID_CONTENT_MESSAGE.to_string(),
            robots_content: content,
        };
    }

    let errors = lint(&content);
    if !errors.is_empty() {
        tracing::debug!("{} syntax issue(s) found", errors.len());
    }
    let parsed_data = parse_policy(&content);

    AnalyzeResponse::Analyzed(AnalysisReport {
        fetch_status,
        errors,
        parsed_data,
        robots_content: content,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
