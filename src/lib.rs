//! Robots-Lens: a robots.txt policy workbench
//!
//! This crate validates, parses and evaluates robots exclusion policy documents,
//! batch-tests URLs against many agents and policies, and diffs two policy versions.

pub mod config;
pub mod diff;
pub mod fetch;
pub mod output;
pub mod robots;
pub mod service;
pub mod url;

use thiserror::Error;

/// Main error type for Robots-Lens operations
#[derive(Debug, Error)]
pub enum LensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Transport errors raised while fetching a document or probing a URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors that reject a request before (or instead of) producing a result
///
/// Every variant maps to the same malformed-request status; soft failures such as
/// a document that is not a policy file are reported inside successful responses.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Transport(#[from] FetchError),

    #[error("Batch of {requested} evaluations exceeds the limit of {limit}")]
    BatchTooLarge { requested: usize, limit: usize },

    #[error("Document of {lines} lines exceeds the compare limit of {limit}")]
    DocumentTooLarge { lines: usize, limit: usize },
}

impl RequestError {
    /// HTTP-style status code for this error
    pub fn status_code(&self) -> u16 {
        400
    }
}

/// Result type alias for Robots-Lens operations
pub type Result<T> = std::result::Result<T, LensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use diff::{diff, unified_diff, DiffLine, DiffTag};
pub use robots::{decide, is_policy_document, lint, parse_policy, PolicyDocument};
pub use service::RobotsLens;
