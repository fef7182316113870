//! Request and response shapes for the Robots-Lens operations
//!
//! Request fields are optional at the serde level so that a missing field becomes a
//! [`RequestError::Invalid`](crate::RequestError::Invalid) with a useful message
//! instead of a deserialization failure.

use crate::robots::{PolicyDocument, UrlMatrix, UrlVerdicts, ValidationIssue};
use serde::{Deserialize, Serialize};

/// Input of the Analyze operation: exactly one of `url` or `content`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub url: Option<String>,
    pub content: Option<String>,
}

/// Full analysis of a policy document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// HTTP status of the fetch, `None` for inline content
    pub fetch_status: Option<u16>,
    pub errors: Vec<ValidationIssue>,
    pub parsed_data: PolicyDocument,
    pub robots_content: String,
}

/// Result of the Analyze operation
///
/// The two rejected variants are soft failures: they are successful responses that
/// still carry the raw text so a caller can display it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Analyzed(AnalysisReport),
    FetchRejected {
        fetch_status: u16,
        error: String,
        robots_content: String,
    },
    FormatRejected {
        error: String,
        robots_content: String,
    },
}

/// Input of the Compare operation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompareRequest {
    pub content1: Option<String>,
    pub content2: Option<String>,
}

/// Unified-diff lines between two documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareResponse {
    pub diff: Vec<String>,
}

/// Input of the TestURL operation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TestUrlRequest {
    pub robots_url: Option<String>,
    pub robots_content: Option<String>,
    pub test_urls: Vec<String>,
    pub user_agents: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestUrlResponse {
    pub results: Vec<UrlVerdicts>,
}

/// Input of the MultiTest operation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MultiTestRequest {
    pub robots_contents: Vec<String>,
    pub test_urls: Vec<String>,
    pub user_agents: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiTestResponse {
    pub results: Vec<UrlMatrix>,
}

/// Input of the CheckUrl operation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckUrlRequest {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckUrlResponse {
    pub status_code: u16,
}

/// Body of a request-level error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
