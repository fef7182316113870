use serde::Deserialize;

/// Main configuration structure for Robots-Lens
///
/// Every section is optional in the TOML file; missing values take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub batch: BatchConfig,
    pub compare: CompareConfig,
}

/// Transport behavior for document fetches and liveness probes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Total timeout for fetching a policy document (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Timeout for HEAD probes of sitemaps and checked URLs (seconds)
    #[serde(rename = "probe-timeout-secs")]
    pub probe_timeout_secs: u64,

    /// Whether Analyze probes declared sitemaps
    #[serde(rename = "check-sitemaps")]
    pub check_sitemaps: bool,

    /// Refuse plain HTTP URLs
    #[serde(rename = "https-only")]
    pub https_only: bool,

    /// Maximum redirects followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            probe_timeout_secs: 5,
            check_sitemaps: true,
            https_only: false,
            max_redirects: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the tool as sent in the User-Agent header
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the tool
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "RobotsLens".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/robots-lens".to_string(),
            contact_email: "robots-lens@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Limits and defaults for batch evaluation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Upper bound on documents × agents × URLs for one request
    #[serde(rename = "max-evaluations")]
    pub max_evaluations: usize,

    /// Agents tested when a request names none
    #[serde(rename = "default-agents")]
    pub default_agents: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_evaluations: 100_000,
            default_agents: vec!["*".to_string()],
        }
    }
}

/// Limits for the Compare operation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Upper bound on the line count of either compared document
    #[serde(rename = "max-lines")]
    pub max_lines: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self { max_lines: 50_000 }
    }
}
