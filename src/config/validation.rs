use crate::config::types::{BatchConfig, CompareConfig, Config, FetcherConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_batch_config(&config.batch)?;
    validate_compare_config(&config.compare)?;
    Ok(())
}

/// Validates transport configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("timeout_secs", config.timeout_secs),
        ("connect_timeout_secs", config.connect_timeout_secs),
        ("probe_timeout_secs", config.probe_timeout_secs),
    ] {
        if value < 1 {
            return Err(ConfigError::Validation(format!(
                "{} must be >= 1 second, got {}",
                name, value
            )));
        }
    }

    if config.max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be at most 20, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates batch limits
fn validate_batch_config(config: &BatchConfig) -> Result<(), ConfigError> {
    if config.max_evaluations < 1 {
        return Err(ConfigError::Validation(format!(
            "max_evaluations must be >= 1, got {}",
            config.max_evaluations
        )));
    }

    if config.default_agents.is_empty() {
        return Err(ConfigError::Validation(
            "default_agents must name at least one agent".to_string(),
        ));
    }

    if config.default_agents.iter().any(|agent| agent.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "default_agents cannot contain blank entries".to_string(),
        ));
    }

    Ok(())
}

fn validate_compare_config(config: &CompareConfig) -> Result<(), ConfigError> {
    if config.max_lines < 1 {
        return Err(ConfigError::Validation(format!(
            "max_lines must be >= 1, got {}",
            config.max_lines
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Must contain exactly one @ with text on both sides
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
