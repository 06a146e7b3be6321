use crate::config::types::{Config, CrawlerConfig, ServerConfig};
use crate::ConfigError;

/// Deepest crawl a configuration may request
const MAX_DEPTH_LIMIT: u32 = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates crawler configuration
pub fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // A depth bound of zero would exclude the seed itself
    if config.max_depth < 1 || config.max_depth > MAX_DEPTH_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_depth must be between 1 and {}, got {}",
            MAX_DEPTH_LIMIT, config.max_depth
        )));
    }

    if config.max_parallel < 1 || config.max_parallel > 100 {
        return Err(ConfigError::Validation(format!(
            "max_parallel must be between 1 and 100, got {}",
            config.max_parallel
        )));
    }

    validate_agent(&config.crawler_agent)?;

    Ok(())
}

/// Validates the crawler agent string
///
/// The agent is matched against robots.txt `User-agent` lines, so it must be a
/// single product token.
fn validate_agent(agent: &str) -> Result<(), ConfigError> {
    if agent.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_agent cannot be empty".to_string(),
        ));
    }

    if agent.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "crawler_agent must not contain whitespace, got '{}'",
            agent
        )));
    }

    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.host.is_empty() {
        return Err(ConfigError::Validation("host cannot be empty".to_string()));
    }

    if config.port == 0 {
        return Err(ConfigError::Validation("port must be > 0".to_string()));
    }

    Ok(())
}
