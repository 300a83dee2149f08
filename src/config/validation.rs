use crate::config::types::{Config, CrawlerConfig, OutputConfig, SelectorConfig, UserAgentConfig};
use crate::extract::SiteSelectors;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_selector_config(&config.selectors)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let start = Url::parse(&config.start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start_url: {}", e)))?;

    if start.scheme() != "http" && start.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "start_url must use http or https, got '{}'",
            config.start_url
        )));
    }

    if config.max_products_per_page < 1 {
        return Err(ConfigError::Validation(
            "max_products_per_page must be >= 1".to_string(),
        ));
    }

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
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

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.dump_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "dump_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the selector set: every path has tag-like segments and every
/// CSS selector compiles
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    let paths = [
        ("menu_label_path", &config.menu_label_path),
        ("top_category_path", &config.top_category_path),
        ("subcategory_path", &config.subcategory_path),
        ("category_name_path", &config.category_name_path),
        ("category_link_path", &config.category_link_path),
    ];

    for (name, path) in paths {
        validate_tag_path(name, path)?;
    }

    if config.image_attr.trim().is_empty() {
        return Err(ConfigError::Validation(
            "image_attr cannot be empty".to_string(),
        ));
    }

    SiteSelectors::compile(config)?;

    Ok(())
}

/// A tag path must be non-empty and consist of bare element names
fn validate_tag_path(name: &str, path: &[String]) -> Result<(), ConfigError> {
    if path.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
    }

    for tag in path {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ConfigError::Validation(format!(
                "{} contains an invalid tag name '{}'",
                name, tag
            )));
        }
    }

    Ok(())
}
