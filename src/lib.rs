//! Shop-Crawler: a product catalogue scraper for a single storefront
//!
//! This crate walks a shop's category menu, paginates through every subcategory
//! listing, extracts a structured record from each product page and dumps the
//! records (plus their images) into a `category/subcategory/name` directory tree.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod media;
pub mod model;
pub mod robots;
pub mod state;
pub mod storage;
pub mod url;

#[cfg(test)]
mod test_support;

use thiserror::Error;

/// Main error type for Shop-Crawler operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
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

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Result type alias for Shop-Crawler operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{CategoryNode, ProductRecord};
pub use state::{PageKind, Visit};
pub use storage::resolve_dump_path;
