//! Storage module for persisting scraped data
//!
//! This module handles everything written to the dump tree:
//! - Directory resolution for records and the category index
//! - `info.json` documents for products
//! - `categories_list.json` for the category tree

mod json;
mod paths;

pub use json::{JsonStorage, CATEGORIES_FILE, INFO_FILE};
pub use paths::resolve_dump_path;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
