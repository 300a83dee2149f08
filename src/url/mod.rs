//! URL handling module for Shop-Crawler
//!
//! This module provides link resolution against the current page and the
//! helpers that turn scheme-relative image URLs into fetchable URLs and
//! file names.

mod media;
mod resolve;

// Re-export main functions
pub use media::{absolute_image_url, file_name_from_url};
pub use resolve::{origin_robots_url, resolve_link};
