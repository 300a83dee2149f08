//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - Page handlers for the home, listing and product pages
//! - Frontier scheduling and concurrency limiting
//! - Overall crawl coordination, entered through [`run_crawl`]

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{
    build_http_client, is_retryable_status, FetchError, FetchedPage, HttpFetcher, ImageFetcher,
    PageFetcher, RetryPolicy,
};
pub use parser::{handle_home, handle_listing, handle_page, listing_visits, PageOutcome};
pub use scheduler::Scheduler;

