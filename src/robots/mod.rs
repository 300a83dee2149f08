//! Robots.txt handling module
//!
//! The shop's robots.txt is fetched once at the start of a run and every
//! page visit is checked against it.

mod parser;

pub use parser::ParsedRobots;

use crate::crawler::PageFetcher;
use crate::url::origin_robots_url;
use url::Url;

/// Fetches robots.txt for the site serving `start_url`
///
/// Any failure (missing file, HTTP error, network error) yields a permissive
/// result: a site without a readable robots.txt imposes no restrictions.
pub async fn fetch_robots<F: PageFetcher>(fetcher: &F, start_url: &Url) -> ParsedRobots {
    let Some(robots_url) = origin_robots_url(start_url) else {
        return ParsedRobots::allow_all();
    };

    match fetcher.fetch_page(robots_url.as_str()).await {
        Ok(page) => {
            tracing::debug!("Loaded robots.txt from {}", robots_url);
            ParsedRobots::from_content(&page.body)
        }
        Err(e) => {
            tracing::info!("No robots.txt at {} ({}), allowing all", robots_url, e);
            ParsedRobots::allow_all()
        }
    }
}
