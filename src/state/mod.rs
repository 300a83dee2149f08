//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageKind`: which handler a page is routed to (home, listing, product)
//! - `Visit`: a scheduled page fetch together with its traversal context
//! - `VisitCounter`: the run-wide count of visited pages

mod page_kind;
mod visit_counter;

// Re-export main types
pub use page_kind::{CrawlContext, PageKind, Visit};
pub use visit_counter::VisitCounter;
