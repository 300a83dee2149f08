//! Scheduler for managing the crawl frontier and concurrency
//!
//! This module handles:
//! - First-in first-out frontier of scheduled visits
//! - Global concurrency limiting via a semaphore shared by page and image
//!   fetches

use crate::state::Visit;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Scheduler manages the frontier queue and the request budget
///
/// Visits leave the frontier in the order they were scheduled, which keeps
/// the traversal breadth-first: every listing found on the home page is
/// fetched before the products those listings point to.
pub struct Scheduler {
    /// Global semaphore for limiting concurrent requests
    semaphore: Arc<Semaphore>,

    /// Visits waiting to be fetched
    frontier: VecDeque<Visit>,

    /// Total visits ever scheduled in this run
    scheduled: u64,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `max_concurrent` - Requests allowed in flight at once
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            frontier: VecDeque::new(),
            scheduled: 0,
        }
    }

    /// Adds a visit to the back of the frontier
    ///
    /// No deduplication happens here: scheduling a URL twice visits it twice.
    pub fn add_to_frontier(&mut self, visit: Visit) {
        tracing::trace!("Scheduling {} visit: {}", visit.kind.label(), visit.url);
        self.scheduled += 1;
        self.frontier.push_back(visit);
    }

    /// Adds several visits in order
    pub fn extend_frontier(&mut self, visits: impl IntoIterator<Item = Visit>) {
        for visit in visits {
            self.add_to_frontier(visit);
        }
    }

    /// Takes the next visit off the frontier
    pub fn next_visit(&mut self) -> Option<Visit> {
        self.frontier.pop_front()
    }

    /// Handle to the request budget
    ///
    /// Every spawned page visit and image download holds one permit while its
    /// request is in flight.
    pub fn semaphore(&self) -> Arc<Semaphore> {
        Arc::clone(&self.semaphore)
    }

    /// Returns the number of visits waiting in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns the number of visits scheduled since creation
    pub fn scheduled_count(&self) -> u64 {
        self.scheduled
    }
}
