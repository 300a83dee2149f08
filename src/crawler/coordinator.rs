//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Loading robots.txt and seeding the frontier with the home page
//! - Spawning page visits under the global request budget
//! - Routing page outcomes to the frontier and the sinks
//! - Running image downloads alongside the traversal

use crate::config::Config;
use crate::crawler::parser::{handle_page, PageOutcome};
use crate::crawler::scheduler::Scheduler;
use crate::crawler::{HttpFetcher, ImageFetcher, PageFetcher};
use crate::extract::SiteSelectors;
use crate::media::ImagePipeline;
use crate::model::ProductRecord;
use crate::robots::{fetch_robots, ParsedRobots};
use crate::state::{Visit, VisitCounter};
use crate::storage::JsonStorage;
use crate::ScraperError;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use url::Url;

/// Main crawler coordinator structure
///
/// Generic over the fetcher so the traversal can run against any
/// [`PageFetcher`] + [`ImageFetcher`] implementation.
pub struct Coordinator<F> {
    config: Arc<Config>,
    fetcher: Arc<F>,
    selectors: Arc<SiteSelectors>,
    storage: JsonStorage,
    images: ImagePipeline,
    scheduler: Scheduler,
    counter: Arc<VisitCounter>,
    robots: Arc<ParsedRobots>,
    records_saved: u64,
}

impl<F> Coordinator<F>
where
    F: PageFetcher + ImageFetcher + 'static,
{
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `fetcher` - Source of pages and image bytes
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScraperError)` - A selector in the configuration does not compile
    pub fn new(config: Config, fetcher: F) -> Result<Self, ScraperError> {
        let selectors = SiteSelectors::compile(&config.selectors)?;
        let storage = JsonStorage::new(&config.output.dump_path, config.output.flatten);
        let images = ImagePipeline::new(&config.output.dump_path, config.output.flatten);
        let scheduler = Scheduler::new(config.crawler.max_concurrent_requests);

        Ok(Self {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
            selectors: Arc::new(selectors),
            storage,
            images,
            scheduler,
            counter: Arc::new(VisitCounter::new()),
            robots: Arc::new(ParsedRobots::allow_all()),
            records_saved: 0,
        })
    }

    /// Runs the main crawl loop
    ///
    /// The loop:
    /// 1. Spawns every scheduled visit
    /// 2. Waits for the next finished visit
    /// 3. Feeds its outcome to the frontier and the sinks
    ///
    /// It ends once no visit is scheduled or in flight, then waits for the
    /// remaining image downloads.
    pub async fn run(&mut self) -> Result<(), ScraperError> {
        let start_url = Url::parse(&self.config.crawler.start_url)?;
        tracing::info!("Starting crawl of {}", start_url);

        if self.config.crawler.obey_robots {
            self.robots = Arc::new(fetch_robots(self.fetcher.as_ref(), &start_url).await);
        }

        let start_time = Instant::now();
        let mut pages: JoinSet<Option<PageOutcome>> = JoinSet::new();
        let mut downloads: JoinSet<ProductRecord> = JoinSet::new();

        self.scheduler.add_to_frontier(Visit::home(start_url));

        loop {
            while let Some(visit) = self.scheduler.next_visit() {
                self.spawn_visit(&mut pages, visit);
            }

            match pages.join_next().await {
                Some(Ok(Some(outcome))) => {
                    let found = outcome.follow().len();
                    self.handle_outcome(outcome, &mut downloads).await?;
                    tracing::debug!(
                        "Frontier: {} new, {} waiting, {} pages in flight",
                        found,
                        self.scheduler.frontier_size(),
                        pages.len()
                    );
                }
                Some(Ok(None)) => {}
                Some(Err(e)) => tracing::warn!("Page task failed: {}", e),
                None => break,
            }
        }

        while let Some(joined) = downloads.join_next().await {
            match joined {
                Ok(record) => tracing::debug!(
                    "Stored {} of {} images for {}",
                    record.images.len(),
                    record.image_urls.len(),
                    record.name
                ),
                Err(e) => tracing::warn!("Image batch failed: {}", e),
            }
        }

        tracing::info!(
            "Crawl completed: {} of {} scheduled pages visited, {} records saved in {:?}",
            self.counter.get(),
            self.scheduler.scheduled_count(),
            self.records_saved,
            start_time.elapsed()
        );

        Ok(())
    }

    /// Spawns one page visit
    ///
    /// The task checks robots.txt, fetches under a request permit, counts
    /// the visit and runs the page handler. `None` means the branch ends
    /// here.
    fn spawn_visit(&self, pages: &mut JoinSet<Option<PageOutcome>>, visit: Visit) {
        let fetcher = Arc::clone(&self.fetcher);
        let selectors = Arc::clone(&self.selectors);
        let counter = Arc::clone(&self.counter);
        let robots = Arc::clone(&self.robots);
        let semaphore = self.scheduler.semaphore();
        let agent = self.config.user_agent.crawler_name.clone();
        let max_products = self.config.crawler.max_products_per_page;

        pages.spawn(async move {
            if !robots.is_allowed(visit.url.as_str(), &agent) {
                tracing::info!("URL {} disallowed by robots.txt", visit.url);
                return None;
            }

            let fetched = {
                let _permit = semaphore.acquire_owned().await.ok()?;
                fetcher.fetch_page(visit.url.as_str()).await
            };

            let page = match fetched {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Failed to fetch {} page {}: {}", visit.kind, visit.url, e);
                    return None;
                }
            };

            counter.record(page.url.as_str());
            Some(handle_page(
                &page.body,
                &page.url,
                &visit.kind,
                &selectors,
                max_products,
            ))
        });
    }

    /// Routes a page outcome
    ///
    /// Only a failed category index write is fatal; record failures are
    /// logged and the crawl goes on.
    async fn handle_outcome(
        &mut self,
        outcome: PageOutcome,
        downloads: &mut JoinSet<ProductRecord>,
    ) -> Result<(), ScraperError> {
        match outcome {
            PageOutcome::Home { categories, follow } => {
                let path = self.storage.save_categories(&categories).await?;
                tracing::info!(
                    "Saved {} categories to {}",
                    categories.len(),
                    path.display()
                );
                self.scheduler.extend_frontier(follow);
            }
            PageOutcome::Listing { follow } => self.scheduler.extend_frontier(follow),
            PageOutcome::Product(record) => self.emit_record(record, downloads).await,
        }
        Ok(())
    }

    /// Sends a record to the JSON sink and, if enabled, the image pipeline
    async fn emit_record(
        &mut self,
        record: ProductRecord,
        downloads: &mut JoinSet<ProductRecord>,
    ) {
        match self.storage.save_record(&record).await {
            Ok(_) => self.records_saved += 1,
            Err(e) => tracing::error!("Failed to save item {}: {}", record.name, e),
        }

        if !self.config.output.download_images {
            return;
        }

        let pipeline = self.images.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let semaphore = self.scheduler.semaphore();
        downloads.spawn(async move { pipeline.process(fetcher, semaphore, record).await });
    }

    /// Pages visited so far
    pub fn pages_visited(&self) -> u64 {
        self.counter.get()
    }

    /// Records written to `info.json` so far
    pub fn records_saved(&self) -> u64 {
        self.records_saved
    }
}

/// Runs a full crawl with the HTTP fetcher
///
/// # Example
///
/// ```no_run
/// use shop_crawler::config::load_config;
/// use shop_crawler::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// run_crawl(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<(), ScraperError> {
    let fetcher = HttpFetcher::from_config(&config)?;
    let mut coordinator = Coordinator::new(config, fetcher)?;
    coordinator.run().await
}
