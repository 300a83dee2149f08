//! Page handlers, one per page kind
//!
//! Each handler parses a fetched page and reports what it found:
//! - Home: the category tree and one listing visit per subcategory
//! - Listing: product visits plus the next listing page, if any
//! - Product: the extracted record
//!
//! Handlers are synchronous; the parsed document never outlives the call.

use crate::extract::{extract_product, read_categories, SiteSelectors};
use crate::model::{CategoryNode, ProductRecord};
use crate::state::{CrawlContext, PageKind, Visit};
use crate::url::resolve_link;
use scraper::Html;
use url::Url;

/// What a page handler produced
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// Category tree plus the listing visits it schedules
    Home {
        categories: Vec<CategoryNode>,
        follow: Vec<Visit>,
    },

    /// Product visits and the next listing page
    Listing { follow: Vec<Visit> },

    /// A finished record
    Product(ProductRecord),
}

impl PageOutcome {
    /// Visits this outcome schedules
    pub fn follow(&self) -> &[Visit] {
        match self {
            Self::Home { follow, .. } | Self::Listing { follow } => follow,
            Self::Product(_) => &[],
        }
    }
}

/// Parses `body` and routes it to the handler for `kind`
///
/// # Arguments
///
/// * `body` - Raw HTML
/// * `page_url` - URL the body was served from; links resolve against it
/// * `kind` - Page kind the visit was scheduled as
/// * `selectors` - Site location rules
/// * `max_products` - Product links followed per listing page
pub fn handle_page(
    body: &str,
    page_url: &Url,
    kind: &PageKind,
    selectors: &SiteSelectors,
    max_products: usize,
) -> PageOutcome {
    let document = Html::parse_document(body);

    match kind {
        PageKind::Home => handle_home(&document, page_url, selectors),
        PageKind::Listing(context) => PageOutcome::Listing {
            follow: handle_listing(&document, page_url, context, selectors, max_products),
        },
        PageKind::Product(context) => PageOutcome::Product(extract_product(
            &document,
            &context.category,
            &context.subcategory,
            selectors,
        )),
    }
}

/// Reads the category tree and schedules every subcategory listing
pub fn handle_home(document: &Html, page_url: &Url, selectors: &SiteSelectors) -> PageOutcome {
    let categories = read_categories(document, selectors);
    let follow = listing_visits(&categories, page_url);

    tracing::debug!(
        "Found {} categories, {} subcategory listings",
        categories.len(),
        follow.len()
    );

    PageOutcome::Home { categories, follow }
}

/// One listing visit per (category, subcategory) pair
pub fn listing_visits(categories: &[CategoryNode], page_url: &Url) -> Vec<Visit> {
    categories
        .iter()
        .flat_map(|top| {
            top.subcategories.iter().filter_map(move |sub| {
                let Some(url) = resolve_link(&sub.link, page_url) else {
                    tracing::debug!(
                        "Skipping subcategory '{}' with unusable link '{}'",
                        sub.name,
                        sub.link
                    );
                    return None;
                };
                Some(Visit::listing(
                    url,
                    CrawlContext::new(top.name.clone(), sub.name.clone()),
                ))
            })
        })
        .collect()
}

/// Schedules the first `max_products` products and the next listing page
///
/// The next page carries the same context, so pagination continues until a
/// page without a next link.
pub fn handle_listing(
    document: &Html,
    page_url: &Url,
    context: &CrawlContext,
    selectors: &SiteSelectors,
    max_products: usize,
) -> Vec<Visit> {
    let mut follow: Vec<Visit> = document
        .select(&selectors.product_link)
        .filter_map(|link| link.value().attr("href"))
        .take(max_products)
        .filter_map(|href| resolve_link(href, page_url))
        .map(|url| Visit::product(url, context.clone()))
        .collect();

    let next_page = document
        .select(&selectors.next_page)
        .find_map(|link| link.value().attr("href"))
        .and_then(|href| resolve_link(href, page_url));

    if let Some(url) = next_page {
        follow.push(Visit::listing(url, context.clone()));
    }

    follow
}
