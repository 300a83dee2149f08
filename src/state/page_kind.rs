//! Page kinds and scheduled visits
//!
//! The traversal is a three-state machine: the home page yields listings,
//! listings yield products and further listings, products are terminal.

use std::fmt;
use url::Url;

/// The category/subcategory a listing or product was reached through
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CrawlContext {
    pub category: String,
    pub subcategory: String,
}

impl CrawlContext {
    pub fn new(category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
        }
    }
}

/// Represents which handler a fetched page is routed to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Shop front page carrying the category menu
    Home,

    /// One page of a subcategory's product listing
    Listing(CrawlContext),

    /// A single product page
    Product(CrawlContext),
}

impl PageKind {
    /// The traversal context, absent only for the home page
    pub fn context(&self) -> Option<&CrawlContext> {
        match self {
            Self::Home => None,
            Self::Listing(ctx) | Self::Product(ctx) => Some(ctx),
        }
    }

    /// Short lowercase label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Listing(_) => "listing",
            Self::Product(_) => "product",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Listing(ctx) => write!(f, "listing [{} / {}]", ctx.category, ctx.subcategory),
            Self::Product(ctx) => write!(f, "product [{} / {}]", ctx.category, ctx.subcategory),
        }
    }
}

/// A page fetch waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub url: Url,
    pub kind: PageKind,
}

impl Visit {
    pub fn home(url: Url) -> Self {
        Self {
            url,
            kind: PageKind::Home,
        }
    }

    pub fn listing(url: Url, context: CrawlContext) -> Self {
        Self {
            url,
            kind: PageKind::Listing(context),
        }
    }

    pub fn product(url: Url, context: CrawlContext) -> Self {
        Self {
            url,
            kind: PageKind::Product(context),
        }
    }
}
