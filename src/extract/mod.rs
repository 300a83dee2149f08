//! Field extraction from parsed shop pages
//!
//! This module turns parsed documents into structured data:
//! - Category tree from the home page menu
//! - Product records from product pages
//! - Recursive description lists and tag stripping
//!
//! All location rules come from [`SiteSelectors`], compiled once from the
//! `[selectors]` configuration section. Extraction never fails: anything that
//! cannot be found becomes an empty value.

mod categories;
mod description;
mod dom;
mod product;
mod selectors;

pub use categories::read_categories;
pub use description::{flatten_list, list_from_element, strip_tags, ListItemNode, ListNode};
pub use dom::{attr_values, children_named, first_text, first_text_match, walk_path};
pub use product::extract_product;
pub use selectors::SiteSelectors;
