//! Product description helpers
//!
//! Description lists can nest to any depth. The DOM is first lowered into a
//! plain [`ListNode`] tree, then [`flatten_list`] turns that tree into the
//! nested string sequences stored in `info.json`.

use crate::extract::dom::{children_named, first_text};
use crate::model::{DescriptionItem, DescriptionList, DescriptionPart};
use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("hardcoded tag pattern is valid"));

/// A list: its items in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListNode {
    pub items: Vec<ListItemNode>,
}

/// A list item: its first direct text and any nested list under it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItemNode {
    pub text: Option<String>,
    pub children: Option<ListNode>,
}

/// Flattens a list tree into nested sequences
///
/// Each item becomes `[text]`, `[nested]` or `[text, nested]`. An item
/// without a direct text node has no text part; a whitespace-only text node
/// still contributes an empty string.
pub fn flatten_list(list: &ListNode) -> DescriptionList {
    list.items.iter().map(flatten_item).collect()
}

fn flatten_item(item: &ListItemNode) -> DescriptionItem {
    let mut parts = Vec::with_capacity(2);

    if let Some(text) = item.text.as_deref().filter(|t| !t.is_empty()) {
        parts.push(DescriptionPart::Text(text.trim().to_string()));
    }

    if let Some(children) = &item.children {
        parts.push(DescriptionPart::List(flatten_list(children)));
    }

    parts
}

/// Lowers a list element (`ul`/`ol`) into a [`ListNode`]
///
/// Nested lists are recognised as direct children of an item with the same
/// tag as the outer list. Several nested lists under one item are merged.
pub fn list_from_element(list: ElementRef<'_>) -> ListNode {
    let list_tag = list.value().name();

    let items = children_named(list, "li")
        .into_iter()
        .map(|li| {
            let nested = children_named(li, list_tag);
            let children = if nested.is_empty() {
                None
            } else {
                Some(ListNode {
                    items: nested
                        .into_iter()
                        .flat_map(|sub| list_from_element(sub).items)
                        .collect(),
                })
            };

            ListItemNode {
                text: first_text(li),
                children,
            }
        })
        .collect();

    ListNode { items }
}

/// Removes every `<...>` tag from a piece of markup
///
/// Idempotent: stripping already-stripped text changes nothing.
pub fn strip_tags(markup: &str) -> String {
    TAG_PATTERN.replace_all(markup, "").into_owned()
}
