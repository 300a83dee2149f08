//! Small helpers over scraper's element tree

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;

/// Direct element children with the given tag name
pub fn children_named<'a>(element: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name().eq_ignore_ascii_case(tag))
        .collect()
}

/// Follows a tag path through direct children, fanning out at every step
///
/// `walk_path(li, ["ul", "li"])` returns every `li` that is a child of a `ul`
/// that is a child of `li`.
pub fn walk_path<'a>(element: ElementRef<'a>, path: &[String]) -> Vec<ElementRef<'a>> {
    path.iter().fold(vec![element], |current, tag| {
        current
            .into_iter()
            .flat_map(|el| children_named(el, tag))
            .collect()
    })
}

/// The first text node directly under the element, untrimmed
pub fn first_text(element: ElementRef<'_>) -> Option<String> {
    element
        .children()
        .find_map(|node| node.value().as_text().map(|text| text.to_string()))
}

/// The first direct text node across all matches of `selector`
pub fn first_text_match(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).find_map(first_text)
}

/// Every value of `attr` across all matches of `selector`
pub fn attr_values(document: &Html, selector: &Selector, attr: &str) -> BTreeSet<String> {
    document
        .select(selector)
        .filter_map(|element| element.value().attr(attr))
        .map(str::to_string)
        .collect()
}
