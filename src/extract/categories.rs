use crate::extract::dom::{first_text, walk_path};
use crate::extract::SiteSelectors;
use crate::model::{CategoryNode, SubcategoryNode};
use scraper::{ElementRef, Html};

/// Reads the two-level category tree from the home page menu
///
/// The menu is the `menu_item` element whose label path carries the
/// configured `menu_label` text. Top-level entries without a nested list are
/// skipped; they are plain links, not categories.
pub fn read_categories(document: &Html, selectors: &SiteSelectors) -> Vec<CategoryNode> {
    document
        .select(&selectors.menu_item)
        .filter(|entry| is_category_menu(*entry, selectors))
        .flat_map(|menu| walk_path(menu, &selectors.top_category_path))
        .filter(|top| top.select(&selectors.nested_list).next().is_some())
        .map(|top| CategoryNode {
            name: entry_name(top, selectors),
            link: entry_link(top, selectors),
            subcategories: walk_path(top, &selectors.subcategory_path)
                .into_iter()
                .map(|sub| SubcategoryNode {
                    name: entry_name(sub, selectors),
                    link: entry_link(sub, selectors),
                })
                .collect(),
        })
        .collect()
}

fn is_category_menu(entry: ElementRef<'_>, selectors: &SiteSelectors) -> bool {
    walk_path(entry, &selectors.menu_label_path)
        .into_iter()
        .any(|label| {
            label.children().any(|node| {
                node.value()
                    .as_text()
                    .is_some_and(|text| text.trim() == selectors.menu_label)
            })
        })
}

fn entry_name(entry: ElementRef<'_>, selectors: &SiteSelectors) -> String {
    walk_path(entry, &selectors.category_name_path)
        .into_iter()
        .find_map(first_text)
        .unwrap_or_default()
}

fn entry_link(entry: ElementRef<'_>, selectors: &SiteSelectors) -> String {
    walk_path(entry, &selectors.category_link_path)
        .into_iter()
        .find_map(|link| link.value().attr("href"))
        .unwrap_or_default()
        .to_string()
}
