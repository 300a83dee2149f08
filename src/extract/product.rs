use crate::extract::description::{flatten_list, list_from_element, strip_tags};
use crate::extract::dom::{attr_values, first_text_match};
use crate::extract::SiteSelectors;
use crate::model::ProductRecord;
use scraper::Html;

/// Builds a [`ProductRecord`] from a product page
///
/// The document is not checked to actually be a product page; anything
/// missing comes back as an empty string or empty collection.
///
/// # Arguments
///
/// * `document` - The parsed product page
/// * `category` - Category the product was reached through
/// * `subcategory` - Subcategory the product was reached through
/// * `selectors` - Site location rules
pub fn extract_product(
    document: &Html,
    category: &str,
    subcategory: &str,
    selectors: &SiteSelectors,
) -> ProductRecord {
    let name = first_text_match(document, &selectors.product_name)
        .map(|name| name.trim().to_string())
        .unwrap_or_default();

    let price = first_text_match(document, &selectors.product_price)
        .map(|price| price.replace('$', ""))
        .unwrap_or_default();

    let id = first_text_match(document, &selectors.product_id).unwrap_or_default();

    let description_text = document
        .select(&selectors.description_text)
        .next()
        .map(|p| strip_tags(&p.html()))
        .unwrap_or_default();

    let description_list = document
        .select(&selectors.description_list)
        .next()
        .map(|ul| flatten_list(&list_from_element(ul)))
        .unwrap_or_default();

    ProductRecord {
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        name,
        price,
        id,
        description_text,
        description_list,
        colors: attr_values(document, &selectors.colors, "value"),
        sizes: attr_values(document, &selectors.sizes, "value"),
        image_urls: attr_values(document, &selectors.image, &selectors.image_attr),
        images: Vec::new(),
    }
}
