use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// One element of a description list item: either the item's own text or the
/// result of a nested list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptionPart {
    Text(String),
    List(DescriptionList),
}

/// A list item: `[text]`, `[nested]` or `[text, nested]`
pub type DescriptionItem = Vec<DescriptionPart>;

/// A whole list, one entry per `<li>`
pub type DescriptionList = Vec<DescriptionItem>;

/// An image written to disk by the image pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadedImage {
    /// Absolute URL the bytes were fetched from
    pub url: String,
    /// Destination file
    pub path: PathBuf,
    /// SHA-256 of the image bytes, hex encoded
    pub checksum: String,
}

/// Everything extracted from a single product page
///
/// Text fields default to `""` and collections to empty; a record never has
/// a missing field. `colors`, `sizes` and `image_urls` are sets; they are kept
/// ordered so that re-serialising the same record is byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRecord {
    pub category: String,
    pub subcategory: String,
    pub name: String,
    /// Decimal string without currency symbol
    pub price: String,
    pub id: String,
    pub description_text: String,
    pub description_list: DescriptionList,
    pub colors: BTreeSet<String>,
    pub sizes: BTreeSet<String>,
    /// Scheme-relative image URLs (`//cdn.host/path`)
    pub image_urls: BTreeSet<String>,
    /// Filled in by the image pipeline
    pub images: Vec<DownloadedImage>,
}

/// The persisted form of a record, written as `info.json`
///
/// Category, subcategory and images are deliberately absent: the first two
/// are encoded in the directory, the last lives next to the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub price: String,
    pub id: String,
    pub description_text: String,
    pub description_list: DescriptionList,
    pub colors: BTreeSet<String>,
    pub sizes: BTreeSet<String>,
    pub image_urls: BTreeSet<String>,
}

impl From<&ProductRecord> for ProductInfo {
    fn from(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone(),
            price: record.price.clone(),
            id: record.id.clone(),
            description_text: record.description_text.clone(),
            description_list: record.description_list.clone(),
            colors: record.colors.clone(),
            sizes: record.sizes.clone(),
            image_urls: record.image_urls.clone(),
        }
    }
}
