//! Data model for scraped shop content
//!
//! - `CategoryNode`: the two-level category tree read from the home page
//! - `ProductRecord`: everything extracted from one product page
//! - `ProductInfo`: the persisted projection of a record (`info.json`)

mod category;
mod product;

pub use category::{CategoryNode, SubcategoryNode};
pub use product::{
    DescriptionItem, DescriptionList, DescriptionPart, DownloadedImage, ProductInfo,
    ProductRecord,
};
