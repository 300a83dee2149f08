use serde::{Deserialize, Serialize};

/// A top-level category and the subcategories listed under it
///
/// The tree is read once from the home page and written wholesale to
/// `categories_list.json`. Only one level of nesting exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub name: String,
    /// Link as written in the menu (may be relative)
    pub link: String,
    pub subcategories: Vec<SubcategoryNode>,
}

/// A leaf entry of the category menu
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryNode {
    pub name: String,
    pub link: String,
}
