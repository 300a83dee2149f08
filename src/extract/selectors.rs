use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::Selector;

/// Compiled form of [`SelectorConfig`]
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    pub menu_item: Selector,
    pub menu_label_path: Vec<String>,
    pub menu_label: String,
    pub top_category_path: Vec<String>,
    pub subcategory_path: Vec<String>,
    pub nested_list: Selector,
    pub category_name_path: Vec<String>,
    pub category_link_path: Vec<String>,

    pub product_link: Selector,
    pub next_page: Selector,

    pub product_name: Selector,
    pub product_price: Selector,
    pub product_id: Selector,
    pub description_text: Selector,
    pub description_list: Selector,
    pub colors: Selector,
    pub sizes: Selector,
    pub image: Selector,
    pub image_attr: String,
}

impl SiteSelectors {
    /// Compiles every CSS selector of the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(SiteSelectors)` - All selectors parsed
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that failed
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            menu_item: css(&config.menu_item)?,
            menu_label_path: config.menu_label_path.clone(),
            menu_label: config.menu_label.clone(),
            top_category_path: config.top_category_path.clone(),
            subcategory_path: config.subcategory_path.clone(),
            nested_list: css(&config.nested_list)?,
            category_name_path: config.category_name_path.clone(),
            category_link_path: config.category_link_path.clone(),
            product_link: css(&config.product_link)?,
            next_page: css(&config.next_page)?,
            product_name: css(&config.product_name)?,
            product_price: css(&config.product_price)?,
            product_id: css(&config.product_id)?,
            description_text: css(&config.description_text)?,
            description_list: css(&config.description_list)?,
            colors: css(&config.colors)?,
            sizes: css(&config.sizes)?,
            image: css(&config.image)?,
            image_attr: config.image_attr.clone(),
        })
    }
}

fn css(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}
