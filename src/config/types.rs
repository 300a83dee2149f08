use serde::Deserialize;

/// Main configuration structure for Shop-Crawler
///
/// Every section falls back to its defaults, so an empty file (or no file at
/// all) crawls the default storefront into `./dumps`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub selectors: SelectorConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Home page of the shop; the crawl starts here
    pub start_url: String,

    /// How many product links are followed from each listing page
    pub max_products_per_page: usize,

    /// Maximum number of requests in flight (pages and images combined)
    pub max_concurrent_requests: usize,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Retries for transient failures (5xx, 408, 429, timeouts)
    pub max_retries: u32,

    /// Pause between retries (milliseconds)
    pub retry_delay_ms: u64,

    /// Skip pages disallowed by the shop's robots.txt
    pub obey_robots: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: "https://shop.startrek.com".to_string(),
            max_products_per_page: 3,
            max_concurrent_requests: 8,
            request_timeout_secs: 30,
            max_retries: 2,
            retry_delay_ms: 1000,
            obey_robots: true,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "ShopCrawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/shop-crawler/shop-crawler".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Root directory of the dump tree
    pub dump_path: String,

    /// Drop the category/subcategory levels and write `<dump>/<name>/`
    pub flatten: bool,

    /// Download product images next to `info.json`
    pub download_images: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dump_path: "./dumps".to_string(),
            flatten: false,
            download_images: true,
        }
    }
}

/// Site-specific location rules
///
/// Plain strings are CSS selectors. `*-path` entries are sequences of tag names
/// walked through direct children, starting from the element they belong to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    /// Candidate elements for the category menu entry
    pub menu_item: String,
    /// Path from a menu entry to its label element
    pub menu_label_path: Vec<String>,
    /// Label text identifying the category menu
    pub menu_label: String,
    /// Path from the menu entry to the top-level categories
    pub top_category_path: Vec<String>,
    /// Path from a top-level category to its subcategories
    pub subcategory_path: Vec<String>,
    /// Marker a top-level category must contain to be kept
    pub nested_list: String,
    /// Path from a category entry to its name element
    pub category_name_path: Vec<String>,
    /// Path from a category entry to its link element
    pub category_link_path: Vec<String>,

    /// Product links on a listing page
    pub product_link: String,
    /// "Next page" link on a listing page
    pub next_page: String,

    pub product_name: String,
    pub product_price: String,
    pub product_id: String,
    pub description_text: String,
    pub description_list: String,
    pub colors: String,
    pub sizes: String,
    pub image: String,
    /// Attribute holding the image location
    pub image_attr: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        fn path(tags: &[&str]) -> Vec<String> {
            tags.iter().map(|tag| tag.to_string()).collect()
        }

        Self {
            menu_item: "li".to_string(),
            menu_label_path: path(&["a", "span", "span"]),
            menu_label: "Shop by Product".to_string(),
            top_category_path: path(&["ul", "div", "li"]),
            subcategory_path: path(&["ul", "li"]),
            nested_list: "ul".to_string(),
            category_name_path: path(&["a", "span"]),
            category_link_path: path(&["a"]),
            product_link: "div.card__inner a.full-unstyled-link".to_string(),
            next_page: "a[aria-label='Next page']".to_string(),
            product_name: "h1".to_string(),
            product_price: "span.price-item".to_string(),
            product_id: "span.product-sku".to_string(),
            description_text: "div.product__description p".to_string(),
            description_list: "div[class='product__description rte'] > ul".to_string(),
            colors: "input[name='Color']".to_string(),
            sizes: "input[name='Size']".to_string(),
            image: "slider-component img".to_string(),
            image_attr: "src".to_string(),
        }
    }
}

impl Config {
    /// Formats the user agent header: `Name/Version (+ContactURL)`
    pub fn user_agent_string(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.user_agent.crawler_name,
            self.user_agent.crawler_version,
            self.user_agent.contact_url
        )
    }
}
