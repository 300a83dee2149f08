//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small shop and run the full crawl
//! cycle end-to-end against it.

use shop_crawler::config::Config;
use shop_crawler::crawler::{Coordinator, HttpFetcher};
use shop_crawler::model::{CategoryNode, ProductInfo};
use shop_crawler::storage::{JsonStorage, CATEGORIES_FILE, INFO_FILE};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

/// Creates a test configuration pointing at the mock shop
fn create_test_config(base_url: &str, dump: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.start_url = format!("{}/", base_url);
    config.crawler.max_concurrent_requests = 4;
    config.crawler.request_timeout_secs = 5;
    config.crawler.retry_delay_ms = 10;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.output.dump_path = dump.to_string_lossy().to_string();
    config
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn home_page() -> String {
    r#"<html><body><nav><ul>
        <li><a href="/pages/about"><span><span>About</span></span></a></li>
        <li>
          <a href="/collections/all"><span><span>Shop by Product</span></span></a>
          <ul><div>
            <li>
              <a href="/collections/apparel"><span>Apparel</span></a>
              <ul>
                <li><a href="/collections/shirts"><span>Shirts</span></a></li>
                <li><a href="/collections/hats"><span>Hats</span></a></li>
              </ul>
            </li>
            <li><a href="/collections/sale"><span>Sale</span></a></li>
          </div></ul>
        </li>
    </ul></nav></body></html>"#
        .to_string()
}

fn listing_page(slugs: &[&str], next: Option<&str>) -> String {
    let cards: String = slugs
        .iter()
        .map(|slug| {
            format!(
                r#"<div class="card__inner"><a class="full-unstyled-link" href="/products/{}">{}</a></div>"#,
                slug, slug
            )
        })
        .collect();
    let next = next
        .map(|href| format!(r#"<a aria-label="Next page" href="{}">Next</a>"#, href))
        .unwrap_or_default();
    format!("<html><body>{}{}</body></html>", cards, next)
}

fn product_page(name: &str, price: &str, images: &[String]) -> String {
    let gallery: String = images
        .iter()
        .map(|src| format!(r#"<img src="{}">"#, src))
        .collect();
    format!(
        r#"<html><body>
        <h1> {name} </h1>
        <span class="price-item">{price}</span>
        <span class="product-sku">SKU-{name}</span>
        <div class="product__description rte">
          <p>Official <strong>{name}</strong>.</p>
          <ul>
            <li>Cotton<ul><li>Machine wash</li></ul></li>
            <li>Imported</li>
          </ul>
        </div>
        <input name="Color" value="Red"><input name="Color" value="Gold">
        <input name="Size" value="M"><input name="Size" value="M">
        <slider-component>{gallery}</slider-component>
        </body></html>"#
    )
}

fn product_dir(dump: &Path, category: &str, subcategory: &str, name: &str) -> std::path::PathBuf {
    dump.join(category).join(subcategory).join(name)
}

/// Mounts a shop with two subcategories; Shirts paginates over two pages
async fn mount_shop(server: &MockServer, image_hits: u64) {
    let base = server.uri();

    mount_html(server, "/", home_page()).await;
    mount_html(
        server,
        "/collections/shirts",
        listing_page(
            &["tee-1", "tee-2", "tee-3", "tee-4", "tee-5"],
            Some("/collections/shirts/page-2"),
        ),
    )
    .await;
    mount_html(
        server,
        "/collections/shirts/page-2",
        listing_page(&["tee-6"], None),
    )
    .await;
    mount_html(server, "/collections/hats", listing_page(&["cap"], None)).await;

    for (slug, name) in [
        ("tee-1", "Tee One"),
        ("tee-2", "Tee Two"),
        ("tee-3", "Tee Three"),
        ("tee-6", "Tee Six"),
    ] {
        let images = vec![format!("{}/img/{}.jpg?v=2", base, slug)];
        mount_html(
            server,
            &format!("/products/{}", slug),
            product_page(name, "$24.99", &images),
        )
        .await;
    }
    mount_html(server, "/products/cap", product_page("Cap", "$ 15.00", &[])).await;

    // Listing pages only follow their first three products
    for slug in ["tee-4", "tee-5"] {
        Mock::given(method("GET"))
            .and(path(format!("/products/{}", slug)))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(server)
            .await;
    }

    for slug in ["tee-1", "tee-2", "tee-3", "tee-6"] {
        Mock::given(method("GET"))
            .and(path(format!("/img/{}.jpg", slug)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG.to_vec()))
            .expect(image_hits)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_full_crawl_writes_dump_tree() {
    let server = MockServer::start().await;
    mount_shop(&server, 1).await;
    let dump = TempDir::new().unwrap();

    let config = create_test_config(&server.uri(), dump.path());
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let mut coordinator = Coordinator::new(config, fetcher).expect("Failed to create coordinator");
    coordinator.run().await.expect("Crawl failed");

    // home + 3 listing pages + 5 products
    assert_eq!(coordinator.pages_visited(), 9);
    assert_eq!(coordinator.records_saved(), 5);

    let categories: Vec<CategoryNode> = serde_json::from_str(
        &std::fs::read_to_string(dump.path().join(CATEGORIES_FILE)).unwrap(),
    )
    .unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Apparel");
    assert_eq!(categories[0].subcategories.len(), 2);

    for name in ["Tee One", "Tee Two", "Tee Three", "Tee Six"] {
        let dir = product_dir(dump.path(), "Apparel", "Shirts", name);
        assert!(dir.join(INFO_FILE).exists(), "missing record for {}", name);
    }
    assert!(!product_dir(dump.path(), "Apparel", "Shirts", "tee-4").exists());

    let info = JsonStorage::load_info(
        &product_dir(dump.path(), "Apparel", "Shirts", "Tee One").join(INFO_FILE),
    )
    .unwrap();
    assert_eq!(info.name, "Tee One");
    assert_eq!(info.price, "24.99");
    assert_eq!(info.id, "SKU-Tee One");
    assert_eq!(info.description_text, "Official Tee One.");
    assert_eq!(
        serde_json::to_value(&info.description_list).unwrap(),
        serde_json::json!([["Cotton", [["Machine wash"]]], ["Imported"]])
    );
    assert_eq!(info.colors.len(), 2);
    assert_eq!(info.sizes.len(), 1);

    let image = product_dir(dump.path(), "Apparel", "Shirts", "Tee One").join("tee-1.jpg");
    assert_eq!(std::fs::read(image).unwrap(), JPEG);
}

#[tokio::test]
async fn test_info_json_has_exact_keys() {
    let server = MockServer::start().await;
    mount_shop(&server, 1).await;
    let dump = TempDir::new().unwrap();

    let config = create_test_config(&server.uri(), dump.path());
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let mut coordinator = Coordinator::new(config, fetcher).unwrap();
    coordinator.run().await.unwrap();

    let raw = std::fs::read_to_string(
        product_dir(dump.path(), "Apparel", "Hats", "Cap").join(INFO_FILE),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();

    assert_eq!(
        keys,
        vec![
            "colors",
            "description_list",
            "description_text",
            "id",
            "image_urls",
            "name",
            "price",
            "sizes"
        ]
    );
    // A record without images is still saved
    assert_eq!(value["image_urls"], serde_json::json!([]));
    assert_eq!(value["price"], " 15.00");
    assert!(raw.contains("\n  \"name\""));
}

#[tokio::test]
async fn test_flat_layout_without_images() {
    let server = MockServer::start().await;
    mount_shop(&server, 0).await;
    let dump = TempDir::new().unwrap();

    let mut config = create_test_config(&server.uri(), dump.path());
    config.output.flatten = true;
    config.output.download_images = false;
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let mut coordinator = Coordinator::new(config, fetcher).unwrap();
    coordinator.run().await.unwrap();

    // The category index stays at the root
    assert!(dump.path().join(CATEGORIES_FILE).exists());
    let info: ProductInfo =
        JsonStorage::load_info(&dump.path().join("Tee Six").join(INFO_FILE)).unwrap();
    assert_eq!(info.name, "Tee Six");
    assert!(!dump.path().join("Tee Six").join("tee-6.jpg").exists());
    assert!(!dump.path().join("Apparel").exists());
}

#[tokio::test]
async fn test_image_failure_keeps_record() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", home_page()).await;
    mount_html(&server, "/collections/shirts", listing_page(&["tee-1"], None)).await;
    mount_html(
        &server,
        "/products/tee-1",
        product_page("Tee One", "$24.99", &[format!("{}/img/gone.jpg", base)]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/img/gone.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dump = TempDir::new().unwrap();
    let config = create_test_config(&base, dump.path());
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let mut coordinator = Coordinator::new(config, fetcher).unwrap();
    coordinator.run().await.unwrap();

    let dir = product_dir(dump.path(), "Apparel", "Shirts", "Tee One");
    assert!(dir.join(INFO_FILE).exists());
    assert!(!dir.join("gone.jpg").exists());
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /products/"),
        )
        .mount(&server)
        .await;
    mount_html(&server, "/", home_page()).await;
    mount_html(&server, "/collections/shirts", listing_page(&["tee-1"], None)).await;
    Mock::given(method("GET"))
        .and(path("/products/tee-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dump = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dump.path());
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let mut coordinator = Coordinator::new(config, fetcher).unwrap();
    coordinator.run().await.unwrap();

    assert!(dump.path().join(CATEGORIES_FILE).exists());
    assert_eq!(coordinator.records_saved(), 0);
}

#[tokio::test]
async fn test_robots_ignored_when_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
        .expect(0)
        .mount(&server)
        .await;
    mount_html(&server, "/", home_page()).await;

    let dump = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), dump.path());
    config.crawler.obey_robots = false;
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let mut coordinator = Coordinator::new(config, fetcher).unwrap();
    coordinator.run().await.unwrap();

    assert!(dump.path().join(CATEGORIES_FILE).exists());
}
