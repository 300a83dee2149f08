use url::Url;

/// Resolves a link href against the page it was found on
///
/// Returns None if the link should not be followed:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: schemes
/// - anything that does not resolve to an HTTP(S) URL
///
/// # Example
///
/// ```
/// use shop_crawler::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://shop.example.com/collections/mugs").unwrap();
/// let next = resolve_link("?page=2", &base).unwrap();
/// assert_eq!(next.as_str(), "https://shop.example.com/collections/mugs?page=2");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url)
        }
        _ => None,
    }
}

/// The robots.txt location for the site serving `url`
pub fn origin_robots_url(url: &Url) -> Option<Url> {
    url.join("/robots.txt").ok()
}
