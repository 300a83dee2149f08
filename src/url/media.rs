/// Makes a stored image URL fetchable
///
/// Image URLs are kept scheme-relative (`//cdn.host/path`) and fetched over
/// HTTPS. URLs that already carry a scheme are returned unchanged.
pub fn absolute_image_url(raw: &str) -> String {
    if raw.starts_with("//") {
        format!("https:{}", raw)
    } else {
        raw.to_string()
    }
}

/// File name for a downloaded image: the last path segment without its query
///
/// `//cdn.example.com/img/prod1.jpg?v=2` becomes `prod1.jpg`.
pub fn file_name_from_url(url: &str) -> String {
    let last_segment = url.rsplit('/').next().unwrap_or(url);
    last_segment
        .split('?')
        .next()
        .unwrap_or(last_segment)
        .to_string()
}
