use url::Url;

/// Extracts the crawl domain from a URL
///
/// The domain is the lowercase host, followed by `:port` when the URL names a
/// port that is not the scheme's default. Two URLs belong to the same crawl
/// exactly when their domains are equal.
///
/// # Arguments
///
/// * `url` - The URL to extract the domain from
///
/// # Returns
///
/// * `Some(String)` - The lowercase domain, with port if explicit
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use chunk_crawler::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://example.com:443/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(extract_domain(&url), Some("localhost:8080".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Returns true if `url` parses and its domain equals `domain`
pub fn is_same_domain(url: &str, domain: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| extract_domain(&parsed))
        .is_some_and(|d| d == domain)
}
