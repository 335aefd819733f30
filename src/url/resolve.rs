use url::Url;

/// Resolves a link href against the page it was found on
///
/// Resolution is the only transformation applied: queries, fragments and
/// trailing slashes are kept as written, so `/a`, `/a/` and `/a#top` resolve
/// to three distinct URLs.
///
/// Returns None if the href cannot be resolved or resolves to anything other
/// than an `http`/`https` URL (`mailto:`, `javascript:`, `data:` and so on).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use chunk_crawler::url::resolve_href;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// assert_eq!(
///     resolve_href("setup#install", &base),
///     Some("https://example.com/docs/setup#install".to_string())
/// );
/// assert_eq!(resolve_href("mailto:team@example.com", &base), None);
/// ```
pub fn resolve_href(href: &str, base_url: &Url) -> Option<String> {
    let absolute = base_url.join(href).ok()?;

    match absolute.scheme() {
        "http" | "https" => Some(absolute.into()),
        _ => None,
    }
}
