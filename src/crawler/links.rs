//! Link discovery
//!
//! Resolves the hrefs found on a page against the page URL and offers the
//! results to the frontier. Same-domain filtering and dedup are left to the
//! frontier.

use crate::crawler::Frontier;
use crate::url::resolve_href;
use url::Url;

/// Resolves raw hrefs to absolute http(s) URLs, preserving order
///
/// Unresolvable hrefs and non-web schemes are dropped.
pub fn resolve_links(hrefs: &[String], base_url: &Url) -> Vec<String> {
    hrefs
        .iter()
        .filter_map(|href| {
            let resolved = resolve_href(href, base_url);
            if resolved.is_none() {
                tracing::debug!("Dropping link {} found on {}", href, base_url);
            }
            resolved
        })
        .collect()
}

/// Offers every link to the frontier and returns how many were queued
pub fn enqueue_links(frontier: &mut Frontier, links: &[String]) -> usize {
    links.iter().filter(|link| frontier.enqueue(link)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/docs/page").unwrap()
    }

    fn hrefs(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_resolve_links() {
        let links = resolve_links(
            &hrefs(&["/a", "b", "https://other.com/c", "mailto:x@example.com"]),
            &base_url(),
        );
        assert_eq!(
            links,
            vec![
                "https://example.com/a",
                "https://example.com/docs/b",
                "https://other.com/c",
            ]
        );
    }

    #[test]
    fn test_enqueue_links_filters_domain_and_duplicates() {
        let mut frontier = Frontier::new(&base_url()).unwrap();
        let links = resolve_links(
            &hrefs(&[
                "/a",
                "/a",
                "https://other.com/b",
                "https://cdn.example.com/c",
                "page",
            ]),
            &base_url(),
        );

        let queued = enqueue_links(&mut frontier, &links);

        // "page" resolves to the seed itself, which is already queued
        assert_eq!(queued, 1);
        assert_eq!(frontier.queued_count(), 2);
    }

    #[test]
    fn test_cross_domain_links_never_queued() {
        let mut frontier = Frontier::new(&base_url()).unwrap();
        let links = resolve_links(
            &hrefs(&[
                "https://other.com/",
                "http://example.org/",
                "//elsewhere.net/x",
                "https://example.com:8443/",
            ]),
            &base_url(),
        );

        assert_eq!(enqueue_links(&mut frontier, &links), 0);
        assert_eq!(frontier.queued_count(), 1);
    }
}
