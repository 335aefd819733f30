//! URL handling module for Chunk-Crawler
//!
//! This module provides seed validation, domain extraction and
//! relative-to-absolute link resolution. URLs are never normalized beyond
//! what resolution against a base does.

mod domain;
mod resolve;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, is_same_domain};
pub use resolve::resolve_href;

/// Parses and validates the seed URL a crawl starts from
///
/// The seed must be an absolute `http` or `https` URL with a host.
/// Surrounding whitespace (as typed at the prompt) is ignored.
///
/// # Examples
///
/// ```
/// use chunk_crawler::url::parse_seed;
///
/// let seed = parse_seed("  https://example.com/docs ").unwrap();
/// assert_eq!(seed.as_str(), "https://example.com/docs");
///
/// assert!(parse_seed("ftp://example.com/").is_err());
/// assert!(parse_seed("not a url").is_err());
/// ```
pub fn parse_seed(seed: &str) -> UrlResult<Url> {
    let seed = seed.trim();
    let url = Url::parse(seed).map_err(|e| UrlError::Parse(format!("'{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if extract_domain(&url).is_none() {
        return Err(UrlError::MissingDomain(seed.to_string()));
    }

    Ok(url)
}
