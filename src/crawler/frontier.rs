//! Crawl frontier: FIFO work queue plus visited set
//!
//! URLs are identified by their exact string form. The frontier only accepts
//! URLs on the crawl's domain, and never queues a URL twice or re-queues one
//! that was already visited. Dequeue order is insertion order, which makes
//! the crawl breadth-first.
//!
//! The page budget is not enforced here; the coordinator stops dequeuing
//! once `visited_count()` reaches it.

use crate::url::{extract_domain, is_same_domain};
use crate::{UrlError, UrlResult};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Queue of URLs waiting to be visited, and the set already visited
#[derive(Debug, Clone)]
pub struct Frontier {
    /// Domain every accepted URL must belong to
    domain: String,

    /// URLs in insertion order
    queue: VecDeque<String>,

    /// Mirror of `queue` for constant-time membership checks
    queued: HashSet<String>,

    /// URLs handed out and marked visited
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier seeded with `seed`
    ///
    /// The crawl domain is taken from the seed.
    ///
    /// # Returns
    ///
    /// * `Ok(Frontier)` - Frontier holding only the seed
    /// * `Err(UrlError)` - The seed has no host
    pub fn new(seed: &Url) -> UrlResult<Self> {
        let domain =
            extract_domain(seed).ok_or_else(|| UrlError::MissingDomain(seed.to_string()))?;

        let mut frontier = Self {
            domain,
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
        };
        frontier.enqueue(seed.as_str());

        Ok(frontier)
    }

    /// Offers a URL to the frontier
    ///
    /// Returns true if the URL was queued. Visited, already queued and
    /// off-domain URLs are ignored.
    pub fn enqueue(&mut self, url: &str) -> bool {
        if self.visited.contains(url) || self.queued.contains(url) {
            return false;
        }

        if !is_same_domain(url, &self.domain) {
            tracing::trace!("Rejecting off-domain URL {}", url);
            return false;
        }

        self.queued.insert(url.to_string());
        self.queue.push_back(url.to_string());
        true
    }

    /// Removes and returns the earliest queued URL
    pub fn dequeue(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.queued.remove(&url);
        Some(url)
    }

    /// Records `url` as visited; calling it again has no effect
    pub fn mark_visited(&mut self, url: &str) {
        if !self.visited.contains(url) {
            self.visited.insert(url.to_string());
        }
    }

    /// Returns true if `url` has been marked visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of URLs marked visited
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs waiting in the queue
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is waiting in the queue
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The crawl domain
    pub fn domain(&self) -> &str {
        &self.domain
    }
}
