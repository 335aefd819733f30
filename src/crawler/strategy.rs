//! Per-request header and politeness-delay selection
//!
//! Every fetch asks a `RequestStrategy` for the headers to send, and every
//! successful fetch asks it how long to pause before the next one. The
//! production strategy rotates user agents and jitters the delay at random;
//! tests substitute a fixed strategy.

use crate::config::{CrawlerConfig, RequestConfig};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

/// Header set sent with one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
}

impl RequestHeaders {
    /// Headers sent with every request regardless of strategy
    pub const STATIC: [(&'static str, &'static str); 3] = [
        ("DNT", "1"),
        ("Connection", "keep-alive"),
        ("Upgrade-Insecure-Requests", "1"),
    ];

    /// All header name/value pairs, strategy-selected ones first
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = vec![
            ("User-Agent", self.user_agent.as_str()),
            ("Accept", self.accept.as_str()),
            ("Accept-Language", self.accept_language.as_str()),
            ("Referer", self.referer.as_str()),
        ];
        pairs.extend(Self::STATIC);
        pairs
    }
}

/// Supplies request headers and politeness delays
pub trait RequestStrategy {
    /// Headers for the next request
    fn headers(&self) -> RequestHeaders;

    /// Pause to observe after a successful fetch
    fn delay(&self) -> Duration;
}

/// Random user agent per request, uniformly random delay within bounds
#[derive(Debug, Clone)]
pub struct RandomizedStrategy {
    request: RequestConfig,
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl RandomizedStrategy {
    /// Creates a strategy from validated configuration
    pub fn new(request: RequestConfig, crawler: &CrawlerConfig) -> Self {
        Self {
            request,
            min_delay_ms: crawler.min_delay_ms,
            max_delay_ms: crawler.max_delay_ms.max(crawler.min_delay_ms),
        }
    }
}

impl RequestStrategy for RandomizedStrategy {
    fn headers(&self) -> RequestHeaders {
        let mut rng = rand::thread_rng();
        let user_agent = self
            .request
            .user_agents
            .choose(&mut rng)
            .cloned()
            .unwrap_or_default();

        RequestHeaders {
            user_agent,
            accept: self.request.accept.clone(),
            accept_language: self.request.accept_language.clone(),
            referer: self.request.referer.clone(),
        }
    }

    fn delay(&self) -> Duration {
        let millis = rand::thread_rng().gen_range(self.min_delay_ms..=self.max_delay_ms);
        Duration::from_millis(millis)
    }
}

/// Deterministic strategy: first configured user agent, constant delay
#[derive(Debug, Clone)]
pub struct FixedStrategy {
    headers: RequestHeaders,
    delay: Duration,
}

impl FixedStrategy {
    pub fn new(headers: RequestHeaders, delay: Duration) -> Self {
        Self { headers, delay }
    }

    /// Default headers (first user agent of the pool) and no delay
    pub fn immediate() -> Self {
        let request = RequestConfig::default();
        let user_agent = request.user_agents.first().cloned().unwrap_or_default();
        Self::new(
            RequestHeaders {
                user_agent,
                accept: request.accept,
                accept_language: request.accept_language,
                referer: request.referer,
            },
            Duration::ZERO,
        )
    }
}

impl RequestStrategy for FixedStrategy {
    fn headers(&self) -> RequestHeaders {
        self.headers.clone()
    }

    fn delay(&self) -> Duration {
        self.delay
    }
}
