use crate::crawler::{DEFAULT_MAX_TOKENS, DEFAULT_MIN_CONTENT_LENGTH};
use serde::Deserialize;

/// Browser user-agent strings rotated across requests
pub const DEFAULT_USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.107 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:90.0) Gecko/20100101 Firefox/90.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.2 Safari/605.1.15",
];

/// Main configuration structure for Chunk-Crawler
///
/// Every section and key is optional; missing values fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub request: RequestConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of distinct pages visited in one run
    pub max_pages: usize,

    /// Chunk budget, in whitespace-separated words
    pub max_tokens: usize,

    /// Cleaned text must be longer than this many characters to be chunked
    pub min_content_length: usize,

    /// Lower bound of the pause after a successful fetch (milliseconds)
    pub min_delay_ms: u64,

    /// Upper bound of the pause after a successful fetch (milliseconds)
    pub max_delay_ms: u64,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 100,
            max_tokens: DEFAULT_MAX_TOKENS,
            min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
            min_delay_ms: 1000,
            max_delay_ms: 3000,
            request_timeout_secs: 10,
        }
    }
}

/// Outbound request header configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RequestConfig {
    /// Pool of User-Agent values, one picked at random per request
    pub user_agents: Vec<String>,

    /// Accept header value
    pub accept: String,

    /// Accept-Language header value
    pub accept_language: String,

    /// Static Referer header value
    pub referer: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            user_agents: DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            referer: "https://www.google.com/".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the JSON lines file chunk records are flushed to
    pub results_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: "crawler_results.jsonl".to_string(),
        }
    }
}
