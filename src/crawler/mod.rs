//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The FIFO frontier with domain containment and dedup
//! - HTTP fetching and per-request header/delay strategies
//! - Visible-text extraction and sentence-bounded chunking
//! - Link discovery
//! - Overall crawl coordination

mod chunker;
mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod links;
mod strategy;

pub use chunker::{
    word_count, ChunkRecord, Chunker, SentenceSplitter, UnicodeSentenceSplitter,
    DEFAULT_MAX_TOKENS,
};
pub use coordinator::{run_crawl, Coordinator, CrawlReport, PageOutcome};
pub use extractor::{
    clean_text, ExtractError, ExtractedPage, Extractor, DEFAULT_MIN_CONTENT_LENGTH,
    STRIPPED_ELEMENTS, UNTITLED,
};
pub use fetcher::{build_http_client, header_map, FetchError, Fetcher, HttpFetcher};
pub use frontier::Frontier;
pub use links::{enqueue_links, resolve_links};
pub use strategy::{FixedStrategy, RandomizedStrategy, RequestHeaders, RequestStrategy};
