//! Output module for crawl results
//!
//! This module handles:
//! - Buffering chunk records and flushing them as JSON lines
//! - Recording and reporting crawl statistics

mod sink;
pub mod stats;

pub use sink::{JsonlSink, SinkError, SinkResult};
pub use stats::{log_statistics, CrawlStatistics};
