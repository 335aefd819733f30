//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: Running / Done / Interrupted lifecycle of a crawl run
//! - `PageState`: What happened to an individual visited page

mod crawl_phase;
mod page_state;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use page_state::PageState;
