//! Run statistics
//!
//! Counters collected while crawling and reported once the run ends.

use crate::state::{CrawlPhase, PageState};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Count of visited pages by final state
    pub pages_by_state: HashMap<PageState, u64>,

    /// Chunk records produced
    pub total_chunks: u64,

    /// Discovered links accepted into the frontier
    pub links_queued: u64,
}

impl CrawlStatistics {
    /// Records the final state of one visited page
    pub fn record_page(&mut self, state: PageState) {
        *self.pages_by_state.entry(state).or_insert(0) += 1;
    }

    pub fn record_chunks(&mut self, count: usize) {
        self.total_chunks += count as u64;
    }

    pub fn record_links(&mut self, count: usize) {
        self.links_queued += count as u64;
    }

    /// Number of pages that ended in `state`
    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Pages whose visit completed, in any state
    pub fn pages_visited(&self) -> u64 {
        self.pages_by_state.values().sum()
    }

    /// Pages that ended in an error state
    pub fn total_errors(&self) -> u64 {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Percentage of visited pages that produced chunks
    pub fn success_rate(&self) -> f64 {
        let visited = self.pages_visited();
        if visited == 0 {
            return 0.0;
        }

        let succeeded: u64 = self
            .pages_by_state
            .iter()
            .filter(|(state, _)| state.is_success())
            .map(|(_, count)| count)
            .sum();
        (succeeded as f64 / visited as f64) * 100.0
    }
}

/// Logs the statistics of a finished run
pub fn log_statistics(stats: &CrawlStatistics, phase: CrawlPhase) {
    tracing::info!(
        "Crawl {}: {} pages visited, {} chunks created, {} links queued",
        phase,
        stats.pages_visited(),
        stats.total_chunks,
        stats.links_queued
    );

    for state in PageState::all_states() {
        let count = stats.count(state);
        if count > 0 {
            tracing::info!("  {}: {}", state, count);
        }
    }

    if stats.total_errors() > 0 {
        tracing::warn!("{} pages failed", stats.total_errors());
    }

    tracing::info!("Success rate: {:.1}%", stats.success_rate());
}
