//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates all aspects of
//! the crawling process:
//! - Dequeuing URLs from the frontier within the page budget
//! - Fetching, extracting, chunking and discovering links, one page at a time
//! - Pausing politely after each successful fetch
//! - Honouring the shutdown signal at every await point
//! - Flushing the accumulated chunks exactly once at the end

use crate::config::{Config, CrawlerConfig};
use crate::crawler::chunker::{ChunkRecord, Chunker, SentenceSplitter, UnicodeSentenceSplitter};
use crate::crawler::extractor::{ExtractError, Extractor};
use crate::crawler::fetcher::{FetchError, Fetcher, HttpFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::links::{enqueue_links, resolve_links};
use crate::crawler::strategy::{RandomizedStrategy, RequestStrategy};
use crate::output::{log_statistics, CrawlStatistics, JsonlSink};
use crate::state::{CrawlPhase, PageState};
use crate::CrawlError;
use std::future::Future;
use url::Url;

/// What visiting one URL produced
///
/// Nothing here touches crawl state; the coordinator applies an outcome only
/// once the page has been fully processed, so an interrupted page leaves no
/// trace in the output.
#[derive(Debug)]
pub enum PageOutcome {
    /// Text was chunked; links were found
    Processed {
        records: Vec<ChunkRecord>,
        links: Vec<String>,
    },

    /// Page had too little text to chunk; its links are still followed
    Empty { links: Vec<String> },

    /// The page could not be fetched
    FetchFailed(FetchError),

    /// The page was fetched but its markup could not be processed
    ExtractFailed(ExtractError),
}

impl PageOutcome {
    /// The page state this outcome maps to
    pub fn state(&self) -> PageState {
        match self {
            Self::Processed { .. } => PageState::Processed,
            Self::Empty { .. } => PageState::Empty,
            Self::FetchFailed(_) => PageState::FetchFailed,
            Self::ExtractFailed(_) => PageState::ExtractFailed,
        }
    }
}

/// Final result of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// `Done` or `Interrupted`
    pub phase: CrawlPhase,

    /// Per-page counters
    pub stats: CrawlStatistics,

    /// Records written by the final flush
    pub records_written: usize,
}

/// Main crawler coordinator structure
pub struct Coordinator<F = HttpFetcher, R = RandomizedStrategy, S = UnicodeSentenceSplitter> {
    config: CrawlerConfig,
    frontier: Frontier,
    fetcher: F,
    strategy: R,
    extractor: Extractor,
    chunker: Chunker<S>,
    sink: JsonlSink,
    stats: CrawlStatistics,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a coordinator with the HTTP fetcher and randomized politeness
    ///
    /// # Arguments
    ///
    /// * `config` - The validated crawler configuration
    /// * `seed` - The URL the crawl starts from; it fixes the crawl domain
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError)` - The seed has no host or the HTTP client failed to build
    pub fn new(config: &Config, seed: &Url) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(&config.crawler)?;
        let strategy = RandomizedStrategy::new(config.request.clone(), &config.crawler);
        Self::with_parts(config, seed, fetcher, strategy, UnicodeSentenceSplitter)
    }
}

impl<F, R, S> Coordinator<F, R, S>
where
    F: Fetcher,
    R: RequestStrategy,
    S: SentenceSplitter,
{
    /// Creates a coordinator from explicit collaborators
    pub fn with_parts(
        config: &Config,
        seed: &Url,
        fetcher: F,
        strategy: R,
        splitter: S,
    ) -> Result<Self, CrawlError> {
        // Seed the frontier; this fixes the crawl domain
        let frontier = Frontier::new(seed)?;
        let chunker = Chunker::with_splitter(splitter, config.crawler.max_tokens);
        let sink = JsonlSink::new(&config.output.results_path);

        tracing::info!(
            "Crawl domain: {} (page budget {}, chunk budget {} words)",
            frontier.domain(),
            config.crawler.max_pages,
            chunker.max_tokens()
        );
        tracing::info!("Results will be saved to {}", sink.path().display());

        Ok(Self {
            config: config.crawler.clone(),
            frontier,
            fetcher,
            strategy,
            extractor: Extractor::new(config.crawler.min_content_length),
            chunker,
            sink,
            stats: CrawlStatistics::default(),
            phase: CrawlPhase::Running,
        })
    }

    /// Runs the crawl loop until the frontier is exhausted, the page budget is
    /// reached, or `shutdown` completes
    ///
    /// `shutdown` is raced against every fetch and every politeness delay; when
    /// it wins, the in-flight page is abandoned and nothing more is dequeued.
    /// Call [`Coordinator::finish`] afterwards to flush the chunks.
    pub async fn run<Sig>(&mut self, shutdown: Sig) -> CrawlPhase
    where
        Sig: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        self.phase = CrawlPhase::Running;

        while let Some(url) = self.next_url() {
            tracing::info!("Crawling: {}", url);

            // Fetch and process the page, unless shutdown comes first
            let outcome = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                outcome = self.visit(&url) => Some(outcome),
            };
            let Some(outcome) = outcome else {
                tracing::info!("Abandoning in-flight page {}", url);
                return self.interrupted();
            };

            let state = self.commit(&url, outcome);

            // Politeness delay, skipped when nothing was fetched
            if state.was_fetched() {
                let delay = self.strategy.delay();
                tracing::debug!("Waiting {:?} before the next request", delay);
                let slept = tokio::select! {
                    biased;
                    _ = &mut shutdown => false,
                    _ = tokio::time::sleep(delay) => true,
                };
                if !slept {
                    return self.interrupted();
                }
            }
        }

        self.phase = CrawlPhase::Done;
        self.phase
    }

    /// Flushes the buffered chunks and reports on the run
    ///
    /// Consumes the coordinator, so the flush can only happen once.
    pub fn finish(self) -> Result<CrawlReport, CrawlError> {
        if !self.phase.is_terminal() {
            tracing::warn!("Saving a crawl that never ran to an end");
        }

        log_statistics(&self.stats, self.phase);
        let records_written = self.sink.flush()?;

        Ok(CrawlReport {
            phase: self.phase,
            stats: self.stats,
            records_written,
        })
    }

    /// The crawl frontier
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Chunk records accumulated so far, in crawl order
    pub fn records(&self) -> &[ChunkRecord] {
        self.sink.records()
    }

    /// Per-page counters so far
    pub fn stats(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// Current phase of the run
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Dequeues the next unvisited URL and marks it visited
    ///
    /// Returns None once the page budget is spent or the queue is empty.
    fn next_url(&mut self) -> Option<String> {
        loop {
            // Check the page budget before taking anything off the queue
            if self.frontier.visited_count() >= self.config.max_pages {
                tracing::info!("Page budget of {} reached", self.config.max_pages);
                return None;
            }

            let Some(url) = self.frontier.dequeue() else {
                tracing::info!("Frontier is empty, crawl complete");
                return None;
            };

            // Already crawled through an earlier path
            if self.frontier.is_visited(&url) {
                continue;
            }

            self.frontier.mark_visited(&url);
            return Some(url);
        }
    }

    /// Fetches and processes one page without touching crawl state
    async fn visit(&self, url: &str) -> PageOutcome {
        let headers = self.strategy.headers();

        // Fetch
        let body = match self.fetcher.fetch(url, &headers).await {
            Ok(body) => body,
            Err(e) => return PageOutcome::FetchFailed(e),
        };

        // Extract title, text and links
        let page = match self.extractor.extract(&body) {
            Ok(page) => page,
            Err(e) => return PageOutcome::ExtractFailed(e),
        };

        let links = match Url::parse(url) {
            Ok(base_url) => resolve_links(&page.hrefs, &base_url),
            Err(e) => {
                tracing::debug!("Cannot resolve links against {}: {}", url, e);
                Vec::new()
            }
        };

        // Chunk whatever text survived the length filter
        let records = page
            .text
            .map(|text| self.chunker.chunk_page(&page.title, &text))
            .unwrap_or_default();

        if records.is_empty() {
            PageOutcome::Empty { links }
        } else {
            PageOutcome::Processed { records, links }
        }
    }

    /// Applies a finished page's outcome to the crawl state
    fn commit(&mut self, url: &str, outcome: PageOutcome) -> PageState {
        let state = outcome.state();

        match outcome {
            PageOutcome::Processed { records, links } => {
                // Buffer the chunks, then grow the frontier
                tracing::info!("Processed {} chunks from {}", records.len(), url);
                self.stats.record_chunks(records.len());
                self.sink.extend(records);
                self.discover(&links);
            }
            PageOutcome::Empty { links } => {
                tracing::warn!("No content extracted from {}", url);
                self.discover(&links);
            }
            PageOutcome::FetchFailed(e) => {
                tracing::error!("Error fetching {}: {}", url, e);
            }
            PageOutcome::ExtractFailed(e) => {
                tracing::error!("Error extracting info from {}: {}", url, e);
            }
        }

        self.stats.record_page(state);
        state
    }

    fn discover(&mut self, links: &[String]) {
        let queued = enqueue_links(&mut self.frontier, links);
        self.stats.record_links(queued);
        tracing::debug!(
            "Queued {} of {} links ({} waiting)",
            queued,
            links.len(),
            self.frontier.queued_count()
        );
    }

    fn interrupted(&mut self) -> CrawlPhase {
        tracing::info!("Process interrupted by user. Saving data...");
        tracing::debug!("{} chunks buffered at interrupt", self.sink.len());
        self.phase = CrawlPhase::Interrupted;
        self.phase
    }
}

/// Runs a complete crawl with the default collaborators
///
/// This function orchestrates the entire crawl process:
///
/// 1. Seed the frontier
/// 2. Build the HTTP client
/// 3. Run the crawl loop until done or `shutdown` fires
/// 4. Flush the chunk records to the configured results file
///
/// # Example
///
/// ```no_run
/// use chunk_crawler::config::Config;
/// use chunk_crawler::crawler::run_crawl;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let seed = Url::parse("https://example.com/")?;
/// let shutdown = async {
///     let _ = tokio::signal::ctrl_c().await;
/// };
/// let report = run_crawl(&Config::default(), &seed, shutdown).await?;
/// println!("{} chunks written", report.records_written);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl<Sig>(config: &Config, seed: &Url, shutdown: Sig) -> Result<CrawlReport, CrawlError>
where
    Sig: Future<Output = ()>,
{
    let mut coordinator = Coordinator::new(config, seed)?;
    coordinator.run(shutdown).await;
    coordinator.finish()
}
