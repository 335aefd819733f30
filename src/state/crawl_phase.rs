/// Lifecycle of one crawl run
use std::fmt;

/// The phase a crawl run is in
///
/// A run starts `Running` and ends in exactly one of the terminal phases.
/// Both terminal phases flush the accumulated chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Pages are being dequeued and processed
    Running,

    /// The frontier ran dry or the page budget was reached
    Done,

    /// The shutdown signal fired before the crawl finished
    Interrupted,
}

impl CrawlPhase {
    /// Returns true once no further pages will be visited
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Done => f.write_str("done"),
            Self::Interrupted => f.write_str("interrupted"),
        }
    }
}
