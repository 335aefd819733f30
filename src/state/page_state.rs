/// Page state definitions for tracking what happened to each visited URL
use std::fmt;

/// Represents the final state of a visited page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Page was fetched and produced at least one chunk
    Processed,

    /// Page was fetched but its cleaned text was too short to chunk
    Empty,

    /// Fetch failed (network error, timeout, non-success status)
    FetchFailed,

    /// Markup could not be processed
    ExtractFailed,
}

impl PageState {
    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if the page body was retrieved
    ///
    /// Politeness delays apply after every fetched page, whatever its content.
    pub fn was_fetched(&self) -> bool {
        !matches!(self, Self::FetchFailed)
    }

    /// Returns true if this represents an error state
    ///
    /// Empty pages are skipped but are not errors.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed | Self::ExtractFailed)
    }

    /// Short machine-friendly name, used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Empty => "empty",
            Self::FetchFailed => "fetch_failed",
            Self::ExtractFailed => "extract_failed",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> [Self; 4] {
        [
            Self::Processed,
            Self::Empty,
            Self::FetchFailed,
            Self::ExtractFailed,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
