//! Sentence-bounded chunking of page text
//!
//! Text is split into sentences and sentences are packed greedily into chunks
//! whose word count stays within `max_tokens`. Word count stands in for a
//! real tokenizer. Sentences are never split, so a single sentence longer
//! than the budget becomes a chunk of its own. The current chunk is closed
//! whenever the next sentence would overflow it, even while still empty, so
//! an oversized opening sentence is preceded by an empty part.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Default chunk budget, in words
pub const DEFAULT_MAX_TOKENS: usize = 500;

/// One chunk of one page, as written to the results file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// `"<page title> - Part <n>"`, with `n` starting at 1
    #[serde(rename = "title")]
    pub label: String,

    /// Sentences of the chunk joined by single spaces
    pub content: String,
}

impl ChunkRecord {
    /// Builds the record for the `index`-th (0-based) chunk of a page
    pub fn new(title: &str, index: usize, content: String) -> Self {
        Self {
            label: format!("{} - Part {}", title, index + 1),
            content,
        }
    }
}

/// Splits text into sentences
pub trait SentenceSplitter {
    /// Returns the sentences of `text` in order, trimmed and non-empty
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Sentence splitter based on Unicode sentence boundaries (UAX #29)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSplitter;

impl SentenceSplitter for UnicodeSentenceSplitter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Number of whitespace-separated words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Packs sentences into word-budgeted chunks
#[derive(Debug, Clone)]
pub struct Chunker<S = UnicodeSentenceSplitter> {
    splitter: S,
    max_tokens: usize,
}

impl Chunker<UnicodeSentenceSplitter> {
    /// Creates a chunker using Unicode sentence boundaries
    pub fn new(max_tokens: usize) -> Self {
        Self::with_splitter(UnicodeSentenceSplitter, max_tokens)
    }
}

impl<S: SentenceSplitter> Chunker<S> {
    /// Creates a chunker with a custom sentence splitter
    pub fn with_splitter(splitter: S, max_tokens: usize) -> Self {
        Self {
            splitter,
            max_tokens,
        }
    }

    /// The chunk budget, in words
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Splits `text` into chunk strings
    ///
    /// # Example
    ///
    /// ```
    /// use chunk_crawler::crawler::Chunker;
    ///
    /// let chunker = Chunker::new(5);
    /// let chunks = chunker.chunk_text("One two three. Four five. Six seven eight.");
    /// assert_eq!(chunks, vec!["One two three. Four five.", "Six seven eight."]);
    /// ```
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_words = 0;

        for sentence in self.splitter.split(text) {
            let words = word_count(sentence);

            // Close the current chunk once the budget would be exceeded
            if current_words + words > self.max_tokens {
                chunks.push(current.join(" "));
                current.clear();
                current_words = 0;
            }

            current.push(sentence);
            current_words += words;
        }

        if !current.is_empty() {
            chunks.push(current.join(" "));
        }

        chunks
    }

    /// Chunks a page's text into labelled records
    pub fn chunk_page(&self, title: &str, text: &str) -> Vec<ChunkRecord> {
        self.chunk_text(text)
            .into_iter()
            .enumerate()
            .map(|(i, content)| ChunkRecord::new(title, i, content))
            .collect()
    }
}
