//! Custom error types for articlecorpus.
//!
//! Recoverable conditions (missing text files, missing abstracts, short
//! full-text) never surface here; they are resolved by the loader's fallback
//! chain and recorded as flags on the article. Everything in this module
//! aborts the operation that raised it.

use thiserror::Error;

/// Main error type for articlecorpus operations.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A metadata entry lacks a required field
    #[error("Metadata entry {index} is missing required field `{field}`")]
    MissingField {
        /// Position of the entry in the input sequence
        index: usize,
        /// Dotted field name, e.g. `journal.title`
        field: &'static str,
    },

    /// A metadata entry has a field of the wrong shape
    #[error("Metadata entry {index} is malformed: {source}")]
    InvalidEntry {
        /// Position of the entry in the input sequence
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The year field is present but not an integer
    #[error("Metadata entry {index} has a non-numeric year: {value}")]
    InvalidYear {
        /// Position of the entry in the input sequence
        index: usize,
        /// Raw value as found in the metadata
        value: String,
    },

    /// Paths and metadata entries are not index-aligned
    #[error("Input length mismatch: {paths} text paths but {entries} metadata entries")]
    LengthMismatch { paths: usize, entries: usize },

    /// Corpus construction with no records
    #[error("Cannot build a corpus from zero articles")]
    EmptyCorpus,

    /// Malformed regular expression in a named query
    #[error("Invalid pattern for column `{column}`: {source}")]
    Pattern {
        column: String,
        #[source]
        source: regex::Error,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A blocking column scan panicked or was cancelled
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using `CorpusError`
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Extension trait for turning absent metadata fields into load errors
pub trait OptionExt<T> {
    /// Convert Option to Result with a missing-field error
    fn ok_or_missing(self, index: usize, field: &'static str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing(self, index: usize, field: &'static str) -> Result<T> {
        self.ok_or(CorpusError::MissingField { index, field })
    }
}
