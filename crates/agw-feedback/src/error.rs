//! Error types for the feedback crate.
//!
//! The coordinator itself never fails: every lifecycle event ends in a
//! reaction. These errors come from the edges, when settings or recorded
//! transcripts are read from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading settings or transcripts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedbackError {
    /// Settings file exists but could not be parsed.
    #[error("invalid settings in {path}: {reason}")]
    Settings {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Settings parsed but hold values the coordinator cannot use.
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting {
        /// Dotted setting name, e.g. `progress.minimum`.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A transcript line could not be decoded.
    #[error("transcript line {line}: {reason}")]
    Transcript {
        /// 1-based line number.
        line: usize,
        /// Decoder message.
        reason: String,
    },

    /// Event name is not one of the four lifecycle events.
    #[error("unknown lifecycle event: {0}")]
    UnknownEvent(String),

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeedbackError>;
