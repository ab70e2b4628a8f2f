//! Failure categories surfaced by the generator.
//!
//! Every variant is terminal for the input being processed. Functions in this
//! crate return `anyhow::Result` and wrap these values with context; callers
//! that need the category use `downcast_ref::<SqlGenError>()`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlGenError {
    #[error("File not found: {path:?}")]
    FileNotFound { path: PathBuf },

    #[error("Could not decode {path:?} with any candidate encoding ({tried})")]
    EncodingDetectionFailure { path: PathBuf, tried: String },

    #[error("Malformed column dictionary {path:?}: {reason}")]
    MalformedDictionary { path: PathBuf, reason: String },

    #[error("Input {path:?} has no header labels on its first line")]
    EmptyInput { path: PathBuf },

    #[error("{} unresolved column label(s); see {log_path:?}", .labels.len())]
    UnresolvedColumns {
        labels: Vec<String>,
        log_path: PathBuf,
    },
}
