// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors of the job runner.

use camseq_merge::MergeError;
use std::path::PathBuf;
use thiserror::Error;

/// Job runner errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing command-line argument
    #[error("Usage: camseq <job.ron>")]
    Usage,

    /// File could not be read or written
    #[error("{path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File could not be parsed
    #[error("{path}: {source}")]
    Parse {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: ron::error::SpannedError,
    },

    /// Scene could not be serialized
    #[error("Failed to write scene: {0}")]
    Serialize(#[from] ron::Error),

    /// Report could not be serialized
    #[error("Failed to write report: {0}")]
    Report(#[from] serde_json::Error),

    /// Camera operation failed
    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Result type for the job runner
pub type Result<T> = std::result::Result<T, AppError>;
