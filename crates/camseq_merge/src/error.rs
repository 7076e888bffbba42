// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error type for merge and bind operations.

use crate::history::HistoryError;
use crate::scene::ObjectId;
use camseq_anim::TrackError;
use thiserror::Error;

/// Errors reported by camera operations.
///
/// Every variant is raised before the scene is mutated.
#[derive(Debug, Error)]
pub enum MergeError {
    /// No camera matched the selection or the seed's naming pattern
    #[error("No cameras found to merge: {0}")]
    NoSequenceFound(String),

    /// The seed selection spans several naming patterns
    #[error("Selection spans several camera name patterns: {}", .prefixes.join(", "))]
    AmbiguousSeed {
        /// Distinct name prefixes found among the seeds
        prefixes: Vec<String>,
    },

    /// The sequence to merge has no cameras
    #[error("Camera sequence is empty")]
    EmptySequence,

    /// The media reference cannot drive the camera
    #[error("Incompatible media '{media}': {reason}")]
    IncompatibleMedia {
        /// Media name
        media: String,
        /// What is wrong with it
        reason: String,
    },

    /// Two cameras of one sequence share an ordinal
    #[error("Cameras '{first}' and '{second}' share sequence ordinal {ordinal}")]
    DuplicateOrdinal {
        /// The shared ordinal
        ordinal: u64,
        /// Name of the earlier camera
        first: String,
        /// Name of the later camera
        second: String,
    },

    /// Sequence ordinals do not strictly increase
    #[error("Sequence ordinals must strictly increase ({previous} then {next})")]
    UnorderedSequence {
        /// Ordinal of the earlier entry
        previous: u64,
        /// Ordinal of the entry that follows it
        next: u64,
    },

    /// The timeline cannot hold the sequence from its start frame
    #[error("{len} frames starting at frame {start} do not fit on the timeline")]
    FrameRangeOverflow {
        /// Requested start frame
        start: i32,
        /// Number of frames to map
        len: usize,
    },

    /// Object id is not in the scene
    #[error("Object not found: {0:?}")]
    ObjectNotFound(ObjectId),

    /// Object exists but is not the expected kind of camera
    #[error("'{0}' is not a valid camera")]
    NotACamera(String),

    /// No camera could be resolved for the operation
    #[error("No camera found in the scene")]
    NoCameraFound,

    /// A keyframe could not be written
    #[error("Keyframe error: {0}")]
    Keyframe(#[from] TrackError),

    /// Undo/redo failure
    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

/// Result type for camera operations
pub type Result<T> = std::result::Result<T, MergeError>;

impl MergeError {
    pub(crate) fn incompatible(media: &str, reason: impl Into<String>) -> Self {
        Self::IncompatibleMedia {
            media: media.to_string(),
            reason: reason.into(),
        }
    }
}
