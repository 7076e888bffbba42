// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ordered run of source cameras.

use crate::error::{MergeError, Result};
use crate::scene::ObjectId;
use serde::{Deserialize, Serialize};

/// A camera in a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceEntry {
    /// Source camera object
    pub camera: ObjectId,
    /// Ordering ordinal; strictly increasing along the sequence, gaps allowed
    pub ordinal: u64,
}

/// Source cameras believed to form one continuous shot.
///
/// Entries reference scene objects; the scene keeps ownership of the cameras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Base name shared by the cameras, if one could be derived
    pub name: Option<String>,
    entries: Vec<SequenceEntry>,
}

impl Sequence {
    /// Build a sequence, rejecting duplicate or decreasing ordinals
    pub fn new(name: Option<String>, entries: Vec<SequenceEntry>) -> Result<Self> {
        for pair in entries.windows(2) {
            if pair[1].ordinal <= pair[0].ordinal {
                return Err(MergeError::UnorderedSequence {
                    previous: pair[0].ordinal,
                    next: pair[1].ordinal,
                });
            }
        }
        Ok(Self { name, entries })
    }

    /// Entries in order
    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }

    /// Camera ids in order
    pub fn cameras(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.entries.iter().map(|e| e.camera)
    }

    /// Number of cameras
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the sequence has no cameras
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the ordinals skip values
    pub fn has_gaps(&self) -> bool {
        self.entries
            .windows(2)
            .any(|pair| pair[1].ordinal != pair[0].ordinal + 1)
    }
}
