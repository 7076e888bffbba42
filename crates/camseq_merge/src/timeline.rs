// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence position to timeline frame mapping.

use crate::error::{MergeError, Result};
use std::ops::RangeInclusive;

/// Maps sequence positions `0..len` onto consecutive frames from `start`.
///
/// Only list position matters; gaps in the source ordinals never leave
/// gaps on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMapping {
    start: i32,
    end: i32,
    len: u32,
}

impl FrameMapping {
    /// Mapping for `len` cameras anchored at `start`.
    ///
    /// Fails when frame `start + len - 1` is past the end of the timeline.
    pub fn new(start: i32, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(MergeError::EmptySequence);
        }
        let overflow = || MergeError::FrameRangeOverflow { start, len };
        let count = u32::try_from(len).map_err(|_| overflow())?;
        let end = start.checked_add_unsigned(count - 1).ok_or_else(overflow)?;
        Ok(Self { start, end, len: count })
    }

    /// First mapped frame
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Last mapped frame, always `start + len - 1`
    pub fn end(&self) -> i32 {
        self.end
    }

    /// Number of mapped frames
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; a mapping covers at least one frame
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Frame for a sequence position
    pub fn frame_at(&self, position: usize) -> Option<i32> {
        let position = u32::try_from(position).ok().filter(|p| *p < self.len)?;
        self.start.checked_add_unsigned(position)
    }

    /// Sequence position shown at a frame
    pub fn position_of(&self, frame: i32) -> Option<usize> {
        if !self.frames().contains(&frame) {
            return None;
        }
        usize::try_from(i64::from(frame) - i64::from(self.start)).ok()
    }

    /// All mapped frames
    pub fn frames(&self) -> RangeInclusive<i32> {
        self.start..=self.end()
    }
}
