// SPDX-License-Identifier: MIT OR Apache-2.0
//! Camera action: the transform and lens tracks of one animated camera.

use crate::track::{LensTrack, TransformTrack};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Unique identifier for an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub Uuid);

impl ActionId {
    /// Create a new random action ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Animation data of a camera over an inclusive frame range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Unique action ID
    pub id: ActionId,
    /// Action name
    pub name: String,
    /// First frame of the range
    pub frame_start: i32,
    /// Last frame of the range (inclusive)
    pub frame_end: i32,
    /// Frame rate used to convert frames to seconds
    pub frame_rate: f32,
    /// Dense location/rotation keys
    pub transform: TransformTrack,
    /// Sparse lens keys
    pub lens: LensTrack,
}

/// Evaluated state of an action at one frame.
///
/// Lens fields are `None` when the channel carries no keys; the camera's
/// static lens value applies then.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionSample {
    /// Location
    pub location: Option<[f32; 3]>,
    /// Euler rotation
    pub rotation: Option<[f32; 3]>,
    /// Focal length (mm)
    pub focal_length: Option<f32>,
    /// Horizontal shift
    pub shift_x: Option<f32>,
    /// Vertical shift
    pub shift_y: Option<f32>,
}

impl Action {
    /// Create an empty action spanning `frame_start..=frame_end`
    pub fn new(name: impl Into<String>, frame_start: i32, frame_end: i32) -> Self {
        Self {
            id: ActionId::new(),
            name: name.into(),
            frame_start,
            frame_end,
            frame_rate: 24.0,
            transform: TransformTrack::new(),
            lens: LensTrack::new(),
        }
    }

    /// Set the frame rate
    pub fn with_frame_rate(mut self, frame_rate: f32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// The inclusive frame range
    pub fn frames(&self) -> RangeInclusive<i32> {
        self.frame_start..=self.frame_end
    }

    /// Number of frames in the range
    pub fn frame_count(&self) -> usize {
        usize::try_from(i64::from(self.frame_end) - i64::from(self.frame_start) + 1).unwrap_or(0)
    }

    /// Range length in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.frame_count() as f32 / self.frame_rate
    }

    /// Evaluate all channels at a frame
    pub fn evaluate(&self, frame: f32) -> ActionSample {
        ActionSample {
            location: self.transform.evaluate_location(frame),
            rotation: self.transform.evaluate_rotation(frame),
            focal_length: self.lens.focal_length.evaluate_float(frame),
            shift_x: self.lens.shift_x.evaluate_float(frame),
            shift_y: self.lens.shift_y.evaluate_float(frame),
        }
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::new("CameraAction", 1, 1)
    }
}
