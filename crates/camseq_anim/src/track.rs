// SPDX-License-Identifier: MIT OR Apache-2.0
//! Channel tracks for camera animation.

use crate::keyframe::{InterpolationMode, Keyframe, KeyframeId, KeyframeValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Track errors
#[derive(Debug, Error, PartialEq)]
pub enum TrackError {
    /// A keyframe value does not fit the channel it was written to
    #[error("{channel} channel expects {expected} values, got {got}")]
    ValueMismatch {
        /// Channel that rejected the value
        channel: &'static str,
        /// Value type the channel stores
        expected: &'static str,
        /// Value type that was offered
        got: &'static str,
    },
}

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera property a track animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Object location
    Location,
    /// Object euler rotation (radians, XYZ)
    Rotation,
    /// Lens focal length (mm)
    FocalLength,
    /// Horizontal sensor shift
    ShiftX,
    /// Vertical sensor shift
    ShiftY,
}

impl ChannelKind {
    /// Property path of the channel on the host object
    pub fn data_path(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Rotation => "rotation_euler",
            Self::FocalLength => "lens",
            Self::ShiftX => "shift_x",
            Self::ShiftY => "shift_y",
        }
    }

    /// Whether the channel stores 3D vectors
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Location | Self::Rotation)
    }

    fn accepts(&self, value: &KeyframeValue) -> bool {
        match value {
            KeyframeValue::Vec3(_) => self.is_vector(),
            KeyframeValue::Float(_) => !self.is_vector(),
        }
    }
}

/// A single-property animation channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    /// Animated property
    pub kind: ChannelKind,
    /// Keyframes, sorted by frame, at most one per frame
    keyframes: Vec<Keyframe>,
}

impl Track {
    /// Create a new empty track
    pub fn new(kind: ChannelKind) -> Self {
        Self {
            id: TrackId::new(),
            kind,
            keyframes: Vec::new(),
        }
    }

    /// Insert or replace the keyframe at `keyframe.frame`
    pub fn add_keyframe(&mut self, keyframe: Keyframe) -> Result<KeyframeId, TrackError> {
        if !self.kind.accepts(&keyframe.value) {
            return Err(TrackError::ValueMismatch {
                channel: self.kind.data_path(),
                expected: if self.kind.is_vector() { "vec3" } else { "float" },
                got: keyframe.value.type_name(),
            });
        }
        Ok(self.insert(keyframe))
    }

    fn insert(&mut self, keyframe: Keyframe) -> KeyframeId {
        let id = keyframe.id;
        match self.keyframes.binary_search_by_key(&keyframe.frame, |k| k.frame) {
            Ok(idx) => self.keyframes[idx] = keyframe,
            Err(idx) => self.keyframes.insert(idx, keyframe),
        }
        id
    }

    /// Insert or update keyframe at frame
    pub fn set_keyframe_at(
        &mut self,
        frame: i32,
        value: KeyframeValue,
        interpolation: InterpolationMode,
    ) -> Result<KeyframeId, TrackError> {
        self.add_keyframe(Keyframe::new(frame, value).with_interpolation(interpolation))
    }

    /// Remove a keyframe
    pub fn remove_keyframe(&mut self, keyframe_id: KeyframeId) {
        self.keyframes.retain(|k| k.id != keyframe_id);
    }

    /// Remove every keyframe
    pub fn clear(&mut self) {
        self.keyframes.clear();
    }

    /// Get keyframe at frame (if exists)
    pub fn keyframe_at(&self, frame: i32) -> Option<&Keyframe> {
        self.keyframes
            .binary_search_by_key(&frame, |k| k.frame)
            .ok()
            .map(|idx| &self.keyframes[idx])
    }

    /// Get all keyframes
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Frames that carry a key, in order
    pub fn keyed_frames(&self) -> Vec<i32> {
        self.keyframes.iter().map(|k| k.frame).collect()
    }

    /// Get keyframe count
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Whether the track has no keys
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// First and last keyed frame
    pub fn frame_range(&self) -> Option<(i32, i32)> {
        Some((self.keyframes.first()?.frame, self.keyframes.last()?.frame))
    }

    /// Find keyframes surrounding a frame
    fn find_keyframes(&self, frame: f32) -> (Option<&Keyframe>, Option<&Keyframe>) {
        // First keyframe strictly after frame, so an exact hit resolves to its own key
        let next_idx = self.keyframes.iter().position(|k| k.frame as f32 > frame);

        match next_idx {
            None => (self.keyframes.last(), None),
            Some(0) => (None, self.keyframes.first()),
            Some(idx) => (Some(&self.keyframes[idx - 1]), Some(&self.keyframes[idx])),
        }
    }

    /// Evaluate the track value at a (possibly fractional) frame
    pub fn evaluate(&self, frame: f32) -> Option<KeyframeValue> {
        match self.find_keyframes(frame) {
            (None, None) => None,
            (Some(kf), None) | (None, Some(kf)) => Some(kf.value),
            (Some(a), Some(b)) => {
                let t = (frame - a.frame as f32) / (b.frame - a.frame) as f32;
                a.value.interpolate(&b.value, t, a.interpolation)
            }
        }
    }

    /// Evaluate a scalar channel
    pub fn evaluate_float(&self, frame: f32) -> Option<f32> {
        self.evaluate(frame)?.as_float()
    }

    /// Evaluate a vector channel
    pub fn evaluate_vec3(&self, frame: f32) -> Option<[f32; 3]> {
        self.evaluate(frame)?.as_vec3()
    }
}

/// Transform track with location and rotation channels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformTrack {
    /// Location channel
    pub location: Track,
    /// Euler rotation channel
    pub rotation: Track,
}

impl TransformTrack {
    /// Create a new transform track
    pub fn new() -> Self {
        Self {
            location: Track::new(ChannelKind::Location),
            rotation: Track::new(ChannelKind::Rotation),
        }
    }

    /// Key location and rotation together at a frame
    pub fn add_pose(&mut self, frame: i32, location: [f32; 3], rotation: [f32; 3]) {
        self.location.insert(Keyframe::new(frame, KeyframeValue::Vec3(location)));
        self.rotation.insert(Keyframe::new(frame, KeyframeValue::Vec3(rotation)));
    }

    /// Evaluate location at frame
    pub fn evaluate_location(&self, frame: f32) -> Option<[f32; 3]> {
        self.location.evaluate_vec3(frame)
    }

    /// Evaluate rotation at frame
    pub fn evaluate_rotation(&self, frame: f32) -> Option<[f32; 3]> {
        self.rotation.evaluate_vec3(frame)
    }

    /// Number of posed frames
    pub fn keyframe_count(&self) -> usize {
        self.location.keyframe_count()
    }
}

impl Default for TransformTrack {
    fn default() -> Self {
        Self::new()
    }
}

/// Lens track with independently sparse focal length and shift channels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LensTrack {
    /// Focal length keyframes (mm)
    pub focal_length: Track,
    /// Horizontal shift keyframes
    pub shift_x: Track,
    /// Vertical shift keyframes
    pub shift_y: Track,
}

impl LensTrack {
    /// Create a new lens track
    pub fn new() -> Self {
        Self {
            focal_length: Track::new(ChannelKind::FocalLength),
            shift_x: Track::new(ChannelKind::ShiftX),
            shift_y: Track::new(ChannelKind::ShiftY),
        }
    }

    /// Get a channel by kind
    pub fn channel(&self, kind: ChannelKind) -> Option<&Track> {
        match kind {
            ChannelKind::FocalLength => Some(&self.focal_length),
            ChannelKind::ShiftX => Some(&self.shift_x),
            ChannelKind::ShiftY => Some(&self.shift_y),
            ChannelKind::Location | ChannelKind::Rotation => None,
        }
    }

    /// Get a mutable channel by kind
    pub fn channel_mut(&mut self, kind: ChannelKind) -> Option<&mut Track> {
        match kind {
            ChannelKind::FocalLength => Some(&mut self.focal_length),
            ChannelKind::ShiftX => Some(&mut self.shift_x),
            ChannelKind::ShiftY => Some(&mut self.shift_y),
            ChannelKind::Location | ChannelKind::Rotation => None,
        }
    }

    /// Whether no lens channel carries keys
    pub fn is_static(&self) -> bool {
        self.focal_length.is_empty() && self.shift_x.is_empty() && self.shift_y.is_empty()
    }

    /// Remove every lens key
    pub fn clear(&mut self) {
        self.focal_length.clear();
        self.shift_x.clear();
        self.shift_y.clear();
    }
}

impl Default for LensTrack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_stay_sorted_and_unique() {
        let mut track = Track::new(ChannelKind::FocalLength);
        track.set_keyframe_at(30, KeyframeValue::Float(50.0), InterpolationMode::Constant).unwrap();
        track.set_keyframe_at(24, KeyframeValue::Float(35.0), InterpolationMode::Constant).unwrap();
        track.set_keyframe_at(30, KeyframeValue::Float(55.0), InterpolationMode::Constant).unwrap();

        assert_eq!(track.keyed_frames(), vec![24, 30]);
        assert_eq!(track.keyframe_at(30).map(|k| k.value), Some(KeyframeValue::Float(55.0)));
        assert_eq!(track.frame_range(), Some((24, 30)));
    }

    #[test]
    fn test_rejects_wrong_value_type() {
        let mut track = Track::new(ChannelKind::Location);
        let err = track
            .set_keyframe_at(1, KeyframeValue::Float(1.0), InterpolationMode::Linear)
            .unwrap_err();
        assert_eq!(
            err,
            TrackError::ValueMismatch { channel: "location", expected: "vec3", got: "float" }
        );
        assert!(track.is_empty());
    }

    #[test]
    fn test_constant_interpolation_steps() {
        let mut track = Track::new(ChannelKind::FocalLength);
        track.set_keyframe_at(24, KeyframeValue::Float(35.0), InterpolationMode::Constant).unwrap();
        track.set_keyframe_at(29, KeyframeValue::Float(50.0), InterpolationMode::Constant).unwrap();

        assert_eq!(track.evaluate_float(20.0), Some(35.0));
        assert_eq!(track.evaluate_float(28.0), Some(35.0));
        assert_eq!(track.evaluate_float(29.0), Some(50.0));
        assert_eq!(track.evaluate_float(40.0), Some(50.0));
    }

    #[test]
    fn test_transform_linear_between_poses() {
        let mut transform = TransformTrack::new();
        transform.add_pose(0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        transform.add_pose(2, [2.0, 4.0, 6.0], [0.2, 0.0, 0.0]);

        assert_eq!(transform.keyframe_count(), 2);
        assert_eq!(transform.evaluate_location(1.0), Some([1.0, 2.0, 3.0]));
        let rot = transform.evaluate_rotation(1.0).unwrap();
        assert!((rot[0] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_remove_keyframe() {
        let mut track = Track::new(ChannelKind::ShiftX);
        let id = track.set_keyframe_at(3, KeyframeValue::Float(0.1), InterpolationMode::Constant).unwrap();
        track.remove_keyframe(id);
        assert!(track.is_empty());
        assert_eq!(track.evaluate(3.0), None);
    }

    #[test]
    fn test_lens_channels() {
        let mut lens = LensTrack::new();
        assert!(lens.is_static());
        assert!(lens.channel(ChannelKind::Location).is_none());

        lens.channel_mut(ChannelKind::ShiftY)
            .unwrap()
            .set_keyframe_at(5, KeyframeValue::Float(0.02), InterpolationMode::Constant)
            .unwrap();
        assert!(!lens.is_static());
        assert_eq!(lens.shift_y.keyframe_count(), 1);

        lens.clear();
        assert!(lens.is_static());
    }
}
