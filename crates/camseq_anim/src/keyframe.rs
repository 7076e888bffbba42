// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions for camera channels.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyframeId(pub Uuid);

impl KeyframeId {
    /// Create a new random keyframe ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for KeyframeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpolation mode between keyframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InterpolationMode {
    /// Hold the value until the next key
    Constant,
    /// Linear interpolation
    #[default]
    Linear,
}

/// Value stored in a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KeyframeValue {
    /// Scalar value (focal length, sensor shift)
    Float(f32),
    /// 3D vector (location, euler rotation)
    Vec3([f32; 3]),
}

impl KeyframeValue {
    /// Interpolate between two keyframe values
    pub fn interpolate(&self, other: &KeyframeValue, t: f32, mode: InterpolationMode) -> Option<KeyframeValue> {
        match mode {
            InterpolationMode::Constant => Some(*self),
            InterpolationMode::Linear => match (self, other) {
                (KeyframeValue::Float(a), KeyframeValue::Float(b)) => {
                    Some(KeyframeValue::Float(Interpolation::lerp(*a, *b, t)))
                }
                (KeyframeValue::Vec3(a), KeyframeValue::Vec3(b)) => {
                    Some(KeyframeValue::Vec3(Interpolation::lerp_vec3(*a, *b, t)))
                }
                _ => None, // Mismatched types
            },
        }
    }

    /// Get as float if possible
    pub fn as_float(&self) -> Option<f32> {
        match self {
            KeyframeValue::Float(v) => Some(*v),
            KeyframeValue::Vec3(_) => None,
        }
    }

    /// Get as Vec3 if possible
    pub fn as_vec3(&self) -> Option<[f32; 3]> {
        match self {
            KeyframeValue::Vec3(v) => Some(*v),
            KeyframeValue::Float(_) => None,
        }
    }

    /// Name of the value type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            KeyframeValue::Float(_) => "float",
            KeyframeValue::Vec3(_) => "vec3",
        }
    }
}

/// A keyframe on a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyframe {
    /// Unique keyframe ID
    pub id: KeyframeId,
    /// Timeline frame
    pub frame: i32,
    /// Value at this keyframe
    pub value: KeyframeValue,
    /// Interpolation mode to next keyframe
    pub interpolation: InterpolationMode,
}

impl Keyframe {
    /// Create a new keyframe
    pub fn new(frame: i32, value: KeyframeValue) -> Self {
        Self {
            id: KeyframeId::new(),
            frame,
            value,
            interpolation: InterpolationMode::Linear,
        }
    }

    /// Set interpolation mode
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }
}

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Interpolate Vec3
    pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
        [
            Self::lerp(a[0], b[0], t),
            Self::lerp(a[1], b[1], t),
            Self::lerp(a[2], b[2], t),
        ]
    }
}
