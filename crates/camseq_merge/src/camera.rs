// SPDX-License-Identifier: MIT OR Apache-2.0
//! Camera objects: reconstructed per-frame sources and the merged result.

use crate::naming::NamePattern;
use camseq_anim::Action;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Full-frame sensor width convention (mm)
pub const DEFAULT_SENSOR_WIDTH: f32 = 36.0;

/// Full-frame sensor height convention (mm)
pub const DEFAULT_SENSOR_HEIGHT: f32 = 24.0;

/// Object placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Location (x, y, z)
    pub location: [f32; 3],
    /// Euler rotation, XYZ order, radians
    pub rotation: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
        }
    }
}

/// Animatable lens values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensParams {
    /// Focal length (mm)
    pub focal_length: f32,
    /// Horizontal shift, fraction of the larger sensor dimension
    pub shift_x: f32,
    /// Vertical shift, fraction of the larger sensor dimension
    pub shift_y: f32,
}

impl Default for LensParams {
    fn default() -> Self {
        Self {
            focal_length: 50.0,
            shift_x: 0.0,
            shift_y: 0.0,
        }
    }
}

/// Background plate shown behind the camera view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundPlate {
    /// Name of the media shown
    pub media: String,
    /// Timeline frame at which the media's first frame is shown
    pub start_frame: i32,
    /// Plate opacity
    pub alpha: f32,
}

/// Camera data block shared by every camera kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraData {
    /// Static lens values
    pub lens: LensParams,
    /// Sensor width (mm)
    pub sensor_width: f32,
    /// Sensor height (mm)
    pub sensor_height: f32,
    /// Background plates
    #[serde(default)]
    pub backgrounds: Vec<BackgroundPlate>,
    /// Whether background plates are displayed
    #[serde(default)]
    pub show_backgrounds: bool,
}

impl Default for CameraData {
    fn default() -> Self {
        Self {
            lens: LensParams::default(),
            sensor_width: DEFAULT_SENSOR_WIDTH,
            sensor_height: DEFAULT_SENSOR_HEIGHT,
            backgrounds: Vec::new(),
            show_backgrounds: false,
        }
    }
}

/// Objects with a placement in the scene
pub trait HasTransform {
    /// Rest placement of the object
    fn transform(&self) -> Transform;
}

/// Objects with camera lens parameters
pub trait HasLensParams {
    /// Static lens values
    fn lens(&self) -> LensParams;

    /// Sensor size as (width, height) in mm
    fn sensor(&self) -> (f32, f32);
}

/// One reconstructed camera sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCamera {
    /// Display name
    pub name: String,
    /// Explicit sequence index, overriding the name ordinal
    #[serde(default)]
    pub index: Option<u64>,
    /// Placement
    pub transform: Transform,
    /// Camera data
    pub data: CameraData,
}

impl SourceCamera {
    /// Create a source camera with default lens data
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            index: None,
            transform,
            data: CameraData::default(),
        }
    }

    /// Set the lens values
    pub fn with_lens(mut self, lens: LensParams) -> Self {
        self.data.lens = lens;
        self
    }

    /// Set an explicit sequence index
    pub fn with_index(mut self, index: u64) -> Self {
        self.index = Some(index);
        self
    }

    /// Sequence ordinal: the explicit index, else the number encoded in the name
    pub fn ordinal(&self) -> Option<u64> {
        self.index
            .or_else(|| NamePattern::parse(&self.name).map(|p| p.ordinal))
    }
}

impl HasTransform for SourceCamera {
    fn transform(&self) -> Transform {
        self.transform
    }
}

impl HasLensParams for SourceCamera {
    fn lens(&self) -> LensParams {
        self.data.lens
    }

    fn sensor(&self) -> (f32, f32) {
        (self.data.sensor_width, self.data.sensor_height)
    }
}

/// The merged, keyframed camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimatedCamera {
    /// Display name
    pub name: String,
    /// Camera data; lens values here apply to channels without keys
    pub data: CameraData,
    /// Transform and lens animation
    pub action: Action,
}

impl AnimatedCamera {
    /// Mapped timeline frames
    pub fn frame_range(&self) -> RangeInclusive<i32> {
        self.action.frames()
    }

    /// Number of mapped frames
    pub fn frame_count(&self) -> usize {
        self.action.frame_count()
    }

    /// Start frame of the bound background plate, if any
    pub fn background_start_frame(&self) -> Option<i32> {
        self.data.backgrounds.first().map(|plate| plate.start_frame)
    }

    /// Placement at a frame
    pub fn transform_at(&self, frame: i32) -> Transform {
        let sample = self.action.evaluate(frame as f32);
        Transform {
            location: sample.location.unwrap_or([0.0; 3]),
            rotation: sample.rotation.unwrap_or([0.0; 3]),
        }
    }

    /// Lens values at a frame, falling back to static values for unkeyed channels
    pub fn lens_at(&self, frame: i32) -> LensParams {
        let sample = self.action.evaluate(frame as f32);
        let rest = self.data.lens;
        LensParams {
            focal_length: sample.focal_length.unwrap_or(rest.focal_length),
            shift_x: sample.shift_x.unwrap_or(rest.shift_x),
            shift_y: sample.shift_y.unwrap_or(rest.shift_y),
        }
    }
}

impl HasTransform for AnimatedCamera {
    fn transform(&self) -> Transform {
        self.transform_at(self.action.frame_start)
    }
}

impl HasLensParams for AnimatedCamera {
    fn lens(&self) -> LensParams {
        self.data.lens
    }

    fn sensor(&self) -> (f32, f32) {
        (self.data.sensor_width, self.data.sensor_height)
    }
}
