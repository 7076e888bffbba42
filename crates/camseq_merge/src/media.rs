// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reference media metadata (movie clips, image sequences).

use serde::{Deserialize, Serialize};

/// Lens values reported for one media frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensSample {
    /// Focal length (mm, 36 mm sensor equivalent)
    pub focal_length: f32,
    /// Horizontal shift
    #[serde(default)]
    pub shift_x: f32,
    /// Vertical shift
    #[serde(default)]
    pub shift_y: f32,
}

impl LensSample {
    /// A sample with focal length only
    pub fn focal(focal_length: f32) -> Self {
        Self {
            focal_length,
            shift_x: 0.0,
            shift_y: 0.0,
        }
    }
}

/// Lens metadata of a media reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LensMetadata {
    /// One lens for the whole clip
    Constant(LensSample),
    /// One lens per media frame (variable zoom), indexed from the media's first frame
    PerFrame(Vec<LensSample>),
}

/// Media with a pixel size and timing
pub trait HasResolution {
    /// Display name
    fn name(&self) -> &str;

    /// Pixel size as (width, height)
    fn resolution(&self) -> (u32, u32);

    /// Timeline frame of the media's first frame
    fn start_frame(&self) -> i32;

    /// Number of frames
    fn duration(&self) -> u32;
}

/// Media carrying lens metadata
pub trait HasLensMetadata {
    /// Lens values of the media
    fn lens_metadata(&self) -> &LensMetadata;
}

/// Plain media reference, as handed over by a clip lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaReference {
    /// Clip name
    pub name: String,
    /// Pixel size (width, height)
    pub resolution: (u32, u32),
    /// Timeline frame of the first media frame
    pub start_frame: i32,
    /// Number of frames
    pub duration: u32,
    /// Lens metadata
    pub lens: LensMetadata,
}

impl HasResolution for MediaReference {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn start_frame(&self) -> i32 {
        self.start_frame
    }

    fn duration(&self) -> u32 {
        self.duration
    }
}

impl HasLensMetadata for MediaReference {
    fn lens_metadata(&self) -> &LensMetadata {
        &self.lens
    }
}
