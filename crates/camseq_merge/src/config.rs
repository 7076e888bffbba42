// SPDX-License-Identifier: MIT OR Apache-2.0
//! Operation options.

use crate::naming::DEFAULT_CAMERA_NAME;
use serde::{Deserialize, Serialize};

/// Where the merged camera's name comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NamingMode {
    /// Use [`MergeConfig::custom_name`]
    #[default]
    Custom,
    /// Derive the name from the sequence's shared name prefix
    Inherited,
}

/// Options of a merge invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Restrict detection to the current selection
    pub selected_only: bool,
    /// Remove the source cameras after a successful merge
    pub delete_originals: bool,
    /// Output name source
    pub naming_mode: NamingMode,
    /// Output name in custom mode
    pub custom_name: String,
    /// Timeline anchor; the scene's current frame when unset
    pub start_frame: Option<i32>,
    /// Set the scene playback range to the merged range
    pub update_scene_range: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            selected_only: false,
            delete_originals: true,
            naming_mode: NamingMode::Custom,
            custom_name: DEFAULT_CAMERA_NAME.to_string(),
            start_frame: None,
            update_scene_range: true,
        }
    }
}

impl MergeConfig {
    /// Inherit the output name from the sequence
    pub fn inherited() -> Self {
        Self {
            naming_mode: NamingMode::Inherited,
            ..Self::default()
        }
    }

    /// Set a custom output name
    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        self.naming_mode = NamingMode::Custom;
        self.custom_name = name.into();
        self
    }

    /// Anchor the timeline at a fixed frame
    pub fn with_start_frame(mut self, frame: i32) -> Self {
        self.start_frame = Some(frame);
        self
    }

    /// Keep or delete the source cameras
    pub fn with_delete_originals(mut self, delete: bool) -> Self {
        self.delete_originals = delete;
        self
    }
}

/// Options of a background bind invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    /// Camera to bind when no camera is active
    pub preferred_camera: Option<String>,
}
