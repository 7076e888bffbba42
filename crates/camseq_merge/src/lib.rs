// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence-to-animation camera merging.
//!
//! Photogrammetry tools reconstruct a camera move as one static camera per
//! frame. This crate collapses such a run of cameras into a single animated
//! camera and aligns it with a reference plate:
//! - [`detect`] finds the ordered run of cameras to merge
//! - [`timeline`] maps run positions onto timeline frames
//! - [`filter`] drops lens keys that repeat the last kept value
//! - [`merge`] builds the animated camera
//! - [`background`] binds a camera to a media reference
//! - [`cleanup`] removes the merged source cameras
//!
//! ## Architecture
//!
//! Every operation takes the [`Scene`] handle explicitly. Cameras and media
//! are reached through small capability traits ([`HasTransform`],
//! [`HasLensParams`], [`HasResolution`], [`HasLensMetadata`]) so tests and
//! other hosts can substitute their own data. [`Session`] wraps a scene with
//! undo/redo history.

pub mod background;
pub mod camera;
pub mod cleanup;
pub mod config;
pub mod detect;
pub mod error;
pub mod filter;
pub mod history;
pub mod media;
pub mod merge;
pub mod naming;
pub mod scene;
pub mod sequence;
pub mod session;
pub mod timeline;

pub use background::{bind_background, resolve_bind_target, BindReport};
pub use camera::{
    AnimatedCamera, BackgroundPlate, CameraData, HasLensParams, HasTransform, LensParams,
    SourceCamera, Transform,
};
pub use cleanup::remove_sources;
pub use config::{BindConfig, MergeConfig, NamingMode};
pub use detect::detect_sequence;
pub use error::{MergeError, Result};
pub use filter::{ChangeFilter, Sample, CHANGE_TOLERANCE};
pub use history::{History, HistoryError};
pub use media::{HasLensMetadata, HasResolution, LensMetadata, LensSample, MediaReference};
pub use merge::{build_animated_camera, merge_sequence, MergeReport};
pub use scene::{ObjectId, RenderSettings, Scene, SceneObject, Selection};
pub use sequence::{Sequence, SequenceEntry};
pub use session::Session;
pub use timeline::FrameMapping;
