// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe animation for merged cameras.
//!
//! This crate provides the animation data a merged camera carries:
//! - Frame-addressed keyframes with typed values
//! - Single-property channel tracks
//! - Dense transform tracks and sparse lens tracks
//! - Camera actions with a frame range
//!
//! ## Architecture
//!
//! Keyframes live on integer timeline frames. Values between keys are
//! produced by the keyframe's interpolation mode; outside the keyed range a
//! track holds its first or last value.

pub mod action;
pub mod keyframe;
pub mod track;

pub use action::{Action, ActionId, ActionSample};
pub use keyframe::{Interpolation, InterpolationMode, Keyframe, KeyframeId, KeyframeValue};
pub use track::{ChannelKind, LensTrack, Track, TrackError, TrackId, TransformTrack};
