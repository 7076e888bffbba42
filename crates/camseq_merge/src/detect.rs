// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence detection.
//!
//! With `selected_only`, the selected source cameras are the sequence.
//! Otherwise the selected (or active) camera is a seed and every source
//! camera sharing its name prefix joins the sequence.

use crate::camera::SourceCamera;
use crate::error::{MergeError, Result};
use crate::naming::{natural_cmp, NamePattern};
use crate::scene::{ObjectId, Scene};
use crate::sequence::{Sequence, SequenceEntry};
use tracing::{debug, warn};

/// Detect the one sequence an invocation operates on
pub fn detect_sequence(scene: &Scene, selected_only: bool) -> Result<Sequence> {
    if selected_only {
        detect_selected(scene)
    } else {
        detect_from_seed(scene)
    }
}

fn detect_selected(scene: &Scene) -> Result<Sequence> {
    let cameras: Vec<(ObjectId, &SourceCamera)> = scene
        .source_cameras()
        .filter(|(id, _)| scene.selection.contains(id))
        .collect();
    if cameras.is_empty() {
        return Err(MergeError::NoSequenceFound("no source cameras selected".to_string()));
    }

    let mut ordered: Vec<(ObjectId, &SourceCamera, u64)> = cameras
        .iter()
        .filter_map(|(id, cam)| Some((*id, *cam, cam.ordinal()?)))
        .collect();
    ordered.sort_by(|a, b| a.2.cmp(&b.2).then_with(|| natural_cmp(&a.1.name, &b.1.name)));

    let named_ordinals_usable = ordered.len() == cameras.len()
        && ordered.windows(2).all(|pair| pair[0].2 != pair[1].2);

    let entries: Vec<SequenceEntry> = if named_ordinals_usable {
        ordered
            .iter()
            .map(|(id, _, ordinal)| SequenceEntry { camera: *id, ordinal: *ordinal })
            .collect()
    } else {
        warn!("Selected camera names do not give a unique order, using scene order");
        cameras
            .iter()
            .zip(0u64..)
            .map(|((id, _), ordinal)| SequenceEntry { camera: *id, ordinal })
            .collect()
    };

    let first = entries
        .first()
        .and_then(|e| scene.source(&e.camera))
        .map_or("", |cam| cam.name.as_str());
    let name = NamePattern::parse(first).and_then(|p| p.base_name());

    debug!("Detected {} selected cameras", cameras.len());
    Sequence::new(name, entries)
}

fn detect_from_seed(scene: &Scene) -> Result<Sequence> {
    let mut seeds: Vec<ObjectId> = scene
        .selection
        .iter()
        .copied()
        .filter(|id| scene.source(id).is_some())
        .collect();
    if let Some(active) = scene.active.filter(|id| scene.source(id).is_some()) {
        if !seeds.contains(&active) {
            seeds.push(active);
        }
    }
    if seeds.is_empty() {
        return Err(MergeError::NoSequenceFound("no seed camera selected".to_string()));
    }

    let mut patterns: Vec<NamePattern> = Vec::new();
    for id in &seeds {
        let Some(seed) = scene.source(id) else {
            continue;
        };
        let Some(pattern) = NamePattern::parse(&seed.name) else {
            return Err(MergeError::NoSequenceFound(format!(
                "camera name '{}' does not end in a frame number",
                seed.name
            )));
        };
        if !patterns.iter().any(|p| p.prefix == pattern.prefix) {
            patterns.push(pattern);
        }
    }
    if patterns.len() > 1 {
        return Err(MergeError::AmbiguousSeed {
            prefixes: patterns.into_iter().map(|p| p.prefix).collect(),
        });
    }
    let Some(pattern) = patterns.pop() else {
        return Err(MergeError::NoSequenceFound("no seed camera selected".to_string()));
    };

    let mut matched: Vec<(ObjectId, &SourceCamera, u64)> = scene
        .source_cameras()
        .filter_map(|(id, cam)| {
            let ordinal = pattern.ordinal_with_prefix(&cam.name)?;
            Some((id, cam, cam.index.unwrap_or(ordinal)))
        })
        .collect();
    if matched.is_empty() {
        return Err(MergeError::NoSequenceFound(format!(
            "no cameras named '{}<number>'",
            pattern.prefix
        )));
    }
    matched.sort_by(|a, b| a.2.cmp(&b.2).then_with(|| natural_cmp(&a.1.name, &b.1.name)));

    if let Some(pair) = matched.windows(2).find(|pair| pair[0].2 == pair[1].2) {
        return Err(MergeError::DuplicateOrdinal {
            ordinal: pair[0].2,
            first: pair[0].1.name.clone(),
            second: pair[1].1.name.clone(),
        });
    }

    debug!(
        "Detected {} cameras with prefix '{}'",
        matched.len(),
        pattern.prefix
    );
    let entries = matched
        .iter()
        .map(|(id, _, ordinal)| SequenceEntry { camera: *id, ordinal: *ordinal })
        .collect();
    Sequence::new(pattern.base_name(), entries)
}
