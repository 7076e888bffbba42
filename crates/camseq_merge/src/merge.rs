// SPDX-License-Identifier: MIT OR Apache-2.0
//! Camera merging.
//!
//! Builds one animated camera from an ordered sequence of source cameras:
//! transform keys on every mapped frame, lens keys only where a lens value
//! changes. The camera is built completely before it enters the scene, and
//! source cameras are removed only after that.

use crate::camera::{AnimatedCamera, CameraData, HasLensParams, HasTransform, SourceCamera};
use crate::cleanup::remove_sources;
use crate::config::{MergeConfig, NamingMode};
use crate::error::{MergeError, Result};
use crate::filter::ChangeFilter;
use crate::naming::DEFAULT_CAMERA_NAME;
use crate::scene::{ObjectId, Scene, SceneObject};
use crate::sequence::Sequence;
use crate::timeline::FrameMapping;
use camseq_anim::{Action, InterpolationMode, KeyframeValue, Track};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of a merge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeReport {
    /// The created camera
    pub camera: ObjectId,
    /// Its name
    pub name: String,
    /// First mapped frame
    pub frame_start: i32,
    /// Last mapped frame
    pub frame_end: i32,
    /// Transform keys written
    pub transform_keys: usize,
    /// Focal length keys written
    pub focal_length_keys: usize,
    /// Horizontal shift keys written
    pub shift_x_keys: usize,
    /// Vertical shift keys written
    pub shift_y_keys: usize,
    /// Names of the removed source cameras
    pub deleted: Vec<String>,
}

impl MergeReport {
    fn new(camera: ObjectId, animated: &AnimatedCamera) -> Self {
        let action = &animated.action;
        Self {
            camera,
            name: animated.name.clone(),
            frame_start: action.frame_start,
            frame_end: action.frame_end,
            transform_keys: action.transform.keyframe_count(),
            focal_length_keys: action.lens.focal_length.keyframe_count(),
            shift_x_keys: action.lens.shift_x.keyframe_count(),
            shift_y_keys: action.lens.shift_y.keyframe_count(),
            deleted: Vec::new(),
        }
    }
}

/// Merge a detected sequence into a new animated camera in `scene`
pub fn merge_sequence(scene: &mut Scene, sequence: &Sequence, config: &MergeConfig) -> Result<MergeReport> {
    if sequence.is_empty() {
        return Err(MergeError::EmptySequence);
    }

    let start = config.start_frame.unwrap_or(scene.current_frame);
    let name = output_name(sequence, config);
    let camera = {
        let sources = sequence
            .cameras()
            .map(|id| resolve_source(scene, id))
            .collect::<Result<Vec<_>>>()?;
        build_animated_camera(name, &sources, start, scene.fps)?
    };

    let id = ObjectId::new();
    let mut report = MergeReport::new(id, &camera);
    scene.insert(id, SceneObject::Animated(camera));
    scene.selection.clear();
    scene.set_active(id);
    if config.update_scene_range {
        scene.frame_start = report.frame_start;
        scene.frame_end = report.frame_end;
    }

    if config.delete_originals {
        report.deleted = remove_sources(scene, sequence);
        info!("Original cameras deleted: {}", report.deleted.join(", "));
    }

    info!(
        "Cameras merged into '{}' (frames {}-{})",
        report.name, report.frame_start, report.frame_end
    );
    Ok(report)
}

fn resolve_source(scene: &Scene, id: ObjectId) -> Result<&SourceCamera> {
    match scene.get(&id) {
        Some(SceneObject::Source(camera)) => Ok(camera),
        Some(other) => Err(MergeError::NotACamera(other.name().to_string())),
        None => Err(MergeError::ObjectNotFound(id)),
    }
}

fn output_name(sequence: &Sequence, config: &MergeConfig) -> String {
    match config.naming_mode {
        NamingMode::Inherited => sequence.name.clone().unwrap_or_else(|| {
            warn!("Could not derive name from sequence, using default '{DEFAULT_CAMERA_NAME}'");
            DEFAULT_CAMERA_NAME.to_string()
        }),
        NamingMode::Custom if config.custom_name.trim().is_empty() => {
            warn!("Custom camera name was blank, using default '{DEFAULT_CAMERA_NAME}'");
            DEFAULT_CAMERA_NAME.to_string()
        }
        NamingMode::Custom => config.custom_name.clone(),
    }
}

/// Build an animated camera from ordered camera samples anchored at `start`.
///
/// Static lens values and sensor size come from the first sample.
pub fn build_animated_camera<C>(name: String, cameras: &[&C], start: i32, fps: f32) -> Result<AnimatedCamera>
where
    C: HasTransform + HasLensParams + ?Sized,
{
    let Some(first) = cameras.first() else {
        return Err(MergeError::EmptySequence);
    };
    let mapping = FrameMapping::new(start, cameras.len())?;
    let (sensor_width, sensor_height) = first.sensor();
    let data = CameraData {
        lens: first.lens(),
        sensor_width,
        sensor_height,
        ..CameraData::default()
    };

    let mut action = Action::new(name.clone(), mapping.start(), mapping.end()).with_frame_rate(fps);
    for (frame, camera) in mapping.frames().zip(cameras) {
        let transform = camera.transform();
        action.transform.add_pose(frame, transform.location, transform.rotation);
        debug!("Keyed camera {} at frame {frame}", frame - mapping.start());
    }

    let lenses: Vec<_> = cameras.iter().map(|camera| camera.lens()).collect();
    let filter = ChangeFilter::default();
    let focal: Vec<f32> = lenses.iter().map(|l| l.focal_length).collect();
    let shift_x: Vec<f32> = lenses.iter().map(|l| l.shift_x).collect();
    let shift_y: Vec<f32> = lenses.iter().map(|l| l.shift_y).collect();
    write_sparse_channel(&mut action.lens.focal_length, &mapping, &focal, &filter)?;
    write_sparse_channel(&mut action.lens.shift_x, &mapping, &shift_x, &filter)?;
    write_sparse_channel(&mut action.lens.shift_y, &mapping, &shift_y, &filter)?;

    Ok(AnimatedCamera { name, data, action })
}

/// Replace a scalar channel's keys with the change-filtered samples.
///
/// `samples[i]` belongs to the mapping's `i`-th frame. Keys hold their value
/// until the next key. Returns the number of keys written.
pub(crate) fn write_sparse_channel(
    track: &mut Track,
    mapping: &FrameMapping,
    samples: &[f32],
    filter: &ChangeFilter,
) -> Result<usize> {
    track.clear();
    let keys = filter.keys(samples);
    for (position, value) in &keys {
        let Some(frame) = mapping.frame_at(*position) else {
            continue;
        };
        track.set_keyframe_at(frame, KeyframeValue::Float(*value), InterpolationMode::Constant)?;
    }
    debug!(
        "Keyed {} of {} '{}' samples",
        keys.len(),
        samples.len(),
        track.kind.data_path()
    );
    Ok(keys.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{LensParams, Transform};
    use crate::detect::detect_sequence;
    use crate::sequence::SequenceEntry;

    /// Scene with `cam.001`..`cam.NNN`, the first one active
    fn scene_with_sequence(focals: &[f32]) -> Scene {
        let mut scene = Scene::new();
        for (i, focal) in focals.iter().enumerate() {
            let camera = SourceCamera::new(
                format!("cam.{:03}", i + 1),
                Transform {
                    location: [i as f32, 0.0, 1.5],
                    rotation: [1.5708, 0.0, 0.01 * i as f32],
                },
            )
            .with_lens(LensParams { focal_length: *focal, shift_x: 0.0, shift_y: 0.0 });
            let id = scene.add_source(camera);
            if i == 0 {
                scene.set_active(id);
            }
        }
        scene
    }

    #[test]
    fn test_constant_focal_length() {
        let mut scene = scene_with_sequence(&[35.0; 10]);
        scene.current_frame = 24;
        let seq = detect_sequence(&scene, false).unwrap();
        let config = MergeConfig::default().with_delete_originals(false);

        let report = merge_sequence(&mut scene, &seq, &config).unwrap();
        assert_eq!((report.frame_start, report.frame_end), (24, 33));
        assert_eq!(report.transform_keys, 10);

        let camera = scene.animated(&report.camera).unwrap();
        assert_eq!(camera.frame_range(), 24..=33);
        assert_eq!(camera.frame_count(), 10);
        assert_eq!(camera.action.lens.focal_length.keyed_frames(), vec![24]);
        assert_eq!(camera.lens_at(30).focal_length, 35.0);
        assert_eq!(camera.name, "MergedCamera");
    }

    #[test]
    fn test_focal_change_keys_two_frames() {
        let focals = [35.0, 35.0, 35.0, 35.0, 35.0, 50.0, 50.0, 50.0, 50.0, 50.0];
        let mut scene = scene_with_sequence(&focals);
        scene.current_frame = 24;
        let seq = detect_sequence(&scene, false).unwrap();

        let report = merge_sequence(&mut scene, &seq, &MergeConfig::default()).unwrap();
        let camera = scene.animated(&report.camera).unwrap();
        let track = &camera.action.lens.focal_length;
        assert_eq!(track.keyed_frames(), vec![24, 29]);
        assert_eq!(track.keyframe_at(24).and_then(|k| k.value.as_float()), Some(35.0));
        assert_eq!(track.keyframe_at(29).and_then(|k| k.value.as_float()), Some(50.0));
        assert_eq!(camera.lens_at(28).focal_length, 35.0);
        assert_eq!(report.shift_x_keys, 1);
        assert_eq!(report.shift_y_keys, 1);
    }

    #[test]
    fn test_transform_keyed_every_frame() {
        for n in 1..12 {
            let mut scene = scene_with_sequence(&vec![50.0; n]);
            let seq = detect_sequence(&scene, false).unwrap();
            let config = MergeConfig::default().with_start_frame(100);

            let report = merge_sequence(&mut scene, &seq, &config).unwrap();
            let camera = scene.animated(&report.camera).unwrap();
            let expected: Vec<i32> = (100..100 + n as i32).collect();
            assert_eq!(camera.action.transform.location.keyed_frames(), expected);
            assert_eq!(camera.action.transform.rotation.keyed_frames(), expected);
            assert_eq!(report.frame_end - report.frame_start + 1, n as i32);
        }
    }

    #[test]
    fn test_gaps_do_not_leave_holes() {
        let mut scene = Scene::new();
        for n in [1, 2, 7, 40] {
            let id = scene.add_source(SourceCamera::new(
                format!("shot_{n}"),
                Transform { location: [n as f32, 0.0, 0.0], rotation: [0.0; 3] },
            ));
            scene.set_active(id);
        }
        let seq = detect_sequence(&scene, false).unwrap();
        let report = merge_sequence(&mut scene, &seq, &MergeConfig::default().with_start_frame(1)).unwrap();

        let camera = scene.animated(&report.camera).unwrap();
        assert_eq!(camera.frame_range(), 1..=4);
        assert_eq!(camera.transform_at(3).location, [7.0, 0.0, 0.0]);
        assert_eq!(camera.transform_at(4).location, [40.0, 0.0, 0.0]);
    }

    #[test]
    fn test_delete_originals() {
        let mut scene = scene_with_sequence(&[35.0; 4]);
        scene.add(SceneObject::Other { name: "Light".to_string() });
        let seq = detect_sequence(&scene, false).unwrap();

        let report = merge_sequence(&mut scene, &seq, &MergeConfig::default()).unwrap();
        assert_eq!(report.deleted, vec!["cam.001", "cam.002", "cam.003", "cam.004"]);
        assert_eq!(scene.camera_count(), 1);
        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.active, Some(report.camera));
        assert_eq!((scene.frame_start, scene.frame_end), (1, 4));
    }

    #[test]
    fn test_empty_sequence_leaves_scene_untouched() {
        let mut scene = scene_with_sequence(&[35.0; 3]);
        let empty = Sequence::new(None, Vec::new()).unwrap();
        let before = scene.camera_count();

        let err = merge_sequence(&mut scene, &empty, &MergeConfig::default()).unwrap_err();
        assert!(matches!(err, MergeError::EmptySequence));
        assert_eq!(scene.camera_count(), before);
    }

    #[test]
    fn test_stale_entry_fails_before_mutation() {
        let mut scene = scene_with_sequence(&[35.0; 2]);
        let mut entries: Vec<SequenceEntry> = detect_sequence(&scene, false).unwrap().entries().to_vec();
        entries.push(SequenceEntry { camera: ObjectId::new(), ordinal: 99 });
        let seq = Sequence::new(None, entries).unwrap();

        let err = merge_sequence(&mut scene, &seq, &MergeConfig::default()).unwrap_err();
        assert!(matches!(err, MergeError::ObjectNotFound(_)));
        assert_eq!(scene.camera_count(), 2);
    }

    #[test]
    fn test_unknown_focal_length_does_not_hide_changes() {
        let scene = scene_with_sequence(&[f32::NAN, 35.0, 50.0]);
        let sources: Vec<&SourceCamera> = scene.source_cameras().map(|(_, cam)| cam).collect();

        let camera = build_animated_camera("rig".to_string(), &sources, 1, 24.0).unwrap();
        assert_eq!(camera.action.lens.focal_length.keyed_frames(), vec![1, 2, 3]);
        assert_eq!(camera.lens_at(3).focal_length, 50.0);
    }

    #[test]
    fn test_start_frame_without_room_fails_before_mutation() {
        let mut scene = scene_with_sequence(&[35.0; 10]);
        let seq = detect_sequence(&scene, false).unwrap();
        let config = MergeConfig::default().with_start_frame(i32::MAX - 2);

        let err = merge_sequence(&mut scene, &seq, &config).unwrap_err();
        assert!(matches!(err, MergeError::FrameRangeOverflow { len: 10, .. }));
        assert_eq!(scene.camera_count(), 10);
        assert!(scene.source_cameras().all(|(_, cam)| cam.name.starts_with("cam.")));

        let sources: Vec<&SourceCamera> = scene.source_cameras().map(|(_, cam)| cam).collect();
        let camera = build_animated_camera("rig".to_string(), &sources, i32::MAX - 9, 24.0).unwrap();
        assert_eq!(camera.action.transform.keyframe_count(), 10);
        assert_eq!(camera.frame_range(), i32::MAX - 9..=i32::MAX);
    }

    #[test]
    fn test_inherited_naming_is_stable() {
        let mut scene = scene_with_sequence(&[35.0; 3]);
        let config = MergeConfig::inherited().with_delete_originals(false);

        let seq = detect_sequence(&scene, false).unwrap();
        let first = merge_sequence(&mut scene, &seq, &config).unwrap();
        let seq = detect_sequence(&scene, false);
        // The merged camera is active now; reseed from a source camera
        assert!(seq.is_err());

        let seed = scene.source_cameras().map(|(id, _)| id).next().unwrap();
        scene.set_active(seed);
        let seq = detect_sequence(&scene, false).unwrap();
        let second = merge_sequence(&mut scene, &seq, &config).unwrap();

        assert_eq!(first.name, "cam");
        assert_eq!(second.name, "cam");
        assert_ne!(first.camera, second.camera);
        assert_eq!(scene.camera_count(), 5);
    }

    #[test]
    fn test_blank_custom_name_falls_back() {
        let mut scene = scene_with_sequence(&[35.0; 2]);
        let seq = detect_sequence(&scene, false).unwrap();
        let config = MergeConfig::default().with_custom_name("   ");

        let report = merge_sequence(&mut scene, &seq, &config).unwrap();
        assert_eq!(report.name, "MergedCamera");
    }

    #[test]
    fn test_build_from_plain_samples() {
        let a = SourceCamera::new("a", Transform::default())
            .with_lens(LensParams { focal_length: 24.0, shift_x: 0.0, shift_y: 0.1 });
        let b = SourceCamera::new("b", Transform::default())
            .with_lens(LensParams { focal_length: 24.0, shift_x: 0.05, shift_y: 0.1 });

        let camera = build_animated_camera("rig".to_string(), &[&a, &b], 0, 25.0).unwrap();
        assert_eq!(camera.action.lens.focal_length.keyed_frames(), vec![0]);
        assert_eq!(camera.action.lens.shift_x.keyed_frames(), vec![0, 1]);
        assert_eq!(camera.action.lens.shift_y.keyed_frames(), vec![0]);
        assert_eq!(camera.data.lens.shift_y, 0.1);
        assert_eq!(camera.action.frame_rate, 25.0);

        let none: [&SourceCamera; 0] = [];
        assert!(matches!(
            build_animated_camera("rig".to_string(), &none, 0, 25.0),
            Err(MergeError::EmptySequence)
        ));
    }
}
