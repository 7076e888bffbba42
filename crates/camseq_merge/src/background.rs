// SPDX-License-Identifier: MIT OR Apache-2.0
//! Background plate binding.
//!
//! Aligns a camera with a reference clip: output resolution, plate start
//! frame and lens values all come from the media. Binding never re-runs a
//! merge; the camera's own keyed frame range stays where it is.

use crate::camera::{BackgroundPlate, LensParams, DEFAULT_SENSOR_WIDTH};
use crate::config::BindConfig;
use crate::error::{MergeError, Result};
use crate::filter::ChangeFilter;
use crate::media::{HasLensMetadata, HasResolution, LensMetadata, LensSample};
use crate::merge::write_sparse_channel;
use crate::naming::DEFAULT_CAMERA_NAME;
use crate::scene::{ObjectId, Scene, SceneObject};
use crate::timeline::FrameMapping;
use camseq_anim::LensTrack;
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of a bind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindReport {
    /// Bound camera
    pub camera: ObjectId,
    /// Its name
    pub name: String,
    /// Media shown as background
    pub media: String,
    /// Output resolution set on the scene
    pub resolution: (u32, u32),
    /// Plate start frame
    pub start_frame: i32,
    /// Focal length keys written; zero for a static lens
    pub focal_length_keys: usize,
    /// Horizontal shift keys written
    pub shift_x_keys: usize,
    /// Vertical shift keys written
    pub shift_y_keys: usize,
}

/// Lens values to apply, resolved before anything is mutated
enum LensPlan {
    Static(LensSample),
    Animated(LensTrack),
}

/// Pick the camera a bind should target.
///
/// The active camera wins; then the preferred name, then a camera named
/// `MergedCamera`, then the first camera in the scene.
pub fn resolve_bind_target(scene: &Scene, config: &BindConfig) -> Result<ObjectId> {
    if let Some(id) = scene.active_camera() {
        return Ok(id);
    }

    let preferred = config
        .preferred_camera
        .as_deref()
        .filter(|name| !name.trim().is_empty());
    let found = preferred
        .and_then(|name| scene.find_camera(name))
        .or_else(|| scene.find_camera(DEFAULT_CAMERA_NAME))
        .or_else(|| {
            scene
                .objects()
                .find(|(_, obj)| obj.is_camera())
                .map(|(id, _)| *id)
        });

    match found {
        Some(id) => {
            info!(
                "No active camera; using '{}' for background",
                scene.get(&id).map_or("", SceneObject::name)
            );
            Ok(id)
        }
        None => Err(MergeError::NoCameraFound),
    }
}

/// Bind `media` as the background plate of `camera`
pub fn bind_background<M>(scene: &mut Scene, camera: ObjectId, media: &M) -> Result<BindReport>
where
    M: HasResolution + HasLensMetadata + ?Sized,
{
    let (width, height) = media.resolution();
    if width == 0 || height == 0 {
        return Err(MergeError::incompatible(media.name(), "media reports zero resolution"));
    }
    if media.duration() == 0 {
        return Err(MergeError::incompatible(media.name(), "media reports zero duration"));
    }

    let target = scene.get(&camera).ok_or(MergeError::ObjectNotFound(camera))?;
    let frames = match target {
        SceneObject::Animated(animated) => {
            FrameMapping::new(animated.action.frame_start, animated.frame_count())?
        }
        SceneObject::Source(_) => FrameMapping::new(scene.current_frame, 1)?,
        SceneObject::Other { name } => return Err(MergeError::NotACamera(name.clone())),
    };
    let animated = matches!(target, SceneObject::Animated(_));
    let plan = plan_lens(media, frames, animated)?;

    let plate = BackgroundPlate {
        media: media.name().to_string(),
        start_frame: media.start_frame(),
        alpha: 1.0,
    };
    let mut report = BindReport {
        camera,
        name: String::new(),
        media: plate.media.clone(),
        resolution: (width, height),
        start_frame: plate.start_frame,
        focal_length_keys: 0,
        shift_x_keys: 0,
        shift_y_keys: 0,
    };

    let Some(object) = scene.get_mut(&camera) else {
        return Err(MergeError::ObjectNotFound(camera));
    };
    report.name = object.name().to_string();
    if let Some(data) = object.camera_data_mut() {
        data.sensor_width = DEFAULT_SENSOR_WIDTH;
        data.backgrounds = vec![plate];
        data.show_backgrounds = true;
    }

    match (plan, object) {
        (LensPlan::Static(sample), SceneObject::Animated(cam)) => {
            cam.action.lens.clear();
            apply_static(&mut cam.data.lens, sample);
        }
        (LensPlan::Static(sample), SceneObject::Source(cam)) => {
            apply_static(&mut cam.data.lens, sample);
        }
        (LensPlan::Animated(track), SceneObject::Animated(cam)) => {
            report.focal_length_keys = track.focal_length.keyframe_count();
            report.shift_x_keys = track.shift_x.keyframe_count();
            report.shift_y_keys = track.shift_y.keyframe_count();
            cam.action.lens = track;
        }
        (LensPlan::Animated(_), _) | (_, SceneObject::Other { .. }) => {}
    }

    scene.render.resolution_x = width;
    scene.render.resolution_y = height;
    scene.render.pixel_aspect_x = 1.0;
    scene.render.pixel_aspect_y = 1.0;

    info!(
        "Background '{}' set for '{}' ({}x{}, start frame {})",
        report.media, report.name, width, height, report.start_frame
    );
    Ok(report)
}

fn apply_static(lens: &mut LensParams, sample: LensSample) {
    lens.focal_length = sample.focal_length;
    lens.shift_x = sample.shift_x;
    lens.shift_y = sample.shift_y;
}

/// Resolve media lens values for the camera's mapped frames
fn plan_lens<M>(media: &M, frames: FrameMapping, animated: bool) -> Result<LensPlan>
where
    M: HasResolution + HasLensMetadata + ?Sized,
{
    let samples = match media.lens_metadata() {
        LensMetadata::Constant(sample) => return Ok(LensPlan::Static(*sample)),
        LensMetadata::PerFrame(samples) => samples,
    };

    let available = samples.len().min(media.duration() as usize);
    let media_start = i64::from(media.start_frame());
    let media_end = media_start + available as i64 - 1;
    let sampled = frames
        .frames()
        .map(|frame| {
            usize::try_from(i64::from(frame) - media_start)
                .ok()
                .filter(|idx| *idx < available)
                .map(|idx| samples[idx])
                .ok_or_else(|| {
                    MergeError::incompatible(
                        media.name(),
                        format!("camera frame {frame} is outside media frames {media_start}-{media_end}"),
                    )
                })
        })
        .collect::<Result<Vec<LensSample>>>()?;

    if !animated {
        return sampled
            .first()
            .map(|sample| LensPlan::Static(*sample))
            .ok_or_else(|| MergeError::incompatible(media.name(), "media has no lens samples"));
    }

    let filter = ChangeFilter::default();
    let mut track = LensTrack::new();
    let focal: Vec<f32> = sampled.iter().map(|s| s.focal_length).collect();
    let shift_x: Vec<f32> = sampled.iter().map(|s| s.shift_x).collect();
    let shift_y: Vec<f32> = sampled.iter().map(|s| s.shift_y).collect();
    write_sparse_channel(&mut track.focal_length, &frames, &focal, &filter)?;
    write_sparse_channel(&mut track.shift_x, &frames, &shift_x, &filter)?;
    write_sparse_channel(&mut track.shift_y, &frames, &shift_y, &filter)?;
    debug!("Sampled {} per-frame lens values from '{}'", sampled.len(), media.name());
    Ok(LensPlan::Animated(track))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{SourceCamera, Transform};
    use crate::config::MergeConfig;
    use crate::detect::detect_sequence;
    use crate::media::MediaReference;
    use crate::merge::merge_sequence;

    fn merged_scene() -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        for i in 1..=10 {
            let id = scene.add_source(
                SourceCamera::new(format!("cam.{i:03}"), Transform::default())
                    .with_lens(LensParams { focal_length: 35.0, shift_x: 0.0, shift_y: 0.0 }),
            );
            scene.set_active(id);
        }
        scene.current_frame = 24;
        let seq = detect_sequence(&scene, false).unwrap();
        let report = merge_sequence(&mut scene, &seq, &MergeConfig::default()).unwrap();
        (scene, report.camera)
    }

    fn clip(lens: LensMetadata) -> MediaReference {
        MediaReference {
            name: "plate.mov".to_string(),
            resolution: (1920, 1080),
            start_frame: 10,
            duration: 100,
            lens,
        }
    }

    #[test]
    fn test_constant_lens() {
        let (mut scene, camera) = merged_scene();
        scene.render.resolution_x = 640;
        let media = clip(LensMetadata::Constant(LensSample::focal(24.0)));

        let report = bind_background(&mut scene, camera, &media).unwrap();
        assert_eq!(report.resolution, (1920, 1080));
        assert_eq!((scene.render.resolution_x, scene.render.resolution_y), (1920, 1080));

        let cam = scene.animated(&camera).unwrap();
        assert_eq!(cam.background_start_frame(), Some(10));
        assert_eq!(cam.frame_range(), 24..=33);
        assert!(cam.action.lens.is_static());
        assert_eq!(cam.data.lens.focal_length, 24.0);
        assert_eq!(cam.lens_at(30).focal_length, 24.0);
        assert_eq!(cam.data.sensor_width, 36.0);
        assert!(cam.data.show_backgrounds);
        assert_eq!(cam.data.backgrounds.len(), 1);
    }

    #[test]
    fn test_rebinding_replaces_plate() {
        let (mut scene, camera) = merged_scene();
        let media = clip(LensMetadata::Constant(LensSample::focal(24.0)));
        bind_background(&mut scene, camera, &media).unwrap();
        let mut other = media.clone();
        other.name = "alt.mov".to_string();
        bind_background(&mut scene, camera, &other).unwrap();

        let cam = scene.animated(&camera).unwrap();
        assert_eq!(cam.data.backgrounds.len(), 1);
        assert_eq!(cam.data.backgrounds[0].media, "alt.mov");
    }

    #[test]
    fn test_per_frame_lens_is_change_filtered() {
        let (mut scene, camera) = merged_scene();
        // Media frame 10 is timeline frame 10; camera spans 24..=33
        let samples: Vec<LensSample> = (10..110)
            .map(|frame| LensSample::focal(if frame < 30 { 24.0 } else { 70.0 }))
            .collect();
        let media = clip(LensMetadata::PerFrame(samples));

        let report = bind_background(&mut scene, camera, &media).unwrap();
        assert_eq!(report.focal_length_keys, 2);
        assert_eq!(report.shift_x_keys, 1);

        let cam = scene.animated(&camera).unwrap();
        assert_eq!(cam.action.lens.focal_length.keyed_frames(), vec![24, 30]);
        assert_eq!(cam.lens_at(29).focal_length, 24.0);
        assert_eq!(cam.lens_at(31).focal_length, 70.0);
    }

    #[test]
    fn test_per_frame_out_of_range() {
        let (mut scene, camera) = merged_scene();
        let samples = vec![LensSample::focal(24.0); 20];
        let mut media = clip(LensMetadata::PerFrame(samples));
        media.duration = 20;
        let before = scene.render;

        let err = bind_background(&mut scene, camera, &media).unwrap_err();
        assert!(matches!(err, MergeError::IncompatibleMedia { .. }));
        assert_eq!(scene.render, before);
        assert!(scene.animated(&camera).unwrap().data.backgrounds.is_empty());
    }

    #[test]
    fn test_zero_resolution_or_duration() {
        let (mut scene, camera) = merged_scene();
        let mut media = clip(LensMetadata::Constant(LensSample::focal(24.0)));
        media.resolution = (0, 1080);
        assert!(matches!(
            bind_background(&mut scene, camera, &media),
            Err(MergeError::IncompatibleMedia { .. })
        ));

        media.resolution = (1920, 1080);
        media.duration = 0;
        assert!(matches!(
            bind_background(&mut scene, camera, &media),
            Err(MergeError::IncompatibleMedia { .. })
        ));
    }

    #[test]
    fn test_source_camera_takes_current_frame_sample() {
        let mut scene = Scene::new();
        let id = scene.add_source(SourceCamera::new("still", Transform::default()));
        scene.current_frame = 12;
        let samples = vec![LensSample::focal(18.0), LensSample::focal(19.0), LensSample::focal(20.0)];
        let mut media = clip(LensMetadata::PerFrame(samples));
        media.duration = 3;

        bind_background(&mut scene, id, &media).unwrap();
        assert_eq!(scene.source(&id).unwrap().data.lens.focal_length, 20.0);
    }

    #[test]
    fn test_non_camera_target() {
        let mut scene = Scene::new();
        let light = scene.add(SceneObject::Other { name: "Light".to_string() });
        let media = clip(LensMetadata::Constant(LensSample::focal(24.0)));
        assert!(matches!(
            bind_background(&mut scene, light, &media),
            Err(MergeError::NotACamera(_))
        ));
        assert!(matches!(
            bind_background(&mut scene, ObjectId::new(), &media),
            Err(MergeError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_target_fallbacks() {
        let mut scene = Scene::new();
        assert!(matches!(
            resolve_bind_target(&scene, &BindConfig::default()),
            Err(MergeError::NoCameraFound)
        ));

        let first = scene.add_source(SourceCamera::new("cam.001", Transform::default()));
        let merged = scene.add_source(SourceCamera::new("MergedCamera", Transform::default()));
        let hero = scene.add_source(SourceCamera::new("Hero", Transform::default()));

        let config = BindConfig { preferred_camera: Some("Hero".to_string()) };
        assert_eq!(resolve_bind_target(&scene, &config).unwrap(), hero);
        assert_eq!(resolve_bind_target(&scene, &BindConfig::default()).unwrap(), merged);

        scene.remove(&merged);
        assert_eq!(resolve_bind_target(&scene, &BindConfig::default()).unwrap(), first);

        scene.set_active(hero);
        assert_eq!(resolve_bind_target(&scene, &BindConfig::default()).unwrap(), hero);
    }
}
