// SPDX-License-Identifier: MIT OR Apache-2.0
//! Removal of merged source cameras.

use crate::scene::{Scene, SceneObject};
use crate::sequence::Sequence;
use tracing::debug;

/// Remove every source camera of `sequence` from the scene.
///
/// Entries that are gone or no longer source cameras are skipped. Returns
/// the names of the removed cameras in sequence order.
pub fn remove_sources(scene: &mut Scene, sequence: &Sequence) -> Vec<String> {
    let mut removed = Vec::with_capacity(sequence.len());
    for id in sequence.cameras() {
        if scene.source(&id).is_none() {
            debug!("Skipping {id:?}: not a source camera");
            continue;
        }
        if let Some(SceneObject::Source(camera)) = scene.remove(&id) {
            removed.push(camera.name);
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{SourceCamera, Transform};
    use crate::scene::ObjectId;
    use crate::sequence::SequenceEntry;

    #[test]
    fn test_removes_only_sequence_sources() {
        let mut scene = Scene::new();
        let a = scene.add_source(SourceCamera::new("cam.001", Transform::default()));
        let b = scene.add_source(SourceCamera::new("cam.002", Transform::default()));
        let keep = scene.add_source(SourceCamera::new("cam.003", Transform::default()));
        let light = scene.add(SceneObject::Other { name: "Light".to_string() });

        let seq = Sequence::new(
            None,
            vec![
                SequenceEntry { camera: a, ordinal: 1 },
                SequenceEntry { camera: b, ordinal: 2 },
                SequenceEntry { camera: light, ordinal: 3 },
                SequenceEntry { camera: ObjectId::new(), ordinal: 4 },
            ],
        )
        .unwrap();

        let removed = remove_sources(&mut scene, &seq);
        assert_eq!(removed, vec!["cam.001", "cam.002"]);
        assert!(scene.get(&keep).is_some());
        assert!(scene.get(&light).is_some());
        assert_eq!(scene.object_count(), 2);
    }
}
