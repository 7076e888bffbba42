// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene handle.
//!
//! The scene owns every object, the selection and the timeline settings.
//! Operations receive it explicitly; nothing reads a global scene.

use crate::camera::{AnimatedCamera, CameraData, SourceCamera};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for scene objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    /// Create a new random object ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Object selection state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Currently selected objects, in selection order
    pub objects: Vec<ObjectId>,
}

impl Selection {
    /// Check if an object is selected
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains(id)
    }

    /// Add an object to the selection (idempotent)
    pub fn add(&mut self, id: ObjectId) {
        if !self.contains(&id) {
            self.objects.push(id);
        }
    }

    /// Remove an object from the selection
    pub fn remove(&mut self, id: &ObjectId) {
        self.objects.retain(|o| o != id);
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Check if the selection is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over selected objects
    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects.iter()
    }
}

/// Output image settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Output width in pixels
    pub resolution_x: u32,
    /// Output height in pixels
    pub resolution_y: u32,
    /// Horizontal pixel aspect
    pub pixel_aspect_x: f32,
    /// Vertical pixel aspect
    pub pixel_aspect_y: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution_x: 1920,
            resolution_y: 1080,
            pixel_aspect_x: 1.0,
            pixel_aspect_y: 1.0,
        }
    }
}

/// An object in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneObject {
    /// Imported per-frame camera
    Source(SourceCamera),
    /// Merged animated camera
    Animated(AnimatedCamera),
    /// Any non-camera object
    Other {
        /// Object name
        name: String,
    },
}

impl SceneObject {
    /// Object name
    pub fn name(&self) -> &str {
        match self {
            Self::Source(cam) => &cam.name,
            Self::Animated(cam) => &cam.name,
            Self::Other { name } => name,
        }
    }

    /// Whether the object is a camera of any kind
    pub fn is_camera(&self) -> bool {
        !matches!(self, Self::Other { .. })
    }

    /// Get as source camera
    pub fn as_source(&self) -> Option<&SourceCamera> {
        match self {
            Self::Source(cam) => Some(cam),
            _ => None,
        }
    }

    /// Get as animated camera
    pub fn as_animated(&self) -> Option<&AnimatedCamera> {
        match self {
            Self::Animated(cam) => Some(cam),
            _ => None,
        }
    }

    /// Camera data block of any camera
    pub fn camera_data_mut(&mut self) -> Option<&mut CameraData> {
        match self {
            Self::Source(cam) => Some(&mut cam.data),
            Self::Animated(cam) => Some(&mut cam.data),
            Self::Other { .. } => None,
        }
    }
}

/// Scene data: objects, selection and timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// All objects, in creation order
    objects: IndexMap<ObjectId, SceneObject>,
    /// Current selection
    #[serde(default)]
    pub selection: Selection,
    /// Active object
    #[serde(default)]
    pub active: Option<ObjectId>,
    /// Current timeline frame
    pub current_frame: i32,
    /// First frame of the playback range
    pub frame_start: i32,
    /// Last frame of the playback range
    pub frame_end: i32,
    /// Frames per second
    pub fps: f32,
    /// Output image settings
    #[serde(default)]
    pub render: RenderSettings,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            objects: IndexMap::new(),
            selection: Selection::default(),
            active: None,
            current_frame: 1,
            frame_start: 1,
            frame_end: 250,
            fps: 24.0,
            render: RenderSettings::default(),
        }
    }
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId::new();
        self.insert(id, object);
        id
    }

    /// Insert an object under a caller-chosen ID
    pub fn insert(&mut self, id: ObjectId, object: SceneObject) {
        self.objects.insert(id, object);
    }

    /// Add a source camera
    pub fn add_source(&mut self, camera: SourceCamera) -> ObjectId {
        self.add(SceneObject::Source(camera))
    }

    /// Get an object by ID
    pub fn get(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Get a mutable reference to an object by ID
    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    /// Remove an object, dropping it from the selection too
    pub fn remove(&mut self, id: &ObjectId) -> Option<SceneObject> {
        let removed = self.objects.shift_remove(id)?;
        self.selection.remove(id);
        if self.active == Some(*id) {
            self.active = None;
        }
        Some(removed)
    }

    /// Iterate over objects in scene order
    pub fn objects(&self) -> impl Iterator<Item = (&ObjectId, &SceneObject)> {
        self.objects.iter()
    }

    /// Iterate over source cameras in scene order
    pub fn source_cameras(&self) -> impl Iterator<Item = (ObjectId, &SourceCamera)> {
        self.objects
            .iter()
            .filter_map(|(id, obj)| obj.as_source().map(|cam| (*id, cam)))
    }

    /// Get a source camera by ID
    pub fn source(&self, id: &ObjectId) -> Option<&SourceCamera> {
        self.get(id)?.as_source()
    }

    /// Get an animated camera by ID
    pub fn animated(&self, id: &ObjectId) -> Option<&AnimatedCamera> {
        self.get(id)?.as_animated()
    }

    /// Number of objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of cameras of any kind
    pub fn camera_count(&self) -> usize {
        self.objects.values().filter(|obj| obj.is_camera()).count()
    }

    /// First camera with the given name, in scene order
    pub fn find_camera(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, obj)| obj.is_camera() && obj.name() == name)
            .map(|(id, _)| *id)
    }

    /// Scene position of an object
    pub fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.objects.get_index_of(id)
    }

    /// Select an object
    pub fn select(&mut self, id: ObjectId) {
        self.selection.add(id);
    }

    /// Make an object active and selected
    pub fn set_active(&mut self, id: ObjectId) {
        self.selection.add(id);
        self.active = Some(id);
    }

    /// Active object if it is a camera
    pub fn active_camera(&self) -> Option<ObjectId> {
        self.active
            .filter(|id| self.get(id).is_some_and(SceneObject::is_camera))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Transform;

    #[test]
    fn test_remove_clears_selection_and_active() {
        let mut scene = Scene::new();
        let a = scene.add_source(SourceCamera::new("cam.001", Transform::default()));
        let b = scene.add_source(SourceCamera::new("cam.002", Transform::default()));
        scene.select(a);
        scene.set_active(b);

        scene.remove(&b);
        assert!(!scene.selection.contains(&b));
        assert_eq!(scene.active, None);
        assert_eq!(scene.camera_count(), 1);
        assert_eq!(scene.index_of(&a), Some(0));
    }

    #[test]
    fn test_active_camera_ignores_other_objects() {
        let mut scene = Scene::new();
        let empty = scene.add(SceneObject::Other { name: "Light".to_string() });
        scene.set_active(empty);
        assert_eq!(scene.active_camera(), None);
        assert_eq!(scene.camera_count(), 0);
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_find_camera_by_name() {
        let mut scene = Scene::new();
        scene.add(SceneObject::Other { name: "MergedCamera".to_string() });
        let cam = scene.add_source(SourceCamera::new("MergedCamera", Transform::default()));
        assert_eq!(scene.find_camera("MergedCamera"), Some(cam));
        assert_eq!(scene.find_camera("Missing"), None);
    }

    #[test]
    fn test_serialization() {
        let mut scene = Scene::new();
        let id = scene.add_source(SourceCamera::new("cam.001", Transform::default()));
        scene.set_active(id);

        let ron_str = ron::ser::to_string_pretty(&scene, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: Scene = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded.camera_count(), 1);
        assert_eq!(loaded.active, Some(id));
        assert_eq!(loaded.source(&id).map(|c| c.name.as_str()), Some("cam.001"));
    }
}
