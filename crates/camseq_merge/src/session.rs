// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene session with undoable commands.

use crate::background::{bind_background, resolve_bind_target, BindReport};
use crate::config::{BindConfig, MergeConfig};
use crate::detect::detect_sequence;
use crate::error::Result;
use crate::history::{History, SceneSnapshot};
use crate::media::{HasLensMetadata, HasResolution};
use crate::merge::{merge_sequence, MergeReport};
use crate::scene::Scene;
use tracing::info;

/// A scene plus the history of the commands applied to it
#[derive(Debug, Default)]
pub struct Session {
    scene: Scene,
    history: History,
}

impl Session {
    /// Start a session on a scene
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            history: History::new(),
        }
    }

    /// Current scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Command history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// End the session, keeping the scene
    pub fn into_scene(self) -> Scene {
        self.scene
    }

    /// Detect a camera sequence and merge it into one animated camera.
    ///
    /// Nothing is recorded when detection or merging fails.
    pub fn merge_cameras(&mut self, config: &MergeConfig) -> Result<MergeReport> {
        let sequence = detect_sequence(&self.scene, config.selected_only)?;
        let before = SceneSnapshot::capture(&self.scene)?;

        let report = merge_sequence(&mut self.scene, &sequence, config)?;

        let after = SceneSnapshot::capture(&self.scene)?;
        self.history.record(
            format!("Merge {} cameras into '{}'", sequence.len(), report.name),
            before,
            after,
        );
        Ok(report)
    }

    /// Bind a media reference to the resolved target camera
    pub fn set_background<M>(&mut self, media: &M, config: &BindConfig) -> Result<BindReport>
    where
        M: HasResolution + HasLensMetadata + ?Sized,
    {
        let camera = resolve_bind_target(&self.scene, config)?;
        let before = SceneSnapshot::capture(&self.scene)?;

        let report = bind_background(&mut self.scene, camera, media)?;

        let after = SceneSnapshot::capture(&self.scene)?;
        self.history.record(
            format!("Set background '{}' on '{}'", report.media, report.name),
            before,
            after,
        );
        Ok(report)
    }

    /// Undo the last command
    pub fn undo(&mut self) -> Result<()> {
        let description = self.history.undo_description().map(str::to_owned);
        self.scene = self.history.undo()?;
        if let Some(description) = description {
            info!("Undo: {}", description);
        }
        Ok(())
    }

    /// Redo the last undone command
    pub fn redo(&mut self) -> Result<()> {
        let description = self.history.redo_description().map(str::to_owned);
        self.scene = self.history.redo()?;
        if let Some(description) = description {
            info!("Redo: {}", description);
        }
        Ok(())
    }
}
