// SPDX-License-Identifier: MIT OR Apache-2.0
//! Job files.
//!
//! A job names a scene file and the operations to apply to it:
//!
//! ```ron
//! Job(
//!     scene: "shot.scene.ron",
//!     output: Some("shot.merged.ron"),
//!     merge: Some((naming_mode: Inherited)),
//!     background: Some((
//!         media: (
//!             name: "plate.mov",
//!             resolution: (3840, 2160),
//!             start_frame: 1,
//!             duration: 120,
//!             lens: Constant((focal_length: 35.0, shift_x: 0.0, shift_y: 0.0)),
//!         ),
//!     )),
//! )
//! ```
//!
//! Relative paths resolve against the job file's directory.

use crate::error::{AppError, Result};
use camseq_merge::{
    BindConfig, BindReport, MediaReference, MergeConfig, MergeReport, Scene, Session,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Background step of a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundJob {
    /// Media to bind
    pub media: MediaReference,
    /// Target camera options
    #[serde(default)]
    pub bind: BindConfig,
}

/// A merge job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Scene file to load
    pub scene: PathBuf,
    /// Where to write the result; the scene file itself when unset
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Merge step
    #[serde(default)]
    pub merge: Option<MergeConfig>,
    /// Background step, run after the merge
    #[serde(default)]
    pub background: Option<BackgroundJob>,
}

/// What a job did
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobReport {
    /// Merge outcome
    pub merge: Option<MergeReport>,
    /// Background outcome
    pub background: Option<BindReport>,
}

impl Job {
    /// Load a job file, resolving its paths against the file's directory
    pub fn load(path: &Path) -> Result<Self> {
        let mut job: Job = read_ron(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        job.scene = base.join(&job.scene);
        job.output = job.output.map(|output| base.join(output));
        Ok(job)
    }

    /// Output scene path
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.scene)
    }

    /// Apply the job's steps to a session
    pub fn execute(&self, session: &mut Session) -> Result<JobReport> {
        let mut report = JobReport::default();
        if let Some(config) = &self.merge {
            report.merge = Some(session.merge_cameras(config)?);
        }
        if let Some(background) = &self.background {
            report.background = Some(session.set_background(&background.media, &background.bind)?);
        }
        Ok(report)
    }

    /// Load the scene, apply the steps and save the result
    pub fn run(&self) -> Result<JobReport> {
        let scene: Scene = read_ron(&self.scene)?;
        let mut session = Session::new(scene);
        let report = self.execute(&mut session)?;
        save_scene(session.scene(), self.output_path())?;
        Ok(report)
    }
}

fn read_ron<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn save_scene(scene: &Scene, path: &Path) -> Result<()> {
    let config = ron::ser::PrettyConfig::default().struct_names(true);
    let content = ron::ser::to_string_pretty(scene, config)?;
    std::fs::write(path, content).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}
