// SPDX-License-Identifier: MIT OR Apache-2.0
//! Undo/redo history of scene operations.
//!
//! Each recorded operation stores a serialized copy of the scene before and
//! after it ran. Undo restores the `before` copy, redo the `after` copy.

use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Maximum undo history depth
pub const MAX_HISTORY: usize = 100;

/// History errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Nothing to undo
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Nothing to redo
    #[error("Nothing to redo")]
    NothingToRedo,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

/// Result type for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Unique operation ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(u64);

impl OperationId {
    /// Get the raw ID value
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Serialized scene state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    data: Vec<u8>,
}

impl SceneSnapshot {
    /// Capture the scene
    pub fn capture(scene: &Scene) -> Result<Self> {
        Ok(Self {
            data: bincode::serialize(scene)?,
        })
    }

    /// Rebuild the captured scene
    pub fn restore(&self) -> Result<Scene> {
        Ok(bincode::deserialize(&self.data)?)
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// An operation that can be undone/redone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation ID
    pub id: OperationId,
    /// Human-readable description
    pub description: String,
    /// State before operation (for undo)
    pub before: SceneSnapshot,
    /// State after operation (for redo)
    pub after: SceneSnapshot,
}

impl Operation {
    /// Get memory size of this operation
    pub fn memory_size(&self) -> usize {
        self.before.size() + self.after.size()
    }
}

/// History statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Total operations in undo stack
    pub undo_count: usize,
    /// Total operations in redo stack
    pub redo_count: usize,
    /// Total memory used by history (bytes)
    pub memory_used: usize,
    /// Maximum history depth
    pub max_depth: usize,
}

/// Undo/redo history manager
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<Operation>,
    redo_stack: VecDeque<Operation>,
    next_id: u64,
    max_depth: usize,
    memory_used: usize,
}

impl History {
    /// Create a new history manager
    pub fn new() -> Self {
        Self::with_max_depth(MAX_HISTORY)
    }

    /// Create with custom maximum depth
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            next_id: 1,
            max_depth,
            memory_used: 0,
        }
    }

    /// Record a completed operation
    pub fn record(
        &mut self,
        description: impl Into<String>,
        before: SceneSnapshot,
        after: SceneSnapshot,
    ) -> OperationId {
        let id = OperationId(self.next_id);
        self.next_id += 1;

        let operation = Operation {
            id,
            description: description.into(),
            before,
            after,
        };

        self.redo_stack.clear();
        self.memory_used += operation.memory_size();
        self.undo_stack.push_back(operation);

        while self.undo_stack.len() > self.max_depth {
            if let Some(old) = self.undo_stack.pop_front() {
                self.memory_used = self.memory_used.saturating_sub(old.memory_size());
            }
        }

        id
    }

    /// Undo the last operation, returning the restored scene
    pub fn undo(&mut self) -> Result<Scene> {
        let operation = self.undo_stack.back().ok_or(HistoryError::NothingToUndo)?;
        let scene = operation.before.restore()?;

        if let Some(operation) = self.undo_stack.pop_back() {
            self.memory_used = self.memory_used.saturating_sub(operation.memory_size());
            self.redo_stack.push_back(operation);
        }
        Ok(scene)
    }

    /// Redo the last undone operation, returning the restored scene
    pub fn redo(&mut self) -> Result<Scene> {
        let operation = self.redo_stack.back().ok_or(HistoryError::NothingToRedo)?;
        let scene = operation.after.restore()?;

        if let Some(operation) = self.redo_stack.pop_back() {
            self.memory_used += operation.memory_size();
            self.undo_stack.push_back(operation);
        }
        Ok(scene)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.memory_used = 0;
    }

    /// Get history statistics
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            undo_count: self.undo_stack.len(),
            redo_count: self.redo_stack.len(),
            memory_used: self.memory_used,
            max_depth: self.max_depth,
        }
    }

    /// Get description of next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|op| op.description.as_str())
    }

    /// Get description of next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(|op| op.description.as_str())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
