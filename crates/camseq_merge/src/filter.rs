// SPDX-License-Identifier: MIT OR Apache-2.0
//! Change filtering for sparse lens channels.
//!
//! The first sample is always kept. A later sample is kept only when it
//! differs from the last *kept* sample, never from its raw predecessor, so
//! a value that drifts in sub-tolerance steps still gets keyed once the drift
//! adds up.

/// Absolute tolerance below which two samples count as equal
pub const CHANGE_TOLERANCE: f32 = 1e-4;

/// A tracked value that can be compared within a tolerance
pub trait Sample: Copy {
    /// Whether `self` differs from `other` by more than `tolerance`
    fn differs_from(&self, other: &Self, tolerance: f32) -> bool;
}

impl Sample for f32 {
    fn differs_from(&self, other: &Self, tolerance: f32) -> bool {
        // NaN equals NaN here and differs from every number
        if self.is_nan() || other.is_nan() {
            return self.is_nan() != other.is_nan();
        }
        (self - other).abs() > tolerance
    }
}

impl<const N: usize> Sample for [f32; N] {
    fn differs_from(&self, other: &Self, tolerance: f32) -> bool {
        self.iter()
            .zip(other)
            .any(|(a, b)| a.differs_from(b, tolerance))
    }
}

/// Keeps only the samples where a tracked value changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeFilter {
    /// Equality tolerance
    pub tolerance: f32,
}

impl Default for ChangeFilter {
    fn default() -> Self {
        Self {
            tolerance: CHANGE_TOLERANCE,
        }
    }
}

impl ChangeFilter {
    /// Filter with a custom tolerance
    pub fn with_tolerance(tolerance: f32) -> Self {
        Self { tolerance }
    }

    /// Positions of the retained samples
    pub fn retained<T: Sample>(&self, samples: &[T]) -> Vec<usize> {
        self.keys(samples).into_iter().map(|(pos, _)| pos).collect()
    }

    /// Retained samples with their positions
    pub fn keys<T: Sample>(&self, samples: &[T]) -> Vec<(usize, T)> {
        let mut kept: Vec<(usize, T)> = Vec::new();
        for (pos, sample) in samples.iter().enumerate() {
            let changed = kept
                .last()
                .map_or(true, |(_, last)| sample.differs_from(last, self.tolerance));
            if changed {
                kept.push((pos, *sample));
            }
        }
        kept
    }
}
