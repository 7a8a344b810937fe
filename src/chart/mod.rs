//! Pie chart geometry
//!
//! Turns ordered (label, size) pairs into slices with angles and palette
//! colors. Drawing lives in the view layer; this module has no terminal
//! dependencies so it can be tested on its own.

use std::f64::consts::TAU;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::filter::residual_label;

/// Default number of slices: the 11 largest plus one for the tail
pub const DEFAULT_MAX_SLICES: usize = 12;

/// Number of distinct palette colors
pub const PALETTE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub size: u64,
    /// Share of the chart total in `0.0..=1.0`
    pub fraction: f64,
    /// Radians, counter-clockwise from 12 o'clock
    pub start_angle: f64,
    pub sweep: f64,
    pub color_index: usize,
}

impl PieSlice {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }

    pub fn contains_angle(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
    pub total: u64,
}

impl PieChart {
    /// Build a chart from pairs in display order.
    ///
    /// Zero-size pairs are rejected. When more than `max_slices` remain the
    /// first `max_slices - 1` are kept and the rest collapse into "Other".
    pub fn from_pairs(pairs: &[(&str, u64)], max_slices: usize) -> Self {
        let max_slices = max_slices.max(1);

        let mut kept: Vec<(String, u64)> = Vec::with_capacity(pairs.len().min(max_slices));
        for (label, size) in pairs {
            if *size == 0 {
                tracing::debug!(label, "dropping zero-size slice");
                continue;
            }
            kept.push((label.to_string(), *size));
        }

        if kept.len() > max_slices {
            let tail: u64 = kept.drain(max_slices - 1..).map(|(_, size)| size).sum();
            let label = residual_label(kept.iter().map(|(label, _)| label.as_str()));
            kept.push((label.to_string(), tail));
        }

        let total: u64 = kept.iter().map(|(_, size)| size).sum();
        if total == 0 {
            return Self::default();
        }

        let mut start_angle = 0.0;
        let slices = kept
            .into_iter()
            .map(|(label, size)| {
                let fraction = size as f64 / total as f64;
                let sweep = fraction * TAU;
                let slice = PieSlice {
                    color_index: color_index(&label),
                    label,
                    size,
                    fraction,
                    start_angle,
                    sweep,
                };
                start_angle += sweep;
                slice
            })
            .collect();

        Self { slices, total }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Slice covering `angle` (radians, any winding)
    pub fn slice_at(&self, angle: f64) -> Option<&PieSlice> {
        let angle = angle.rem_euclid(TAU);
        self.slices
            .iter()
            .find(|s| s.contains_angle(angle))
            .or_else(|| self.slices.last())
    }
}

/// Stable palette slot for a label
pub fn color_index(label: &str) -> usize {
    let mut hasher = FxHasher::default();
    label.hash(&mut hasher);
    (hasher.finish() % PALETTE_SIZE as u64) as usize
}
