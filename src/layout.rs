//! Glyph geometry for a sentence of word records
//!
//! Each word is drawn as a pie chart with three rings per cluster slice:
//!
//! ```text
//!   kept ring       1 .. r*kept
//!   remainder ring  r*kept .. r
//!   update ring     r*(1 + updated/2) .. r   (updated < 0)
//!                   r .. r*(1 + updated/2)   (updated >= 0)
//! ```
//!
//! Words are stacked vertically, centred horizontally in the drawing area.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::preprocess::ClusterMetric;

/// Inner radius of the kept ring
const KEPT_INNER_RADIUS: f32 = 1.0;

/// Fill opacity of the update ring for shrinking / growing clusters
const SHRINK_OPACITY: f32 = 0.3;
const GROW_OPACITY: f32 = 0.7;

/// Layout parameters shared by every glyph of a sentence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Vertical gap between consecutive word glyphs
    pub node_interval: f32,
    /// Glyph footprint relative to its base radius
    pub radius_scale: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            node_interval: 5.0,
            radius_scale: 1.5,
        }
    }
}

impl LayoutParams {
    pub fn with_node_interval(mut self, node_interval: f32) -> Self {
        self.node_interval = node_interval;
        self
    }

    pub fn with_radius_scale(mut self, radius_scale: f32) -> Self {
        self.radius_scale = radius_scale;
        self
    }
}

/// A ring between two radii
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annulus {
    pub inner: f32,
    pub outer: f32,
}

/// The three rings of one cluster slice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingRadii {
    pub kept: Annulus,
    pub remainder: Annulus,
    pub update: Annulus,
    pub update_opacity: f32,
}

impl RingRadii {
    /// Ring radii of a cluster metric on a glyph of base radius `radius`
    pub fn from_metric(metric: &ClusterMetric, radius: f32) -> Self {
        let kept_edge = radius * metric.kept as f32;
        let update_edge = radius * (1.0 + metric.updated as f32 / 2.0);
        let shrinking = metric.updated < 0.0;

        let update = if shrinking {
            Annulus {
                inner: update_edge,
                outer: radius,
            }
        } else {
            Annulus {
                inner: radius,
                outer: update_edge,
            }
        };

        Self {
            kept: Annulus {
                inner: KEPT_INNER_RADIUS,
                outer: kept_edge,
            },
            remainder: Annulus {
                inner: kept_edge,
                outer: radius,
            },
            update,
            update_opacity: if shrinking {
                SHRINK_OPACITY
            } else {
                GROW_OPACITY
            },
        }
    }
}

/// Angular extent of one cluster's slice, in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Lay out pie slices in cluster order over a full turn.
///
/// Slice weights come from [`ClusterMetric::pie_value`]. When every weight
/// is zero all slices collapse to zero width at angle 0.
pub fn pie_slices(metrics: &[ClusterMetric]) -> Vec<PieSlice> {
    let values: Vec<f64> = metrics.iter().map(ClusterMetric::pie_value).collect();
    let total: f64 = values.iter().sum();
    let k = if total == 0.0 { 0.0 } else { TAU / total };

    let mut angle = 0.0;
    values
        .into_iter()
        .map(|value| {
            let start_angle = angle;
            angle += value * k;
            PieSlice {
                value,
                start_angle,
                end_angle: angle,
            }
        })
        .collect()
}

/// Geometry of a vertically stacked sentence
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceLayout {
    params: LayoutParams,
    size: [f32; 2],
}

impl Default for SentenceLayout {
    fn default() -> Self {
        Self::new(LayoutParams::default())
    }
}

impl SentenceLayout {
    pub fn new(params: LayoutParams) -> Self {
        Self {
            params,
            size: [50.0, 600.0],
        }
    }

    /// Set the drawing area as `[width, height]`
    pub fn with_size(mut self, size: [f32; 2]) -> Self {
        self.size = size;
        self
    }

    pub fn size(&self) -> [f32; 2] {
        self.size
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Base radius of every glyph when `n_words` glyphs share the area.
    ///
    /// Limited by the width, and by the height once there are words to stack.
    pub fn radius(&self, n_words: usize) -> f32 {
        let [width, height] = self.size;
        let by_width = width / (self.params.radius_scale * 2.0);
        if n_words == 0 {
            return by_width;
        }
        let n = n_words as f32;
        let by_height = (height - (n - 1.0) * self.params.node_interval)
            / (n * self.params.radius_scale * 2.0);
        by_width.min(by_height)
    }

    /// Centre `[x, y]` of word `i` out of `n_words`
    pub fn word_position(&self, i: usize, n_words: usize) -> [f32; 2] {
        let i = i as f32;
        let radius = self.radius(n_words);
        [
            self.size[0] / 2.0,
            radius * (self.params.radius_scale * (1.0 + 2.0 * i)) + i * self.params.node_interval,
        ]
    }
}
