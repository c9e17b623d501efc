//! Information flow preprocessing
//!
//! Turns the per-timestep hidden states of a sentence into per-word,
//! per-cluster metrics that size the three rings of a word glyph:
//!
//! - `current`: L1 magnitude of the cluster's activations at this step
//! - `prev`: the same magnitude one step earlier (0 at the first word)
//! - `kept`: magnitude-weighted fraction of each unit's prior value that
//!   survived into this step, normalised by `prev`
//! - `updated`: signed net change of the cluster's values, normalised by `prev`
//!
//! The step before the first word is treated as an all-zero state.
//! Hidden states are f32; every sum and ratio is taken in f64 so that
//! clusters of large activations cannot overflow.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FlowError, Result};
use crate::sentence::FlowInput;

/// Derived metrics of one cluster at one word
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterMetric {
    /// Σ|v| over the cluster's units at this step
    pub current: f64,
    /// Σ|v| over the cluster's units at the previous step
    pub prev: f64,
    /// Σ(cur - prev) / prev, or 0 when prev is 0
    pub updated: f64,
    /// Σ|prev|·clamp(cur/prev, 0, 1) / prev, or 0 when prev is 0
    pub kept: f64,
}

impl ClusterMetric {
    /// Pie-slice weight: the previous magnitude when there is one,
    /// otherwise the current magnitude
    pub fn pie_value(&self) -> f64 {
        if self.prev != 0.0 {
            self.prev
        } else {
            self.current
        }
    }
}

/// All cluster metrics of one word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    /// One entry per cluster, in partition order
    pub data: Vec<ClusterMetric>,
}

/// Raw (unnormalised) sums for one cluster at one step
#[derive(Debug, Clone, Copy, Default)]
struct ClusterFlow {
    current: f64,
    updated: f64,
    kept: f64,
}

/// Check that the inputs describe a consistent (sentence, clusters, words)
/// triple.
///
/// Returns the hidden-state width on success.
pub fn validate_shapes<W: AsRef<str>>(
    sentence: &[Vec<f32>],
    clusters: &[Vec<usize>],
    words: &[W],
) -> Result<usize> {
    let first = sentence
        .first()
        .ok_or_else(|| FlowError::EmptyInput("sentence has no timesteps".to_string()))?;
    let n_states = first.len();

    if let Some((t, state)) = sentence
        .iter()
        .enumerate()
        .find(|(_, s)| s.len() != n_states)
    {
        return Err(FlowError::ShapeMismatch(format!(
            "timestep {t} has {} hidden units, expected {n_states}",
            state.len()
        )));
    }

    if words.len() != sentence.len() {
        return Err(FlowError::ShapeMismatch(format!(
            "{} words for {} timesteps",
            words.len(),
            sentence.len()
        )));
    }

    for (i, cluster) in clusters.iter().enumerate() {
        if cluster.is_empty() {
            return Err(FlowError::EmptyInput(format!("cluster {i} has no units")));
        }
        if let Some(&idx) = cluster.iter().find(|&&idx| idx >= n_states) {
            return Err(FlowError::ShapeMismatch(format!(
                "cluster {i} references unit {idx}, but hidden size is {n_states}"
            )));
        }
    }

    Ok(n_states)
}

/// Compute one [`WordRecord`] per word.
///
/// Fails fast with [`FlowError::EmptyInput`] or [`FlowError::ShapeMismatch`]
/// before any metric is computed; there is no partial output.
pub fn preprocess<W: AsRef<str>>(
    sentence: &[Vec<f32>],
    clusters: &[Vec<usize>],
    words: &[W],
) -> Result<Vec<WordRecord>> {
    let n_states = validate_shapes(sentence, clusters, words)?;
    debug!(
        "Preprocessing {} words, {} clusters, {} hidden units",
        sentence.len(),
        clusters.len(),
        n_states
    );

    let mut records = Vec::with_capacity(sentence.len());
    // Σ|v| of each cluster at the previous step
    let mut previous = vec![0.0f64; clusters.len()];

    for (t, (state, word)) in sentence.iter().zip(words).enumerate() {
        let prior = t.checked_sub(1).map(|p| sentence[p].as_slice());

        let data = clusters
            .iter()
            .zip(previous.iter_mut())
            .map(|(cluster, info_prev)| {
                let flow = cluster_flow(state, prior, cluster);
                let prev = *info_prev;
                *info_prev = flow.current;
                normalize(flow, prev)
            })
            .collect();

        records.push(WordRecord {
            word: word.as_ref().to_string(),
            data,
        });
    }

    Ok(records)
}

/// [`preprocess`] over a loaded [`FlowInput`]
pub fn preprocess_input(input: &FlowInput) -> Result<Vec<WordRecord>> {
    preprocess(
        input.sentence.states(),
        input.co_cluster.clusters(),
        &input.words,
    )
}

/// Sum the raw flow quantities of one cluster.
///
/// `prior` is `None` at the first word, where every unit's prior value is 0.
fn cluster_flow(state: &[f32], prior: Option<&[f32]>, cluster: &[usize]) -> ClusterFlow {
    let mut flow = ClusterFlow::default();
    for &k in cluster {
        let cur = f64::from(state[k]);
        let prev = prior.map_or(0.0, |p| f64::from(p[k]));
        flow.current += cur.abs();
        flow.updated += cur - prev;
        flow.kept += kept_contribution(prev, cur);
    }
    flow
}

/// Portion of `|prev|` retained at `cur`: `|prev| * clamp(cur / prev, 0, 1)`.
///
/// A unit with no prior value retains nothing.
pub(crate) fn kept_contribution(prev: f64, cur: f64) -> f64 {
    if prev == 0.0 {
        return 0.0;
    }
    prev.abs() * (cur / prev).clamp(0.0, 1.0)
}

fn normalize(flow: ClusterFlow, prev: f64) -> ClusterMetric {
    let (updated, kept) = if prev == 0.0 {
        (0.0, 0.0)
    } else {
        (flow.updated / prev, flow.kept / prev)
    };
    ClusterMetric {
        current: flow.current,
        prev,
        updated,
        kept,
    }
}
