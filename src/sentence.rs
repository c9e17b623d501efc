//! Input model: hidden states of one sentence, the co-cluster partition
//! of hidden units, and the word labels.

use candle_core::{DType, Tensor};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::preprocess::validate_shapes;

/// Hidden-state vectors of a sentence, one row per word (timestep)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentenceRecord {
    states: Vec<Vec<f32>>,
}

impl SentenceRecord {
    /// Create a record from per-timestep hidden-state rows
    pub fn new(states: Vec<Vec<f32>>) -> Self {
        Self { states }
    }

    /// Import a `(seq_len, hidden)` activation tensor.
    ///
    /// Any float dtype is accepted; values are converted to f32 first.
    pub fn from_tensor(tensor: &Tensor) -> Result<Self> {
        let (seq_len, hidden) = tensor.dims2()?;
        let states: Vec<Vec<f32>> = tensor.to_dtype(DType::F32)?.to_vec2()?;
        tracing::debug!("Imported sentence tensor: {seq_len} steps x {hidden} units");
        Ok(Self { states })
    }

    /// Number of timesteps (words)
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Width of the hidden-state vectors (taken from the first timestep)
    pub fn n_states(&self) -> usize {
        self.states.first().map_or(0, Vec::len)
    }

    pub fn states(&self) -> &[Vec<f32>] {
        &self.states
    }
}

/// Co-clustering result: column clusters of hidden-unit indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoCluster {
    /// Optional display label per cluster
    #[serde(default)]
    pub labels: Vec<String>,
    /// Hidden-unit indices of each cluster
    pub col_clusters: Vec<Vec<usize>>,
}

impl CoCluster {
    /// Create an unlabeled partition
    pub fn new(col_clusters: Vec<Vec<usize>>) -> Self {
        Self {
            labels: Vec::new(),
            col_clusters,
        }
    }

    /// Attach labels
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn n_clusters(&self) -> usize {
        self.col_clusters.len()
    }

    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.col_clusters
    }

    /// Label of cluster `i`, or its index when none was supplied
    pub fn label(&self, i: usize) -> String {
        self.labels
            .get(i)
            .cloned()
            .unwrap_or_else(|| i.to_string())
    }
}

/// One (sentence, co-cluster, words) triple, as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowInput {
    pub sentence: SentenceRecord,
    pub co_cluster: CoCluster,
    pub words: Vec<String>,
}

impl FlowInput {
    pub fn new(sentence: SentenceRecord, co_cluster: CoCluster, words: Vec<String>) -> Self {
        Self {
            sentence,
            co_cluster,
            words,
        }
    }

    /// Load an input triple from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse an input triple from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run the shape checks `preprocess` would run, without computing anything
    pub fn validate(&self) -> Result<()> {
        validate_shapes(
            self.sentence.states(),
            self.co_cluster.clusters(),
            &self.words,
        )
        .map(|_| ())
    }
}
