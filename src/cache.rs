//! Cache for preprocessed word records
//!
//! ## Invalidation
//!
//! Records are keyed by a [`Fingerprint`] of the full input: the sentence
//! length, hidden size, cluster count, a hash over every hidden-state value,
//! cluster index and word, plus a caller-controlled version counter. Changing
//! the cluster partition therefore recomputes even when the word count stays
//! the same.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

use crate::error::Result;
use crate::preprocess::{preprocess_input, WordRecord};
use crate::sentence::FlowInput;

/// Content fingerprint of one preprocessing input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub n_words: usize,
    pub n_states: usize,
    pub n_clusters: usize,
    pub content_hash: u64,
    pub version: u64,
}

impl Fingerprint {
    /// Fingerprint `input` at the given cache version
    pub fn of(input: &FlowInput, version: u64) -> Self {
        let mut hasher = DefaultHasher::new();

        for state in input.sentence.states() {
            state.len().hash(&mut hasher);
            for v in state {
                v.to_bits().hash(&mut hasher);
            }
        }
        input.co_cluster.clusters().hash(&mut hasher);
        input.words.hash(&mut hasher);

        Self {
            n_words: input.sentence.len(),
            n_states: input.sentence.n_states(),
            n_clusters: input.co_cluster.n_clusters(),
            content_hash: hasher.finish(),
            version,
        }
    }
}

/// Holds the records of the most recently preprocessed input
#[derive(Debug, Default)]
pub struct PreprocessCache {
    fingerprint: Option<Fingerprint>,
    records: Vec<WordRecord>,
    version: u64,
}

impl PreprocessCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cached records for `input`, recomputing when its fingerprint
    /// differs from the cached one.
    ///
    /// On error the cache is left empty.
    pub fn get_or_compute(&mut self, input: &FlowInput) -> Result<&[WordRecord]> {
        let fingerprint = Fingerprint::of(input, self.version);
        if self.fingerprint == Some(fingerprint) {
            debug!("Preprocess cache hit ({} words)", fingerprint.n_words);
            return Ok(&self.records);
        }

        debug!(
            "Preprocess cache miss: {} words, {} clusters, version {}",
            fingerprint.n_words, fingerprint.n_clusters, fingerprint.version
        );
        self.clear();
        self.records = preprocess_input(input)?;
        self.fingerprint = Some(fingerprint);
        Ok(&self.records)
    }

    /// Force the next lookup to recompute
    pub fn bump_version(&mut self) -> u64 {
        self.version += 1;
        self.version
    }

    /// Drop cached records
    pub fn clear(&mut self) {
        self.fingerprint = None;
        self.records.clear();
    }

    pub fn is_cached(&self) -> bool {
        self.fingerprint.is_some()
    }

    /// Cached records, if any
    pub fn records(&self) -> Option<&[WordRecord]> {
        self.fingerprint.map(|_| self.records.as_slice())
    }

    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.fingerprint
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
