// Pedantic clippy configuration for numeric code
#![allow(clippy::cast_precision_loss)] // usize→f32 for layout geometry
#![allow(clippy::cast_possible_truncation)] // f64 metrics→f32 ring radii
#![allow(clippy::float_cmp)] // exact zero checks guard divisions
#![allow(clippy::many_single_char_names)] // t, i, k standard in math
#![allow(clippy::similar_names)] // related variables like `prev`/`previous`
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

//! infoflow-rs: information flow through RNN hidden states
//!
//! Computes, for every word of a sentence and every co-cluster of hidden
//! units, how much of the cluster's activation was kept from the previous
//! word and how much was updated, and lays the result out as stacked
//! three-ring pie glyphs.
//!
//! ## Architecture
//!
//! - `sentence`: hidden-state rows, co-cluster partition, words; JSON and tensor input
//! - `preprocess`: per-word, per-cluster `current`/`prev`/`kept`/`updated` metrics
//! - `cache`: preprocessed records keyed by a content fingerprint
//! - `layout`: layout parameters, glyph radius, ring radii and pie slices
//! - `render`: `Renderer` trait and the JSON glyph renderer
//! - `error`: `FlowError` and the crate `Result` alias

pub mod cache;
pub mod error;
pub mod layout;
pub mod preprocess;
pub mod render;
pub mod sentence;

pub use cache::{Fingerprint, PreprocessCache};
pub use error::{FlowError, Result};
pub use layout::{pie_slices, Annulus, LayoutParams, PieSlice, RingRadii, SentenceLayout};
pub use preprocess::{preprocess, preprocess_input, validate_shapes, ClusterMetric, WordRecord};
pub use render::{glyph_layouts, ClusterGlyph, GlyphLayout, JsonRenderer, Renderer};
pub use sentence::{CoCluster, FlowInput, SentenceRecord};
