//! Integration tests for infoflow-rs

use infoflow_rs::{
    glyph_layouts, preprocess_input, ClusterMetric, FlowError, FlowInput, JsonRenderer,
    PreprocessCache, Renderer, SentenceLayout,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_input(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{json}").unwrap();
    file
}

/// Reference sentence: 2 hidden units, 3 words, one cluster over both units
const FIXTURE: &str = r#"{
    "sentence": [[1, 1], [-1, 1], [2, -2]],
    "coCluster": { "labels": ["all"], "colClusters": [[0, 1]] },
    "words": ["a", "b", "c"]
}"#;

#[test]
fn test_load_and_preprocess_fixture() {
    let file = write_input(FIXTURE);
    let input = FlowInput::load(file.path()).unwrap();
    let records = preprocess_input(&input).unwrap();

    let expected = [
        ("a", 2.0, 0.0, 0.0, 0.0),
        ("b", 2.0, 2.0, -1.0, 0.5),
        ("c", 4.0, 2.0, 0.0, 0.0),
    ];
    assert_eq!(records.len(), expected.len());
    for (record, (word, current, prev, updated, kept)) in records.iter().zip(expected) {
        assert_eq!(record.word, word);
        assert_eq!(
            record.data,
            vec![ClusterMetric {
                current,
                prev,
                updated,
                kept
            }]
        );
    }
}

#[test]
fn test_load_missing_file() {
    let err = FlowInput::load("does/not/exist.json").unwrap_err();
    assert!(matches!(err, FlowError::Io(_)));
}

#[test]
fn test_load_malformed_json() {
    let file = write_input(r#"{ "sentence": [[1, 2]], "words": "#);
    let err = FlowInput::load(file.path()).unwrap_err();
    assert!(matches!(err, FlowError::Json(_)));
}

#[test]
fn test_shape_errors_surface_from_file() {
    let file = write_input(
        r#"{
        "sentence": [[1, 2], [3, 4]],
        "coCluster": { "colClusters": [[0, 7]] },
        "words": ["a", "b"]
    }"#,
    );
    let input = FlowInput::load(file.path()).unwrap();

    assert!(matches!(input.validate(), Err(FlowError::ShapeMismatch(_))));
    assert!(matches!(
        preprocess_input(&input),
        Err(FlowError::ShapeMismatch(_))
    ));
}

#[test]
fn test_cache_then_render() {
    let file = write_input(FIXTURE);
    let input = FlowInput::load(file.path()).unwrap();

    let mut cache = PreprocessCache::new();
    let records = cache.get_or_compute(&input).unwrap().to_vec();
    let layout = SentenceLayout::default();

    let mut renderer = JsonRenderer::new(Vec::new());
    renderer.render(&records, &layout).unwrap();
    let rendered: serde_json::Value =
        serde_json::from_slice(&renderer.into_inner()).unwrap();

    // both sides go through the same f32 text encoding
    let direct: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&glyph_layouts(&records, &layout)).unwrap())
            .unwrap();
    assert_eq!(rendered, direct);

    // word "b" kept half of its previous magnitude
    let kept_outer = rendered[1]["clusters"][0]["rings"]["kept"]["outer"]
        .as_f64()
        .unwrap();
    assert_eq!(kept_outer as f32, layout.radius(3) * 0.5);
}

#[test]
fn test_records_roundtrip_through_json() {
    let file = write_input(FIXTURE);
    let input = FlowInput::load(file.path()).unwrap();
    let records = preprocess_input(&input).unwrap();

    let json = serde_json::to_string(&records).unwrap();
    let back: Vec<infoflow_rs::WordRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, records);
}
