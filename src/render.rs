//! Rendering seam for word glyphs
//!
//! A [`Renderer`] consumes preprocessed word records together with the
//! sentence layout. [`JsonRenderer`] writes the resolved glyph geometry
//! for a frontend to draw.

use serde::Serialize;
use std::io::Write;
use tracing::info;

use crate::error::Result;
use crate::layout::{pie_slices, PieSlice, RingRadii, SentenceLayout};
use crate::preprocess::WordRecord;

/// Something that can draw a sentence of word records
pub trait Renderer {
    fn render(&mut self, records: &[WordRecord], layout: &SentenceLayout) -> Result<()>;
}

/// One cluster's slice of a word glyph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterGlyph {
    pub cluster: usize,
    pub slice: PieSlice,
    pub rings: RingRadii,
}

/// Resolved geometry of one word glyph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphLayout {
    pub word: String,
    pub index: usize,
    /// Centre `[x, y]` within the drawing area
    pub position: [f32; 2],
    pub radius: f32,
    /// The first word has no previous state, so nothing was kept
    pub draw_kept_ring: bool,
    pub clusters: Vec<ClusterGlyph>,
}

/// Resolve the glyph geometry of every word
pub fn glyph_layouts(records: &[WordRecord], layout: &SentenceLayout) -> Vec<GlyphLayout> {
    let n_words = records.len();
    let radius = layout.radius(n_words);

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let clusters = pie_slices(&record.data)
                .into_iter()
                .zip(&record.data)
                .enumerate()
                .map(|(cluster, (slice, metric))| ClusterGlyph {
                    cluster,
                    slice,
                    rings: RingRadii::from_metric(metric, radius),
                })
                .collect();

            GlyphLayout {
                word: record.word.clone(),
                index,
                position: layout.word_position(index, n_words),
                radius,
                draw_kept_ring: index > 0,
                clusters,
            }
        })
        .collect()
}

/// Writes glyph layouts as pretty-printed JSON
pub struct JsonRenderer<W: Write> {
    writer: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, records: &[WordRecord], layout: &SentenceLayout) -> Result<()> {
        let glyphs = glyph_layouts(records, layout);
        serde_json::to_writer_pretty(&mut self.writer, &glyphs)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        info!("Rendered {} word glyphs", glyphs.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::preprocess;

    fn records() -> Vec<WordRecord> {
        preprocess(
            &[vec![1.0, 1.0], vec![-1.0, 1.0], vec![2.0, -2.0]],
            &[vec![0], vec![1]],
            &["a", "b", "c"],
        )
        .unwrap()
    }

    #[test]
    fn test_glyph_layouts() {
        let layout = SentenceLayout::default();
        let glyphs = glyph_layouts(&records(), &layout);

        assert_eq!(glyphs.len(), 3);
        assert!(!glyphs[0].draw_kept_ring);
        assert!(glyphs[1].draw_kept_ring);
        assert_eq!(glyphs[2].word, "c");
        assert_eq!(glyphs[1].clusters.len(), 2);
        assert_eq!(glyphs[1].position, layout.word_position(1, 3));

        // word "b", cluster 0: unit flipped sign, nothing kept
        let rings = glyphs[1].clusters[0].rings;
        assert_eq!(rings.kept.outer, 0.0);
        assert_eq!(rings.update_opacity, 0.3);
    }

    #[test]
    fn test_json_renderer() {
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer
            .render(&records(), &SentenceLayout::default())
            .unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[0]["word"], "a");
        assert_eq!(json[0]["draw_kept_ring"], false);
        assert_eq!(json[1]["clusters"][1]["cluster"], 1);
    }

    #[test]
    fn test_render_empty() {
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer.render(&[], &SentenceLayout::default()).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out.trim(), "[]");
    }
}
