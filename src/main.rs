//! infoflow CLI: per-word information flow metrics for a sentence

use anyhow::{Context, Result};
use clap::Parser;
use infoflow_rs::{
    preprocess_input, FlowInput, JsonRenderer, LayoutParams, Renderer, SentenceLayout,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "infoflow")]
#[command(about = "Information flow metrics for RNN hidden states")]
#[command(version)]
struct Cli {
    /// Input JSON with `sentence`, `coCluster` and `words`
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit glyph geometry instead of raw word records
    #[arg(short, long)]
    layout: bool,

    /// Drawing area width
    #[arg(long, default_value_t = 50.0)]
    width: f32,

    /// Drawing area height
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Vertical gap between word glyphs
    #[arg(long, default_value_t = 5.0)]
    node_interval: f32,

    /// Glyph footprint relative to its base radius
    #[arg(long, default_value_t = 1.5)]
    radius_scale: f32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(&cli)
}

/// Load, preprocess and write the output selected by `cli`
fn run(cli: &Cli) -> Result<()> {
    let input = FlowInput::load(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;
    info!(
        "Input: {} words, {} hidden units, {} clusters",
        input.sentence.len(),
        input.sentence.n_states(),
        input.co_cluster.n_clusters()
    );

    let records = preprocess_input(&input).context("Preprocessing failed")?;

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    if cli.layout {
        let params = LayoutParams::default()
            .with_node_interval(cli.node_interval)
            .with_radius_scale(cli.radius_scale);
        let layout = SentenceLayout::new(params).with_size([cli.width, cli.height]);
        JsonRenderer::new(writer).render(&records, &layout)?;
    } else {
        let mut writer = writer;
        serde_json::to_writer_pretty(&mut writer, &records)?;
        writeln!(writer)?;
        writer.flush()?;
    }

    if let Some(path) = &cli.output {
        info!("Results saved to {}", path.display());
    }

    Ok(())
}
