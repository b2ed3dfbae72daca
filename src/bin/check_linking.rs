//! Visualizes a pre-linked annotation file.
//!
//! Verification pass for the linking tool: renders boxes, ids, and links
//! from an already-linked annotation file without recomputing anything.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin check_linking -- -a labels_linked.txt -o viz/
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use vaxprep::core::PrepResult;
use vaxprep::utils::visualization::{VisualizationConfig, render_all};

/// Command-line arguments for the verification tool
#[derive(Parser)]
#[command(name = "check_linking")]
#[command(about = "Visualize annotations and save the output images")]
struct Args {
    /// Path to the annotation file
    #[arg(short, long)]
    annotations_file: PathBuf,

    /// Output folder to save the visualized images
    #[arg(short, long)]
    output_folder: PathBuf,

    /// Path to a font file for id and link labels
    #[arg(long)]
    font_path: Option<PathBuf>,
}

fn main() -> PrepResult<()> {
    vaxprep::utils::init_tracing();
    let args = Args::parse();

    let config = VisualizationConfig::resolve(args.font_path.as_deref());
    render_all(&args.annotations_file, &args.output_folder, &config)?;

    info!("process completed");
    Ok(())
}
