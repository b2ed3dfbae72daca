//! Annotation linking and visualization tool.
//!
//! Reads a tab-separated annotation file, links every `vaccine_name` record
//! to its nearest `vaccine_date` record, writes the linked annotations to a
//! new file, and renders the linked result as overlay images.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin link_annotations -- --label-txt labels.txt --output-folder viz/
//! ```

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use vaxprep::core::PrepResult;
use vaxprep::dataset::{read_annotations, save_annotations};
use vaxprep::processors::link_annotations;
use vaxprep::utils::visualization::{VisualizationConfig, render_all};

/// Command-line arguments for the linking tool
#[derive(Parser)]
#[command(name = "link_annotations")]
#[command(about = "Annotation linking and visualization tool")]
struct Args {
    /// Path to the annotation file
    #[arg(long)]
    label_txt: PathBuf,

    /// Directory to save visualized images
    #[arg(long)]
    output_folder: PathBuf,

    /// Path for the linked annotation file (defaults to the input path with
    /// a "_linked.txt" suffix)
    #[arg(long)]
    linked_txt: Option<PathBuf>,

    /// Path to a font file for id and link labels
    #[arg(long)]
    font_path: Option<PathBuf>,
}

fn main() -> PrepResult<()> {
    vaxprep::utils::init_tracing();
    let args = Args::parse();

    let mut set = read_annotations(&args.label_txt)?;
    link_annotations(&mut set);

    let linked_path = args
        .linked_txt
        .unwrap_or_else(|| linked_path_for(&args.label_txt));
    save_annotations(&set, &linked_path)?;

    let config = VisualizationConfig::resolve(args.font_path.as_deref());
    render_all(&linked_path, &args.output_folder, &config)?;

    info!("process completed");
    Ok(())
}

/// Default output path: `labels.txt` becomes `labels_linked.txt`.
fn linked_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("labels");
    input.with_file_name(format!("{stem}_linked.txt"))
}
