//! Converts PDF files to page images.
//!
//! Renders each page of every PDF in a directory to a JPEG named
//! `{stem}_page_{n}.jpeg`. Source file names are sanitized (spaces,
//! umlauts) before processing.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin pdf2img -- scans/ images/ --dpi 300
//! ```

use clap::Parser;
use std::path::PathBuf;

use vaxprep::core::PrepResult;
use vaxprep::pdf::{PdfRasterizer, RasterSettings};

/// Command-line arguments for the PDF conversion tool
#[derive(Parser)]
#[command(name = "pdf2img")]
#[command(about = "Convert PDF files to images")]
struct Args {
    /// Path to the directory containing PDF files
    input_dir: PathBuf,

    /// Path to the directory to save converted images
    output_dir: PathBuf,

    /// Rendering resolution in dots per inch
    #[arg(long, default_value_t = 300.0)]
    dpi: f32,
}

fn main() -> PrepResult<()> {
    vaxprep::utils::init_tracing();
    let args = Args::parse();

    let rasterizer = PdfRasterizer::new(RasterSettings { dpi: args.dpi })?;
    rasterizer.rasterize_dir(&args.input_dir, &args.output_dir)
}
