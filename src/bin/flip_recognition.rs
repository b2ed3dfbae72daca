//! Horizontal-flip augmentation for a recognition dataset.
//!
//! Recognition annotations are `image\ttext` lines; the text is reversed
//! character-wise and the referenced images are mirrored.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin flip_recognition -- labels.txt images/ labels_flipped.txt flipped/
//! ```

use clap::Parser;
use std::path::PathBuf;

use vaxprep::core::PrepResult;
use vaxprep::processors::flip::flip_recognition_dataset;

/// Command-line arguments for the recognition flip tool
#[derive(Parser)]
#[command(name = "flip_recognition")]
#[command(about = "Flip images and update recognition annotations")]
struct Args {
    /// Path to the annotation file (txt format)
    annotation_file: PathBuf,

    /// Path to the folder containing the images
    image_dir: PathBuf,

    /// Path to save the updated annotation file
    output_annotation_file: PathBuf,

    /// Path to the folder to save flipped images
    output_image_dir: PathBuf,
}

fn main() -> PrepResult<()> {
    vaxprep::utils::init_tracing();
    let args = Args::parse();

    flip_recognition_dataset(
        &args.annotation_file,
        &args.image_dir,
        &args.output_annotation_file,
        &args.output_image_dir,
    )
}
