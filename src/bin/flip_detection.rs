//! Horizontal-flip augmentation for a detection dataset.
//!
//! Mirrors every annotated image and remaps the polygon x-coordinates to
//! match, writing flipped image copies and a new annotation file.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin flip_detection -- labels.txt images/ flipped/ labels_flipped.txt
//! ```

use clap::Parser;
use std::path::PathBuf;

use vaxprep::core::PrepResult;
use vaxprep::processors::flip::flip_detection_dataset;

/// Command-line arguments for the detection flip tool
#[derive(Parser)]
#[command(name = "flip_detection")]
#[command(about = "Flip images and update detection annotations")]
struct Args {
    /// Path to the annotation file (txt format)
    annotation_file: PathBuf,

    /// Path to the folder containing the images
    image_folder: PathBuf,

    /// Path to the folder to save flipped images
    output_image_folder: PathBuf,

    /// Path to save the updated annotation file
    output_annotation_file: PathBuf,
}

fn main() -> PrepResult<()> {
    vaxprep::utils::init_tracing();
    let args = Args::parse();

    flip_detection_dataset(
        &args.annotation_file,
        &args.image_folder,
        &args.output_image_folder,
        &args.output_annotation_file,
    )
}
