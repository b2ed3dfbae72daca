//! Utility functions for the dataset-preparation pipeline.

pub mod visualization;

pub use visualization::{VisualizationConfig, render_all, render_annotations};

use crate::core::PrepResult;
use image::RgbImage;
use std::path::Path;

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with environment filter and formatting
/// layer. Typically called at the start of a binary to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Loads an image from a file path and converts it to the RGB color model.
///
/// Missing files and undecodable contents both surface as
/// [`crate::core::PrepError::ImageLoad`].
pub fn load_image(path: &Path) -> PrepResult<RgbImage> {
    let img = image::open(path)?;
    Ok(img.to_rgb8())
}
