//! Error types for the dataset-preparation pipeline.
//!
//! Only a handful of conditions are fatal: failing to open the top-level
//! annotation file, failing to create an output directory or file, and
//! failing to bind the PDF runtime. Everything else (a malformed annotation
//! line, an unreadable image, a link referencing a missing id) is logged at
//! the site of the failure and the offending unit is skipped, so a run
//! always proceeds over the remaining input.

use thiserror::Error;

/// Errors produced by the dataset-preparation pipeline.
#[derive(Error, Debug)]
pub enum PrepError {
    /// An I/O operation failed, with a description of what was being done.
    #[error("{context}: {source}")]
    Io {
        /// What the pipeline was doing when the operation failed.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An image could not be opened or decoded.
    #[error("failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    /// An annotation payload could not be serialized or deserialized.
    #[error("invalid annotation JSON for {image}: {source}")]
    Json {
        /// The image identifier the payload belongs to.
        image: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A PDF could not be loaded or rendered.
    #[error("PDF error while {context}: {message}")]
    Pdf {
        /// What the rasterizer was doing when the operation failed.
        context: String,
        /// The underlying PDFium error message.
        message: String,
    },

    /// A font file could not be parsed.
    #[error("font error: {0}")]
    Font(String),
}

/// Convenient result alias for pipeline operations.
pub type PrepResult<T> = Result<T, PrepError>;

impl PrepError {
    /// Creates an I/O error with context about the failed operation.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a JSON error tagged with the image identifier it belongs to.
    pub fn json(image: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            image: image.into(),
            source,
        }
    }

    /// Creates a PDF error with context about the failed operation.
    pub fn pdf(context: impl Into<String>, message: impl ToString) -> Self {
        Self::Pdf {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
