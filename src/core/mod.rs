//! Core error handling for the dataset-preparation pipeline.

pub mod errors;

pub use errors::{PrepError, PrepResult};
