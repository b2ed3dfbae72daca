//! # vaxprep
//!
//! Offline dataset-preparation utilities for a vaccination-record
//! document-understanding pipeline. The crate reads line-delimited,
//! tab-separated annotation files (image identifier + JSON array of labeled
//! bounding polygons) and performs one transformation pass per tool:
//!
//! - Heuristic nearest-neighbor linking between `vaccine_name` and
//!   `vaccine_date` annotations
//! - Visualization of boxes and link graphs as overlay images
//! - Horizontal-flip augmentation for detection (polygon) and recognition
//!   (text-string) datasets
//! - PDF-to-image rasterization for building source images
//!
//! ## Modules
//!
//! * [`core`] - Error handling
//! * [`domain`] - Annotation record and set data model
//! * [`dataset`] - Annotation file reading and writing
//! * [`processors`] - Geometry, linking, and flip augmentation
//! * [`pdf`] - PDF page rasterization
//! * [`utils`] - Image loading, visualization, and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vaxprep::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> PrepResult<()> {
//! let mut set = read_annotations(Path::new("labels.txt"))?;
//! link_annotations(&mut set);
//! save_annotations(&set, Path::new("labels_linked.txt"))?;
//!
//! let config = VisualizationConfig::with_system_font();
//! render_all(Path::new("labels_linked.txt"), Path::new("viz/"), &config)?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod dataset;
pub mod domain;
pub mod pdf;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use vaxprep::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{PrepError, PrepResult};
    pub use crate::dataset::{read_annotations, save_annotations};
    pub use crate::domain::{Annotation, AnnotationSet};
    pub use crate::processors::link_annotations;
    pub use crate::utils::visualization::{VisualizationConfig, render_all, render_annotations};
}
