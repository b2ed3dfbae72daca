//! Annotation processing passes: geometry helpers, nearest-neighbor
//! linking, and horizontal-flip augmentation.

pub mod flip;
pub mod geometry;
pub mod linker;

pub use geometry::{BoundingRect, centroid, manhattan_distance};
pub use linker::{SOURCE_LABEL, TARGET_LABEL, link_annotations};
