//! Reading and writing the tab-separated annotation file format.
//!
//! Each line is `<image_identifier>\t<JSON array of annotation objects>`.
//! The reader is resilient (bad lines are logged and skipped); the writer
//! produces a new file and never touches its input.

pub mod reader;
pub mod writer;

pub use reader::read_annotations;
pub use writer::save_annotations;
