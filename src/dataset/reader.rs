//! Resilient parser for tab-separated annotation files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::core::{PrepError, PrepResult};
use crate::domain::{Annotation, AnnotationSet};

/// Parses an annotation file into an [`AnnotationSet`].
///
/// Fails only if the file itself cannot be read. Within the file, every
/// non-empty line must split into exactly two tab-separated fields (image
/// identifier, JSON array); a line with the wrong field count or an
/// unparseable payload is logged and skipped, and parsing continues with
/// the next line. Each decoded record gets `image_path` set to the line's
/// image identifier for traceability.
pub fn read_annotations(path: &Path) -> PrepResult<AnnotationSet> {
    info!("reading annotations from {}", path.display());

    let contents = fs::read_to_string(path).map_err(|e| {
        PrepError::io(
            format!("failed to open annotation file {}", path.display()),
            e,
        )
    })?;

    let mut set = AnnotationSet::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((image, payload)) = split_line(line) else {
            warn!("skipping malformed annotation line: {line}");
            continue;
        };

        match serde_json::from_str::<Vec<Annotation>>(payload) {
            Ok(mut records) => {
                for record in &mut records {
                    record.image_path = Some(image.to_string());
                }
                set.extend_image(image, records);
            }
            Err(e) => {
                warn!("skipping line with invalid annotation JSON for {image}: {e}");
            }
        }
    }

    info!("loaded {} images with annotations", set.len());
    Ok(set)
}

/// Splits a line into exactly two tab-separated fields, trimmed.
pub(crate) fn split_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split('\t');
    let image = parts.next()?.trim();
    let payload = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }
    Some((image, payload))
}
