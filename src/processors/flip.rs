//! Horizontal-flip augmentation for detection and recognition datasets.
//!
//! Detection annotations (polygons) are mirrored by remapping x-coordinates
//! against the image width; recognition annotations (text strings) are
//! reversed character-wise. Both passes write flipped image copies named
//! `{stem}_flipped.jpeg` next to a new annotation file and leave the
//! originals untouched.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::core::{PrepError, PrepResult};
use crate::dataset::reader::split_line;
use crate::domain::Annotation;

/// Mirrors polygon vertices horizontally: `x' = width - x`, y unchanged.
pub fn flip_points(points: &[(f64, f64)], image_width: f64) -> Vec<(f64, f64)> {
    points.iter().map(|&(x, y)| (image_width - x, y)).collect()
}

/// Reverses a recognition label character-wise.
pub fn reverse_label(label: &str) -> String {
    label.chars().rev().collect()
}

/// Output name for the flipped copy of an image.
fn flipped_image_name(image_name: &str) -> String {
    let stem = Path::new(image_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(image_name);
    format!("{stem}_flipped.jpeg")
}

/// Flips a detection dataset: every image is mirrored horizontally and every
/// record's polygon is remapped to match.
///
/// Lines with the wrong field count or unparseable JSON, and lines whose
/// image is missing or unreadable, are logged and skipped. Fails only when
/// the annotation file cannot be read or an output directory/file cannot be
/// created.
pub fn flip_detection_dataset(
    annotation_file: &Path,
    image_dir: &Path,
    output_image_dir: &Path,
    output_annotation_file: &Path,
) -> PrepResult<()> {
    fs::create_dir_all(output_image_dir).map_err(|e| {
        PrepError::io(
            format!("failed to create output directory {}", output_image_dir.display()),
            e,
        )
    })?;

    let contents = fs::read_to_string(annotation_file).map_err(|e| {
        PrepError::io(
            format!("failed to open annotation file {}", annotation_file.display()),
            e,
        )
    })?;

    let mut flipped: Vec<(String, Vec<Annotation>)> = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((image_name, payload)) = split_line(line) else {
            warn!("skipping malformed annotation line: {line}");
            continue;
        };
        let mut records = match serde_json::from_str::<Vec<Annotation>>(payload) {
            Ok(records) => records,
            Err(e) => {
                warn!("skipping line with invalid annotation JSON for {image_name}: {e}");
                continue;
            }
        };

        let image_path = image_dir.join(image_name);
        let flipped_image = match image::open(&image_path) {
            Ok(image) => image.fliph().to_rgb8(),
            Err(e) => {
                warn!("skipping {}: {e}", image_path.display());
                continue;
            }
        };
        let image_width = flipped_image.width() as f64;

        let output_name = flipped_image_name(image_name);
        let output_path = output_image_dir.join(&output_name);
        if let Err(e) = flipped_image.save(&output_path) {
            warn!("failed to save flipped image {}: {e}", output_path.display());
            continue;
        }

        for record in &mut records {
            record.points = flip_points(&record.points, image_width);
        }
        flipped.push((output_name, records));
    }

    write_annotation_lines(output_annotation_file, flipped.iter().map(|(name, records)| {
        serde_json::to_string(records)
            .map(|payload| format!("{name}\t{payload}"))
            .map_err(|e| PrepError::json(name.as_str(), e))
    }))?;

    info!("flipped images saved to {}", output_image_dir.display());
    info!(
        "annotations updated and saved to {}",
        output_annotation_file.display()
    );
    Ok(())
}

/// Flips a recognition dataset: annotation lines are `image\ttext`, so the
/// text is reversed character-wise and the referenced image is mirrored.
///
/// The rewritten annotation line is emitted even when the image itself is
/// missing (the image flip is then skipped with a warning), matching the
/// detection pass's tolerance of bad input.
pub fn flip_recognition_dataset(
    annotation_file: &Path,
    image_dir: &Path,
    output_annotation_file: &Path,
    output_image_dir: &Path,
) -> PrepResult<()> {
    fs::create_dir_all(output_image_dir).map_err(|e| {
        PrepError::io(
            format!("failed to create output directory {}", output_image_dir.display()),
            e,
        )
    })?;

    let contents = fs::read_to_string(annotation_file).map_err(|e| {
        PrepError::io(
            format!("failed to open annotation file {}", annotation_file.display()),
            e,
        )
    })?;

    let mut lines: Vec<String> = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((image_name, label)) = split_line(line) else {
            warn!("skipping malformed annotation line: {line}");
            continue;
        };

        let output_name = flipped_image_name(image_name);
        lines.push(format!("{output_name}\t{}", reverse_label(label)));

        let image_path = image_dir.join(image_name);
        match image::open(&image_path) {
            Ok(image) => {
                let output_path = output_image_dir.join(&output_name);
                if let Err(e) = image.fliph().to_rgb8().save(&output_path) {
                    warn!("failed to save flipped image {}: {e}", output_path.display());
                }
            }
            Err(e) => warn!("skipping image {}: {e}", image_path.display()),
        }
    }

    write_annotation_lines(output_annotation_file, lines.into_iter().map(Ok))?;

    info!("flipped images saved to {}", output_image_dir.display());
    info!(
        "annotations updated and saved to {}",
        output_annotation_file.display()
    );
    Ok(())
}

fn write_annotation_lines(
    path: &Path,
    lines: impl Iterator<Item = PrepResult<String>>,
) -> PrepResult<()> {
    let file = fs::File::create(path).map_err(|e| {
        PrepError::io(format!("failed to create annotation file {}", path.display()), e)
    })?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line?)
            .map_err(|e| PrepError::io(format!("failed to write {}", path.display()), e))?;
    }
    writer
        .flush()
        .map_err(|e| PrepError::io(format!("failed to write {}", path.display()), e))
}
