//! Visualization of linked annotation graphs.
//!
//! For every record the axis-aligned bounding box and its id are drawn in
//! red; for every link pair a centroid-to-centroid line and a `"{a}-{b}"`
//! label are drawn in neon green. Both endpoints of a pair hold a copy of
//! it, so every link is drawn twice; the second pass lands on the same
//! pixels.

use std::path::Path;

use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::{debug, info, warn};

use crate::core::{PrepError, PrepResult};
use crate::dataset::read_annotations;
use crate::domain::Annotation;
use crate::processors::geometry::{BoundingRect, centroid};
use crate::utils::load_image;

const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const LINK_COLOR: Rgb<u8> = Rgb([57, 255, 20]);

/// Configuration for annotation visualization.
pub struct VisualizationConfig {
    /// The font for id and link labels. If None, text rendering is skipped.
    pub font: Option<FontVec>,

    /// The scale factor for label text. Defaults to 20.0.
    pub font_scale: f32,

    /// The thickness of bounding box outlines. Defaults to 6.
    pub box_thickness: i32,

    /// The thickness of link lines. Defaults to 10.
    pub link_thickness: i32,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            font: None,
            font_scale: 20.0,
            box_thickness: 6,
            link_thickness: 10,
        }
    }
}

impl VisualizationConfig {
    /// Creates a config with a font loaded from the specified path.
    pub fn with_font_path(font_path: &Path) -> PrepResult<Self> {
        let font_data = std::fs::read(font_path).map_err(|e| {
            PrepError::io(format!("failed to read font {}", font_path.display()), e)
        })?;
        let font = FontVec::try_from_vec(font_data).map_err(|_| {
            PrepError::Font(format!("failed to parse font file: {}", font_path.display()))
        })?;

        Ok(Self {
            font: Some(font),
            ..Self::default()
        })
    }

    /// Creates a config with a system font.
    ///
    /// Attempts to load a font from common locations; if none is found,
    /// falls back to the default configuration and label text is skipped.
    pub fn with_system_font() -> Self {
        let font_paths = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/System/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];

        for path in &font_paths {
            if let Ok(font_data) = std::fs::read(path)
                && let Ok(font) = FontVec::try_from_vec(font_data)
            {
                info!("Loaded system font: {}", path);
                return Self {
                    font: Some(font),
                    ..Self::default()
                };
            }
        }

        debug!("No system font found, label rendering will be skipped");
        Self::default()
    }

    /// Resolves a config from an optional font path argument, falling back
    /// to a system font when the custom font is absent or unreadable.
    pub fn resolve(font_path: Option<&Path>) -> Self {
        match font_path {
            Some(path) => Self::with_font_path(path)
                .inspect(|_| info!("Using custom font: {}", path.display()))
                .unwrap_or_else(|e| {
                    warn!(
                        "Failed to load custom font {}: {e}. Falling back to system font.",
                        path.display()
                    );
                    Self::with_system_font()
                }),
            None => Self::with_system_font(),
        }
    }
}

/// Renders one image's annotation graph onto a copy of the image.
///
/// Opens the image, converts it to RGB, draws every record's bounding box
/// and id label, then draws every link pair's line and midpoint label. A
/// pair whose endpoint id is not found among the records is skipped with a
/// warning. Fails only when the image itself cannot be opened or decoded.
pub fn render_annotations(
    image_path: &Path,
    records: &[Annotation],
    config: &VisualizationConfig,
) -> PrepResult<RgbImage> {
    let mut img = load_image(image_path)?;
    let img_bounds = (img.width() as i32, img.height() as i32);

    for record in records {
        let Some(rect) = BoundingRect::from_points(&record.points) else {
            continue;
        };
        draw_bounding_box(&mut img, &rect, config, img_bounds);

        if let (Some(id), Some(font)) = (record.id, config.font.as_ref()) {
            let label_x = (rect.x_min as i32).max(0);
            let label_y = (rect.y_min as i32 - 20).max(0);
            if label_x < img_bounds.0 && label_y < img_bounds.1 {
                draw_text_mut(
                    &mut img,
                    BOX_COLOR,
                    label_x,
                    label_y,
                    config.font_scale,
                    font,
                    &id.to_string(),
                );
            }
        }
    }

    for record in records {
        for pair in &record.linking {
            let [a, b] = *pair;
            let (Some(record_a), Some(record_b)) = (find_record(records, a), find_record(records, b))
            else {
                warn!(
                    "skipping link {a}-{b} in {}: endpoint not found",
                    image_path.display()
                );
                continue;
            };
            let (Some(center_a), Some(center_b)) =
                (centroid(&record_a.points), centroid(&record_b.points))
            else {
                continue;
            };

            draw_link_line(&mut img, center_a, center_b, config);

            if let Some(font) = config.font.as_ref() {
                let mid_x = ((center_a.0 + center_b.0) / 2.0) as i32;
                let mid_y = ((center_a.1 + center_b.1) / 2.0) as i32;
                if mid_x >= 0 && mid_y >= 0 && mid_x < img_bounds.0 && mid_y < img_bounds.1 {
                    draw_text_mut(
                        &mut img,
                        LINK_COLOR,
                        mid_x,
                        mid_y,
                        config.font_scale,
                        font,
                        &format!("{a}-{b}"),
                    );
                }
            }
        }
    }

    Ok(img)
}

/// Renders every image of an annotation file into `output_dir`.
///
/// Parses the file, creates the output directory if absent, and saves one
/// `{stem}_annotations.jpeg` per image. Images sharing a stem are not
/// disambiguated; the last write wins. An image that cannot be opened or
/// decoded is logged and skipped, and the run continues.
pub fn render_all(
    annotation_file: &Path,
    output_dir: &Path,
    config: &VisualizationConfig,
) -> PrepResult<()> {
    let set = read_annotations(annotation_file)?;

    std::fs::create_dir_all(output_dir).map_err(|e| {
        PrepError::io(
            format!("failed to create output directory {}", output_dir.display()),
            e,
        )
    })?;

    for (image, records) in set.iter() {
        let image_path = Path::new(image);
        let stem = image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        let output_path = output_dir.join(format!("{stem}_annotations.jpeg"));

        match render_annotations(image_path, records, config) {
            Ok(rendered) => match rendered.save(&output_path) {
                Ok(()) => info!("saved visualization to {}", output_path.display()),
                Err(e) => warn!("failed to save {}: {e}", output_path.display()),
            },
            Err(e) => warn!("skipping {image}: {e}"),
        }
    }

    Ok(())
}

/// Resolves an id to its record by linear search within one image's
/// sequence. Fine at this scale; annotation counts per image are small.
fn find_record(records: &[Annotation], id: u32) -> Option<&Annotation> {
    records.iter().find(|record| record.id == Some(id))
}

fn draw_bounding_box(
    img: &mut RgbImage,
    rect: &BoundingRect,
    config: &VisualizationConfig,
    img_bounds: (i32, i32),
) {
    let Some(base) = rect.to_pixel_rect() else {
        return;
    };
    let (img_width, img_height) = img_bounds;

    if !is_rect_in_bounds(&base, img_width, img_height) {
        return;
    }

    for thickness in 0..config.box_thickness {
        let thick_rect = Rect::at(base.left() - thickness, base.top() - thickness).of_size(
            base.width() + (2 * thickness) as u32,
            base.height() + (2 * thickness) as u32,
        );

        if is_rect_in_bounds(&thick_rect, img_width, img_height) {
            draw_hollow_rect_mut(img, thick_rect, BOX_COLOR);
        }
    }
}

fn draw_link_line(
    img: &mut RgbImage,
    from: (f64, f64),
    to: (f64, f64),
    config: &VisualizationConfig,
) {
    let (ax, ay) = (from.0 as f32, from.1 as f32);
    let (bx, by) = (to.0 as f32, to.1 as f32);

    // offset parallel strokes perpendicular to the dominant direction to
    // reach the configured thickness
    let horizontal = (bx - ax).abs() >= (by - ay).abs();
    for stroke in 0..config.link_thickness {
        let offset = (stroke - config.link_thickness / 2) as f32;
        if horizontal {
            draw_line_segment_mut(img, (ax, ay + offset), (bx, by + offset), LINK_COLOR);
        } else {
            draw_line_segment_mut(img, (ax + offset, ay), (bx + offset, by), LINK_COLOR);
        }
    }
}

fn is_rect_in_bounds(rect: &Rect, img_width: i32, img_height: i32) -> bool {
    rect.left() >= 0 && rect.top() >= 0 && rect.right() < img_width && rect.bottom() < img_height
}
