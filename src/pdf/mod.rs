//! PDF page rasterization for building source images.
//!
//! Renders every page of every PDF in a directory to a JPEG named
//! `{stem}_page_{n}.jpeg`. File names are sanitized first (spaces and
//! German umlauts survive badly in downstream annotation files), and the
//! source PDF is renamed in place when its cleaned name differs.

use std::fs;
use std::path::Path;

use image::RgbImage;
use pdfium_render::prelude::*;
use tracing::{info, warn};

use crate::core::{PrepError, PrepResult};

/// Sanitizes a file name: trims, replaces spaces with underscores, and
/// transliterates German umlauts and sharp s.
pub fn clean_file_name(name: &str) -> String {
    let mut cleaned = name.trim().replace(' ', "_");
    for (umlaut, replacement) in [
        ("ä", "a"),
        ("ö", "o"),
        ("ü", "u"),
        ("Ä", "A"),
        ("Ö", "O"),
        ("Ü", "U"),
        ("ß", "ss"),
    ] {
        cleaned = cleaned.replace(umlaut, replacement);
    }
    cleaned
}

/// Configuration for page rendering.
#[derive(Debug, Clone)]
pub struct RasterSettings {
    /// Rendering resolution in dots per inch.
    pub dpi: f32,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self { dpi: 300.0 }
    }
}

/// Renders PDF pages to RGB images through PDFium.
pub struct PdfRasterizer {
    pdfium: Pdfium,
    settings: RasterSettings,
}

impl PdfRasterizer {
    /// Binds PDFium from the working directory, common system locations, or
    /// the system library, in that order.
    pub fn new(settings: RasterSettings) -> PrepResult<Self> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| {
                    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                        "/usr/lib",
                    ))
                })
                .or_else(|_| {
                    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                        "/usr/local/lib",
                    ))
                })
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| PrepError::pdf("binding PDFium library", e))?,
        );

        Ok(Self { pdfium, settings })
    }

    /// Renders every page of one PDF at the configured DPI.
    pub fn rasterize_file(&self, path: &Path) -> PrepResult<Vec<RgbImage>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| PrepError::pdf(format!("loading {}", path.display()), e))?;

        let scale = self.settings.dpi / 72.0;
        let mut pages = Vec::with_capacity(document.pages().len() as usize);

        for (index, page) in document.pages().iter().enumerate() {
            let width_px = (page.width().value * scale) as i32;
            let height_px = (page.height().value * scale) as i32;

            let render_config = PdfRenderConfig::new()
                .set_target_width(width_px)
                .set_target_height(height_px);

            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                PrepError::pdf(
                    format!("rendering page {} of {}", index + 1, path.display()),
                    e,
                )
            })?;
            pages.push(bitmap.as_image().to_rgb8());
        }

        Ok(pages)
    }

    /// Converts every `*.pdf` under `input_dir`, writing
    /// `{stem}_page_{n}.jpeg` files (1-based) under `output_dir`.
    ///
    /// Source files whose cleaned name differs are renamed in place before
    /// processing. A PDF that fails to load or render is logged and
    /// skipped; the pass continues with the next file. Fails only when the
    /// output directory cannot be created or the input directory cannot be
    /// listed.
    pub fn rasterize_dir(&self, input_dir: &Path, output_dir: &Path) -> PrepResult<()> {
        fs::create_dir_all(output_dir).map_err(|e| {
            PrepError::io(
                format!("failed to create output directory {}", output_dir.display()),
                e,
            )
        })?;

        let entries = fs::read_dir(input_dir).map_err(|e| {
            PrepError::io(
                format!("failed to read input directory {}", input_dir.display()),
                e,
            )
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                PrepError::io(
                    format!("failed to read input directory {}", input_dir.display()),
                    e,
                )
            })?;
            let path = entry.path();
            if !is_pdf_path(&path) {
                continue;
            }

            let path = match sanitize_in_place(&path) {
                Some(path) => path,
                None => continue,
            };

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");

            match self.rasterize_file(&path) {
                Ok(pages) => {
                    for (number, page) in pages.iter().enumerate() {
                        let output_path =
                            output_dir.join(format!("{stem}_page_{}.jpeg", number + 1));
                        if let Err(e) = page.save(&output_path) {
                            warn!("failed to save {}: {e}", output_path.display());
                        }
                    }
                    info!("converted {} ({} pages)", path.display(), pages.len());
                }
                Err(e) => warn!("skipping {}: {e}", path.display()),
            }
        }

        Ok(())
    }

}

/// Renames a source PDF to its cleaned name, returning the path to keep
/// processing. `None` when the rename failed.
fn sanitize_in_place(path: &Path) -> Option<std::path::PathBuf> {
    let name = path.file_name()?.to_str()?;
    let cleaned = clean_file_name(name);
    if cleaned == name {
        return Some(path.to_path_buf());
    }

    let renamed = path.with_file_name(&cleaned);
    match fs::rename(path, &renamed) {
        Ok(()) => {
            info!("renamed {} to {cleaned}", path.display());
            Some(renamed)
        }
        Err(e) => {
            warn!("failed to rename {}: {e}", path.display());
            None
        }
    }
}

/// Whether a path has a `.pdf` extension, case-insensitively.
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
