//! pdfium-backed page rasterization.
//!
//! Binds libpdfium at startup (a copy next to the executable wins over the
//! system library) and renders pages at a fixed DPI into RGBA bitmaps.

use std::path::Path;

use image::RgbaImage;
use pdfium_render::prelude::*;

use crate::error::{Error, Result};

use super::PageRasterizer;

/// Render resolution for page bitmaps. Region geometry is defined in the
/// pixel space this produces, so it must stay constant across sessions.
const RENDER_DPI: f32 = 200.0;

/// PDF points per inch.
const POINTS_PER_INCH: f32 = 72.0;

pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    /// Bind the pdfium library: a local copy first, then the system one.
    pub fn new() -> anyhow::Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| anyhow::anyhow!("failed to bind pdfium library: {e:?}"))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn page_count(&self, path: &Path) -> Result<u32> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| Error::DocumentOpen {
                path: path.to_path_buf(),
                message: format!("{e:?}"),
            })?;
        Ok(document.pages().len() as u32)
    }

    fn render_page(&self, path: &Path, page: u32) -> Result<RgbaImage> {
        let rasterize_error = |message: String| Error::Rasterize {
            path: path.to_path_buf(),
            page,
            message,
        };

        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| rasterize_error(format!("{e:?}")))?;

        let page_index = page.saturating_sub(1) as u16;
        let pages = document.pages();
        let pdf_page = pages
            .get(page_index)
            .map_err(|e| rasterize_error(format!("{e:?}")))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(RENDER_DPI / POINTS_PER_INCH);
        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|e| rasterize_error(format!("{e:?}")))?;

        Ok(bitmap.as_image().into_rgba8())
    }
}
