//! Extraction engine
//!
//! Crops each (region × document) pair out of the document's rendered page
//! and writes it to `output_root/<document_display_name>/<region_name>.png`.
//! Directories are created on demand and never cleaned.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{Region, RegionCatalog};
use crate::document::{DocumentSet, PageRasterizer, PdfDocument};
use crate::error::{Error, Result};
use crate::geometry::RectShape;

/// What a batch does when one pair fails mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Stop at the first failure and surface it.
    #[default]
    Abort,
    /// Keep going and report the failures at the end.
    Continue,
}

/// Outcome of a batch extraction.
#[derive(Debug, Default)]
pub struct ExtractReport {
    /// Number of (region × document) pairs written successfully.
    pub processed: usize,
    /// Human-readable description of each failed pair.
    pub failures: Vec<String>,
}

/// Crop the region's geometry out of a rendered page.
///
/// The stored geometry is position + extent, so the crop window is the
/// rectangle translated by its origin, intersected with the page bounds.
pub fn crop_region(page: &RgbaImage, shape: &RectShape) -> RgbaImage {
    let page_w = page.width() as f32;
    let page_h = page.height() as f32;

    let x0 = shape.origin.x.clamp(0.0, page_w);
    let y0 = shape.origin.y.clamp(0.0, page_h);
    let x1 = (shape.origin.x + shape.size.0).clamp(0.0, page_w);
    let y1 = (shape.origin.y + shape.size.1).clamp(0.0, page_h);

    image::imageops::crop_imm(
        page,
        x0 as u32,
        y0 as u32,
        (x1 - x0) as u32,
        (y1 - y0) as u32,
    )
    .to_image()
}

/// Destination path for one (region × document) pair.
pub fn output_path(region: &Region, document: &PdfDocument, output_root: &Path) -> PathBuf {
    output_root
        .join(document.display_name())
        .join(format!("{}.png", region.name))
}

/// Extract one region from one document.
pub fn extract_one(
    region: &Region,
    document: &mut PdfDocument,
    rasterizer: &dyn PageRasterizer,
    output_root: &Path,
) -> Result<PathBuf> {
    let dest = output_path(region, document, output_root);
    let dir = output_root.join(document.display_name());
    fs::create_dir_all(&dir).map_err(|source| Error::OutputWrite {
        path: dir.clone(),
        source,
    })?;

    let page = document.page(region.page, rasterizer)?;
    let cropped = crop_region(page, &region.shape);

    cropped.save(&dest).map_err(|e| match e {
        image::ImageError::IoError(source) => Error::OutputWrite {
            path: dest.clone(),
            source,
        },
        other => Error::OutputWrite {
            path: dest.clone(),
            source: std::io::Error::other(other.to_string()),
        },
    })?;

    Ok(dest)
}

/// Extract one region from every loaded document, aborting on the first
/// failure. Returns the written paths.
pub fn extract_region(
    region: &Region,
    documents: &mut DocumentSet,
    rasterizer: &dyn PageRasterizer,
    output_root: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for document in documents.iter_mut() {
        written.push(extract_one(region, document, rasterizer, output_root)?);
    }
    Ok(written)
}

/// Extract every region from every document (cross product).
pub fn extract_all(
    catalog: &RegionCatalog,
    documents: &mut DocumentSet,
    rasterizer: &dyn PageRasterizer,
    output_root: &Path,
    mode: FailureMode,
) -> Result<ExtractReport> {
    let mut report = ExtractReport::default();

    for region in catalog.iter() {
        for document in documents.iter_mut() {
            match extract_one(region, document, rasterizer, output_root) {
                Ok(path) => {
                    info!(path = %path.display(), "extracted");
                    report.processed += 1;
                }
                Err(e) => match mode {
                    FailureMode::Abort => return Err(e),
                    FailureMode::Continue => report.failures.push(format!(
                        "{} / {}: {e}",
                        document.display_name(),
                        region.name
                    )),
                },
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::test_support::FakeRasterizer;
    use crate::geometry::Point;

    fn gradient_page(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        })
    }

    #[test]
    fn test_crop_translates_by_origin() {
        let page = gradient_page(600, 400);
        let shape = RectShape::new(Point::new(10.0, 20.0), (30.0, 40.0));

        let cropped = crop_region(&page, &shape);
        assert_eq!(cropped.dimensions(), (30, 40));
        assert_eq!(cropped.get_pixel(0, 0), page.get_pixel(10, 20));
        assert_eq!(cropped.get_pixel(29, 39), page.get_pixel(39, 59));
    }

    #[test]
    fn test_crop_clamps_to_page_bounds() {
        let page = gradient_page(100, 100);
        let shape = RectShape::new(Point::new(80.0, -10.0), (50.0, 50.0));

        let cropped = crop_region(&page, &shape);
        assert_eq!(cropped.dimensions(), (20, 40));
    }

    #[test]
    fn test_extract_all_writes_cross_product() {
        let dir = tempfile::tempdir().unwrap();
        let rasterizer = FakeRasterizer::new(3);

        let mut documents = DocumentSet::default();
        documents.add(PdfDocument::load("a.pdf", &rasterizer).unwrap());
        documents.add(PdfDocument::load("b.pdf", &rasterizer).unwrap());

        let mut catalog = RegionCatalog::default();
        catalog.create("header", 1);
        catalog.create("footer", 2);

        let report = extract_all(
            &catalog,
            &mut documents,
            &rasterizer,
            dir.path(),
            FailureMode::Abort,
        )
        .unwrap();

        assert_eq!(report.processed, 4);
        assert!(report.failures.is_empty());
        for doc in ["a", "b"] {
            for region in ["header", "footer"] {
                assert!(dir.path().join(doc).join(format!("{region}.png")).is_file());
            }
        }
    }

    #[test]
    fn test_extract_all_aborts_on_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let rasterizer = FakeRasterizer::new(2);

        let mut documents = DocumentSet::default();
        documents.add(PdfDocument::load("a.pdf", &rasterizer).unwrap());

        let mut catalog = RegionCatalog::default();
        let bad = catalog.create("bad", 99);
        catalog.create("good", 1);
        assert_eq!(bad, 0);

        let result = extract_all(
            &catalog,
            &mut documents,
            &rasterizer,
            dir.path(),
            FailureMode::Abort,
        );
        assert!(matches!(result, Err(Error::PageOutOfRange { page: 99, .. })));
        // The later region never ran.
        assert!(!dir.path().join("a").join("good.png").exists());
    }

    #[test]
    fn test_extract_all_continue_collects_failures() {
        let dir = tempfile::tempdir().unwrap();
        let rasterizer = FakeRasterizer::new(2);

        let mut documents = DocumentSet::default();
        documents.add(PdfDocument::load("a.pdf", &rasterizer).unwrap());
        documents.add(PdfDocument::load("b.pdf", &rasterizer).unwrap());

        let mut catalog = RegionCatalog::default();
        catalog.create("bad", 99);
        catalog.create("good", 1);

        let report = extract_all(
            &catalog,
            &mut documents,
            &rasterizer,
            dir.path(),
            FailureMode::Continue,
        )
        .unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.failures.len(), 2);
        assert!(dir.path().join("a").join("good.png").is_file());
        assert!(dir.path().join("b").join("good.png").is_file());
    }

    #[test]
    fn test_default_region_extracts_page_one_box() {
        // One region at default geometry applied to two documents of
        // different lengths: each output is the page-1 crop at
        // (10, 10, 300, 150).
        let dir = tempfile::tempdir().unwrap();
        let rasterizer = FakeRasterizer::new(3);

        let mut documents = DocumentSet::default();
        documents.add(PdfDocument::load("A.pdf", &rasterizer).unwrap());
        let rasterizer_b = FakeRasterizer::new(5);
        documents.add(PdfDocument::load("B.pdf", &rasterizer_b).unwrap());

        let mut catalog = RegionCatalog::default();
        catalog.create("Title", 1);

        let report = extract_all(
            &catalog,
            &mut documents,
            &rasterizer,
            dir.path(),
            FailureMode::Abort,
        )
        .unwrap();
        assert_eq!(report.processed, 2);

        for doc in ["A", "B"] {
            let path = dir.path().join(doc).join("Title.png");
            let written = image::open(&path).unwrap();
            assert_eq!(written.width(), 300);
            assert_eq!(written.height(), 150);
        }
    }

    #[test]
    fn test_extract_region_writes_one_file_per_document() {
        let dir = tempfile::tempdir().unwrap();
        let rasterizer = FakeRasterizer::new(1);

        let mut documents = DocumentSet::default();
        documents.add(PdfDocument::load("a.pdf", &rasterizer).unwrap());
        documents.add(PdfDocument::load("b.pdf", &rasterizer).unwrap());

        let mut catalog = RegionCatalog::default();
        let index = catalog.create("only", 1);

        let written = extract_region(
            catalog.get(index).unwrap(),
            &mut documents,
            &rasterizer,
            dir.path(),
        )
        .unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0], dir.path().join("a").join("only.png"));
        assert_eq!(written[1], dir.path().join("b").join("only.png"));
    }
}
