//! Central application state
//!
//! Owns the document set, the region catalog, and the extraction output
//! folder. Views receive only the pieces of state they need; no component
//! holds a back-reference to the application.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::catalog::{self, RegionCatalog};
use crate::config::{self, AppConfig};
use crate::document::{DocumentSet, PageRasterizer, PdfDocument};
use crate::error::{Error, Result};
use crate::extract::{self, ExtractReport};
use crate::ocr::TesseractOcr;
use crate::viewer::{PageCursor, Zoom};

/// Everything the UI operates on.
pub struct AppState {
    pub config: AppConfig,
    pub documents: DocumentSet,
    pub catalog: RegionCatalog,
    /// Extraction output root; subfolders are created per document.
    pub output_folder: PathBuf,
    pub zoom: Zoom,
    pub page: PageCursor,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let output_folder = config
            .output
            .folder
            .clone()
            .unwrap_or_else(config::default_output_folder);

        let mut zoom = Zoom::default();
        if let Err(e) = zoom.set(config.viewer.default_zoom) {
            warn!("configured default zoom rejected: {e}");
        }

        Self {
            config,
            documents: DocumentSet::default(),
            catalog: RegionCatalog::default(),
            output_folder,
            zoom,
            page: PageCursor::default(),
        }
    }

    /// OCR engine built from the current settings.
    pub fn recognizer(&self) -> TesseractOcr {
        TesseractOcr::new(
            self.config.ocr.tesseract_path.clone(),
            self.config.ocr.language.clone(),
        )
    }

    /// Load a document, make it the selection, and show its first page.
    pub fn load_document(
        &mut self,
        path: impl Into<PathBuf>,
        rasterizer: &dyn PageRasterizer,
    ) -> Result<()> {
        let document = PdfDocument::load(path, rasterizer)?;
        self.documents.add(document);
        self.page.reset();
        Ok(())
    }

    pub fn select_document(&mut self, index: usize) {
        self.documents.select(index);
        self.page.reset();
    }

    pub fn remove_selected_document(&mut self) {
        self.documents.remove_selected();
        self.page.reset();
    }

    pub fn remove_all_documents(&mut self) {
        self.documents.remove_all();
        self.page.reset();
    }

    /// Create a region on the current page, named after the selected
    /// document.
    pub fn create_region(&mut self) -> Result<usize> {
        let name = self
            .documents
            .selected()
            .map(|d| d.display_name())
            .ok_or(Error::NoFileSelected)?;
        Ok(self.catalog.create(name, self.page.current()))
    }

    /// Focus a region and jump the viewer to its page.
    pub fn focus_region(&mut self, index: usize) {
        self.catalog.focus(index);
        if let Some(region) = self.catalog.get(index) {
            self.page.go_to(region.page);
        }
    }

    /// Extract the focused region from every loaded document.
    pub fn extract_selected(&mut self, rasterizer: &dyn PageRasterizer) -> Result<Vec<PathBuf>> {
        let index = self.catalog.focused().ok_or(Error::NoRegionSelected)?;
        let region = self
            .catalog
            .get(index)
            .cloned()
            .ok_or(Error::NoRegionSelected)?;
        extract::extract_region(&region, &mut self.documents, rasterizer, &self.output_folder)
    }

    /// Extract every region from every document.
    pub fn extract_all(&mut self, rasterizer: &dyn PageRasterizer) -> Result<ExtractReport> {
        extract::extract_all(
            &self.catalog,
            &mut self.documents,
            rasterizer,
            &self.output_folder,
            self.config.output.failure_mode,
        )
    }

    /// Persist the catalog; returns how many regions were written.
    pub fn save_regions(&self, path: &Path) -> anyhow::Result<usize> {
        catalog::save_catalog(&self.catalog, path)?;
        Ok(self.catalog.len())
    }

    /// Replace the catalog from a region set file; returns how many regions
    /// were loaded.
    pub fn load_regions(&mut self, path: &Path) -> anyhow::Result<usize> {
        let records = catalog::load_records(path)?;
        self.catalog.apply_records(&records);
        Ok(records.len())
    }
}
