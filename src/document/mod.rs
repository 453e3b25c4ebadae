//! Document abstraction
//!
//! Wraps a multi-page source document behind a [`PageRasterizer`] and
//! caches rendered pages by page number. Pages are rasterized on first
//! access and kept for the session; documents are assumed to fit in memory.

pub mod pdfium;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{Error, Result};

/// Narrow contract over the PDF rendering backend.
pub trait PageRasterizer {
    /// Number of pages in the document at `path`.
    fn page_count(&self, path: &Path) -> Result<u32>;

    /// Render the 1-based page `page` of the document at `path`.
    fn render_page(&self, path: &Path, page: u32) -> Result<RgbaImage>;
}

/// One loaded document with its lazily-populated page cache.
#[derive(Debug)]
pub struct PdfDocument {
    path: PathBuf,
    page_count: u32,
    pages: HashMap<u32, RgbaImage>,
}

impl PdfDocument {
    /// Open the document, read the page count once, and eagerly rasterize
    /// page 1 as the preview.
    pub fn load(path: impl Into<PathBuf>, rasterizer: &dyn PageRasterizer) -> Result<Self> {
        let path = path.into();
        let page_count = rasterizer.page_count(&path)?;
        let mut pages = HashMap::new();
        pages.insert(1, rasterizer.render_page(&path, 1)?);
        Ok(Self {
            path,
            page_count,
            pages,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Full file name, e.g. `report.final.pdf`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string()
    }

    /// Name used for list entries and output subfolders: the file name text
    /// before the first dot, so `report.final.pdf` becomes `report`.
    pub fn display_name(&self) -> String {
        let name = self.file_name();
        name.split('.').next().unwrap_or("").to_string()
    }

    /// Rendered image for the 1-based page `number`, rasterizing and caching
    /// it on first request.
    pub fn page(&mut self, number: u32, rasterizer: &dyn PageRasterizer) -> Result<&RgbaImage> {
        if number < 1 || number > self.page_count {
            return Err(Error::PageOutOfRange {
                page: number,
                page_count: self.page_count,
            });
        }

        match self.pages.entry(number) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let image = rasterizer.render_page(&self.path, number)?;
                Ok(entry.insert(image))
            }
        }
    }

}

/// Ordered set of loaded documents plus the current selection.
#[derive(Debug, Default)]
pub struct DocumentSet {
    documents: Vec<PdfDocument>,
    selected: Option<usize>,
}

impl DocumentSet {
    /// Append a document and make it the selection.
    pub fn add(&mut self, document: PdfDocument) {
        self.documents.push(document);
        self.selected = Some(self.documents.len() - 1);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &PdfDocument> {
        self.documents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PdfDocument> {
        self.documents.iter_mut()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        if index < self.documents.len() {
            self.selected = Some(index);
        }
    }

    pub fn selected(&self) -> Option<&PdfDocument> {
        self.selected.and_then(|i| self.documents.get(i))
    }

    pub fn selected_mut(&mut self) -> Option<&mut PdfDocument> {
        self.selected.and_then(|i| self.documents.get_mut(i))
    }

    /// Remove the selected document. The selection is cleared rather than
    /// moved to a neighbor.
    pub fn remove_selected(&mut self) {
        if let Some(index) = self.selected.take() {
            if index < self.documents.len() {
                self.documents.remove(index);
            }
        }
    }

    pub fn remove_all(&mut self) {
        self.documents.clear();
        self.selected = None;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;
    use std::path::Path;

    use image::{Rgba, RgbaImage};

    use crate::error::{Error, Result};

    use super::PageRasterizer;

    /// In-memory rasterizer producing solid-color pages, with a render
    /// counter to observe caching behavior.
    pub struct FakeRasterizer {
        pub page_count: u32,
        pub page_size: (u32, u32),
        pub renders: RefCell<u32>,
    }

    impl FakeRasterizer {
        pub fn new(page_count: u32) -> Self {
            Self {
                page_count,
                page_size: (600, 800),
                renders: RefCell::new(0),
            }
        }
    }

    impl PageRasterizer for FakeRasterizer {
        fn page_count(&self, _path: &Path) -> Result<u32> {
            Ok(self.page_count)
        }

        fn render_page(&self, path: &Path, page: u32) -> Result<RgbaImage> {
            if page < 1 || page > self.page_count {
                return Err(Error::Rasterize {
                    path: path.to_path_buf(),
                    page,
                    message: "page out of bounds".into(),
                });
            }
            *self.renders.borrow_mut() += 1;
            // Encode the page number in the pixel data so crops are traceable.
            let shade = (page % 256) as u8;
            Ok(RgbaImage::from_pixel(
                self.page_size.0,
                self.page_size.1,
                Rgba([shade, shade, shade, 255]),
            ))
        }
    }
}
