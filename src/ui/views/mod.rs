//! Panel renderers

pub mod documents;
pub mod ocr;
pub mod regions;
pub mod viewer;

pub use documents::render_documents_panel;
pub use ocr::render_ocr_panel;
pub use regions::render_regions_panel;
pub use viewer::{render_canvas, render_viewer_controls};
