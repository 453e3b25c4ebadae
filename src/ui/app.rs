//! Main window: panel layout and transient UI state.

use std::path::PathBuf;

use eframe::egui;
use tracing::error;

use crate::app::AppState;
use crate::config::AppConfig;
use crate::document::pdfium::PdfiumRasterizer;
use crate::document::PageRasterizer;
use crate::ui::views::{
    render_canvas, render_documents_panel, render_ocr_panel, render_regions_panel,
    render_viewer_controls,
};

/// The main application window.
pub struct RegionSnapApp {
    state: AppState,
    ui_state: UiState,
    /// PDF rendering backend; absent when libpdfium could not be bound.
    rasterizer: Option<PdfiumRasterizer>,
}

/// Transient UI-only state, reset with the window.
#[derive(Default)]
pub struct UiState {
    /// Open rename dialog, if any.
    pub rename: Option<RenameDialog>,
    /// OCR layout toggle: false puts regions in columns, true transposes.
    pub documents_as_columns: bool,
    /// Texture for the currently displayed page.
    pub page_texture: Option<PageTexture>,
    /// True while a drag that started inside the focused region is active.
    pub dragging_region: bool,
    /// Last (document, page) whose rasterization failed, to avoid
    /// re-rendering it every frame.
    pub render_failure: Option<(PathBuf, u32)>,
}

/// Rename dialog target and edit buffer.
pub struct RenameDialog {
    pub index: usize,
    pub text: String,
}

/// GPU texture for one rendered page, keyed by document and page number.
pub struct PageTexture {
    pub document: usize,
    pub page: u32,
    pub handle: egui::TextureHandle,
}

impl RegionSnapApp {
    pub fn new(config: AppConfig) -> Self {
        let rasterizer = match PdfiumRasterizer::new() {
            Ok(rasterizer) => Some(rasterizer),
            Err(e) => {
                error!("pdfium unavailable, PDF loading disabled: {e}");
                None
            }
        };

        Self {
            state: AppState::new(config),
            ui_state: UiState::default(),
            rasterizer,
        }
    }

    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 800.0])
                .with_min_inner_size([900.0, 600.0])
                .with_title("RegionSnap"),
            ..Default::default()
        }
    }
}

impl eframe::App for RegionSnapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let rasterizer = self.rasterizer.as_ref().map(|r| r as &dyn PageRasterizer);

        egui::SidePanel::left("controls")
            .default_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    render_documents_panel(ui, &mut self.state, rasterizer);
                    ui.separator();
                    render_regions_panel(ui, &mut self.state, &mut self.ui_state);
                    ui.separator();
                    render_ocr_panel(ui, &mut self.state, &mut self.ui_state, rasterizer);
                });
            });

        egui::TopBottomPanel::bottom("viewer_controls").show(ctx, |ui| {
            render_viewer_controls(ui, &mut self.state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            render_canvas(ui, &mut self.state, &mut self.ui_state, rasterizer);
        });
    }
}

/// Launch the window; blocks until it closes.
pub fn run(config: AppConfig) -> Result<(), eframe::Error> {
    let app = RegionSnapApp::new(config);
    eframe::run_native(
        "RegionSnap",
        RegionSnapApp::options(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
