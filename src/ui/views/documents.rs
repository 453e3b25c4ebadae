//! Documents panel: load, select, and delete PDFs.

use eframe::egui;

use crate::app::AppState;
use crate::document::PageRasterizer;
use crate::ui::dialogs;

pub fn render_documents_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    rasterizer: Option<&dyn PageRasterizer>,
) {
    if ui.button("Load PDF").clicked() {
        load_pdf(state, rasterizer);
    }

    ui.horizontal(|ui| {
        ui.label("Loaded PDFs:");
        if ui.button("Delete selected PDF").clicked() {
            state.remove_selected_document();
        }
        if ui.button("Delete all PDFs").clicked()
            && !state.documents.is_empty()
            && dialogs::confirm("Delete all PDFs", "Remove every loaded PDF?")
        {
            state.remove_all_documents();
        }
    });

    let selected = state.documents.selected_index();
    let names: Vec<String> = state.documents.iter().map(|d| d.file_name()).collect();
    let mut clicked = None;

    egui::ScrollArea::vertical()
        .id_salt("documents_list")
        .max_height(140.0)
        .show(ui, |ui| {
            for (index, name) in names.iter().enumerate() {
                if ui.selectable_label(selected == Some(index), name).clicked() {
                    clicked = Some(index);
                }
            }
        });

    if let Some(index) = clicked {
        state.select_document(index);
    }
}

fn load_pdf(state: &mut AppState, rasterizer: Option<&dyn PageRasterizer>) {
    let Some(rasterizer) = rasterizer else {
        dialogs::error(
            "PDF renderer unavailable",
            "libpdfium could not be loaded; place it next to the executable or install it system-wide.",
        );
        return;
    };

    let Some(path) = rfd::FileDialog::new()
        .add_filter("PDF Files", &["pdf"])
        .pick_file()
    else {
        return;
    };

    if let Err(e) = state.load_document(path, rasterizer) {
        dialogs::error("Could not load PDF", &e.to_string());
    }
}
