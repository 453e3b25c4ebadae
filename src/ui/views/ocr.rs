//! Extraction and OCR controls.

use std::path::Path;
use std::process::Command;

use eframe::egui;
use tracing::warn;

use crate::app::AppState;
use crate::document::PageRasterizer;
use crate::spreadsheet;
use crate::tabulate::{self, TableLayout};
use crate::ui::app::UiState;
use crate::ui::dialogs;

pub fn render_ocr_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    view: &mut UiState,
    rasterizer: Option<&dyn PageRasterizer>,
) {
    ui.horizontal(|ui| {
        if ui.button("Extract").clicked() {
            extract_selected(state, rasterizer);
        }
        if ui
            .button("F")
            .on_hover_text("Set output folder")
            .clicked()
        {
            pick_output_folder(state);
        }
        if ui.button("Extract All").clicked() {
            extract_all(state, rasterizer);
        }
    });

    ui.label(format!("Output folder: {}", state.output_folder.display()));

    ui.horizontal(|ui| {
        if ui.button("Run OCR").clicked() {
            run_ocr(state, view);
        }
        ui.radio_value(&mut view.documents_as_columns, false, "Region columns, file rows");
        ui.radio_value(&mut view.documents_as_columns, true, "File columns, region rows");
    });
}

fn pick_output_folder(state: &mut AppState) {
    if let Some(folder) = rfd::FileDialog::new().pick_folder() {
        state.output_folder = folder;
    }
}

fn extract_selected(state: &mut AppState, rasterizer: Option<&dyn PageRasterizer>) {
    let Some(rasterizer) = rasterizer else {
        renderer_unavailable();
        return;
    };

    match state.extract_selected(rasterizer) {
        Ok(paths) => {
            for path in paths {
                dialogs::info(
                    "Extraction successful",
                    &format!("Image extracted to {}", path.display()),
                );
            }
        }
        Err(e) => dialogs::error("Extraction failed", &e.to_string()),
    }
}

fn extract_all(state: &mut AppState, rasterizer: Option<&dyn PageRasterizer>) {
    let Some(rasterizer) = rasterizer else {
        renderer_unavailable();
        return;
    };

    if state.catalog.is_empty() {
        dialogs::error(
            "No regions",
            "Please load some file and create some regions first",
        );
        return;
    }

    match state.extract_all(rasterizer) {
        Ok(report) if report.failures.is_empty() => dialogs::info(
            "Extraction done",
            &format!("Successfully extracted {} regions", report.processed),
        ),
        Ok(report) => dialogs::error(
            "Extraction finished with failures",
            &format!(
                "{} extracted, {} failed:\n{}",
                report.processed,
                report.failures.len(),
                report.failures.join("\n")
            ),
        ),
        Err(e) => dialogs::error("Extraction failed", &e.to_string()),
    }
}

/// Confirmation gate, OCR sweep, spreadsheet save with a permission retry
/// loop, and the optional open-on-completion prompt. Everything here blocks
/// the UI for its duration.
fn run_ocr(state: &mut AppState, view: &mut UiState) {
    let folder = state.output_folder.clone();

    if !dialogs::confirm(
        "Run OCR",
        &format!(
            "Running OCR may take a while.\nThe folder {} will be processed.\nAre you sure you want to continue?",
            folder.display()
        ),
    ) {
        return;
    }

    let layout = if view.documents_as_columns {
        TableLayout::DocumentsAsColumns
    } else {
        TableLayout::RegionsAsColumns
    };

    let recognizer = state.recognizer();
    let rows = match tabulate::build_table(&folder, layout, &recognizer) {
        Ok(rows) => rows,
        Err(e) => {
            dialogs::error("OCR failed", &e.to_string());
            return;
        }
    };

    // A permission failure usually means the target file is still open in a
    // spreadsheet program; re-show the save dialog until it works or the
    // user gives up.
    let saved = loop {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Excel files", &["xlsx"])
            .set_file_name("OCR_results.xlsx")
            .save_file()
        else {
            return;
        };

        match spreadsheet::write_table(&rows, &path) {
            Ok(()) => break path,
            Err(e) if e.is_permission_denied() => dialogs::error(
                "Permission error",
                &format!("Please close the excel file before running OCR again. Error:\n{e}"),
            ),
            Err(e) => {
                dialogs::error("Could not save spreadsheet", &e.to_string());
                return;
            }
        }
    };

    if state.config.output.prompt_open_spreadsheet
        && dialogs::confirm(
            "OCR successfully finished",
            "Do you want to open the generated file?",
        )
    {
        open_in_default_app(&saved);
    }
}

fn renderer_unavailable() {
    dialogs::error(
        "PDF renderer unavailable",
        "libpdfium could not be loaded; place it next to the executable or install it system-wide.",
    );
}

fn open_in_default_app(path: &Path) {
    #[cfg(target_os = "windows")]
    let result = Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn();
    #[cfg(target_os = "macos")]
    let result = Command::new("open").arg(path).spawn();
    #[cfg(all(unix, not(target_os = "macos")))]
    let result = Command::new("xdg-open").arg(path).spawn();

    if let Err(e) = result {
        warn!("could not open {}: {e}", path.display());
    }
}
