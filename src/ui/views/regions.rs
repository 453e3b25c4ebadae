//! Regions panel: create, rename, remove, and persist region sets.

use eframe::egui;

use crate::app::AppState;
use crate::ui::app::{RenameDialog, UiState};
use crate::ui::dialogs;

pub fn render_regions_panel(ui: &mut egui::Ui, state: &mut AppState, view: &mut UiState) {
    ui.horizontal(|ui| {
        if ui.button("+").clicked() {
            if let Err(e) = state.create_region() {
                dialogs::error("No file selected", &e.to_string());
            }
        }
        if ui.button("-").clicked() {
            if let Some(index) = state.catalog.focused() {
                state.catalog.remove(index);
            }
        }
    });

    // Deferred mutations so the list iteration stays immutable.
    let mut to_focus = None;
    let mut to_remove = None;
    let mut to_rename = None;

    egui::ScrollArea::vertical()
        .id_salt("regions_list")
        .max_height(160.0)
        .show(ui, |ui| {
            for (index, region) in state.catalog.iter().enumerate() {
                let label = format!("{} (p. {})", region.name, region.page);
                let response = ui.selectable_label(region.selected, label);
                if response.clicked() {
                    to_focus = Some(index);
                }
                response.context_menu(|ui| {
                    if ui.button("Rename").clicked() {
                        to_rename = Some(index);
                        ui.close_menu();
                    }
                    if ui.button("Remove").clicked() {
                        to_remove = Some(index);
                        ui.close_menu();
                    }
                });
            }
        });

    if let Some(index) = to_focus {
        state.focus_region(index);
    }
    if let Some(index) = to_remove {
        state.catalog.remove(index);
    }
    if let Some(index) = to_rename {
        view.rename = Some(RenameDialog {
            index,
            text: state
                .catalog
                .get(index)
                .map(|r| r.name.clone())
                .unwrap_or_default(),
        });
    }

    ui.horizontal(|ui| {
        if ui.button("Delete all").clicked()
            && !state.catalog.is_empty()
            && dialogs::confirm("Delete all regions", "Remove every region?")
        {
            state.catalog.remove_all();
        }
        if ui.button("Save").clicked() {
            save_regions(state);
        }
        if ui.button("Load").clicked() {
            load_regions(state);
        }
    });

    render_rename_dialog(ui.ctx(), state, view);
}

fn save_regions(state: &mut AppState) {
    if state.catalog.is_empty() {
        dialogs::error("No regions", "There are no regions to save");
        return;
    }

    let Some(path) = rfd::FileDialog::new()
        .add_filter("Region set", &["rects"])
        .set_file_name("regions.rects")
        .save_file()
    else {
        return;
    };

    match state.save_regions(&path) {
        Ok(count) => dialogs::info("Save successful", &format!("{count} regions saved successfully")),
        Err(e) => dialogs::error("Save failed", &format!("{e:#}")),
    }
}

fn load_regions(state: &mut AppState) {
    if !state.catalog.is_empty()
        && !dialogs::confirm(
            "Load regions",
            "This will delete all the current regions, are you sure?",
        )
    {
        return;
    }

    let Some(path) = rfd::FileDialog::new()
        .add_filter("Region set", &["rects"])
        .pick_file()
    else {
        return;
    };

    if let Err(e) = state.load_regions(&path) {
        dialogs::error("Load failed", &format!("{e:#}"));
    }
}

fn render_rename_dialog(ctx: &egui::Context, state: &mut AppState, view: &mut UiState) {
    let Some(dialog) = &mut view.rename else {
        return;
    };

    let mut open = true;
    let mut done = false;

    egui::Window::new("Rename region")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label("New name:");
            ui.text_edit_singleline(&mut dialog.text);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    state.catalog.rename(dialog.index, dialog.text.clone());
                    done = true;
                }
                if ui.button("Cancel").clicked() {
                    done = true;
                }
            });
        });

    if done || !open {
        view.rename = None;
    }
}
