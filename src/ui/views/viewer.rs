//! Viewer canvas: the rendered page with the focused region overlay, plus
//! page navigation and discrete zoom controls.

use eframe::egui::{self, Color32, CursorIcon, Pos2, Rect, Sense, Stroke, Vec2};
use tracing::error;

use crate::app::AppState;
use crate::document::PageRasterizer;
use crate::geometry::{CursorHint, DragOutcome, Point};
use crate::ui::app::{PageTexture, UiState};
use crate::viewer::ZOOM_STEPS;

const REGION_STROKE: Stroke = Stroke {
    width: 3.0,
    color: Color32::RED,
};

pub fn render_canvas(
    ui: &mut egui::Ui,
    state: &mut AppState,
    view: &mut UiState,
    rasterizer: Option<&dyn PageRasterizer>,
) {
    let canvas_rect = ui.available_rect_before_wrap();
    ui.painter().rect_filled(canvas_rect, 0.0, Color32::BLACK);

    let Some(doc_index) = state.documents.selected_index() else {
        view.page_texture = None;
        return;
    };
    let page_number = state.page.current();

    ensure_page_texture(ui.ctx(), state, view, rasterizer, doc_index, page_number);
    let Some(texture) = view
        .page_texture
        .as_ref()
        .filter(|t| t.document == doc_index && t.page == page_number)
    else {
        return;
    };

    let scale = state.zoom.scale();
    let image_origin = canvas_rect.min;
    let image_rect = Rect::from_min_size(image_origin, texture.handle.size_vec2() * scale);

    ui.painter().image(
        texture.handle.id(),
        image_rect,
        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
        Color32::WHITE,
    );

    let response = ui.allocate_rect(canvas_rect, Sense::click_and_drag());

    // Mouse wheel steps the zoom table, one entry per notch.
    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll > 0.0 {
            state.zoom.zoom_in();
        } else if scroll < 0.0 {
            state.zoom.zoom_out();
        }
    }

    interact_with_focused_region(ui, state, view, &response, image_origin, scale, page_number);
}

/// Hover, drag, and draw the focused region when it lives on this page.
/// Only the focused region is drawn at all.
fn interact_with_focused_region(
    ui: &mut egui::Ui,
    state: &mut AppState,
    view: &mut UiState,
    response: &egui::Response,
    image_origin: Pos2,
    scale: f32,
    page_number: u32,
) {
    let Some(index) = state.catalog.focused() else {
        return;
    };
    let Some(region) = state.catalog.get_mut(index) else {
        return;
    };
    if region.page != page_number || !region.selected {
        return;
    }

    let region_rect = Rect::from_min_size(
        image_origin + Vec2::new(region.shape.origin.x, region.shape.origin.y) * scale,
        Vec2::new(region.shape.size.0, region.shape.size.1) * scale,
    );
    ui.painter().rect_stroke(region_rect, 0.0, REGION_STROKE);

    let Some(pointer) = response.hover_pos().or_else(|| response.interact_pointer_pos()) else {
        if response.drag_stopped() {
            view.dragging_region = false;
        }
        return;
    };

    let page_pos = Point::new(
        (pointer.x - image_origin.x) / scale,
        (pointer.y - image_origin.y) / scale,
    );
    let screen_pos = Point::new(pointer.x, pointer.y);

    // The hovered zone is frozen for the duration of a drag.
    if !view.dragging_region && region.shape.hit(page_pos) {
        let hint = region.shape.hover(page_pos);
        ui.ctx().set_cursor_icon(cursor_icon(hint));
    }

    if response.drag_started() && region.shape.hit(page_pos) {
        view.dragging_region = true;
        region.shape.begin_drag(screen_pos);
    }

    if response.dragged() && view.dragging_region {
        match region.shape.drag(screen_pos, region.selected) {
            DragOutcome::Move => {
                // Interior drags track the pointer in page space.
                let delta = response.drag_delta() / scale;
                region.shape.translate(Point::new(delta.x, delta.y));
            }
            DragOutcome::Resized | DragOutcome::Ignored => {}
        }
    }

    if response.drag_stopped() {
        view.dragging_region = false;
    }
}

fn cursor_icon(hint: CursorHint) -> CursorIcon {
    match hint {
        CursorHint::Arrow => CursorIcon::Default,
        CursorHint::ResizeHorizontal => CursorIcon::ResizeHorizontal,
        CursorHint::ResizeVertical => CursorIcon::ResizeVertical,
        CursorHint::ResizeNwSe => CursorIcon::ResizeNwSe,
        CursorHint::ResizeNeSw => CursorIcon::ResizeNeSw,
    }
}

/// Rasterize and upload the displayed page when the (document, page) key
/// changes. Failures are remembered so they are not retried every frame.
fn ensure_page_texture(
    ctx: &egui::Context,
    state: &mut AppState,
    view: &mut UiState,
    rasterizer: Option<&dyn PageRasterizer>,
    doc_index: usize,
    page_number: u32,
) {
    if view
        .page_texture
        .as_ref()
        .is_some_and(|t| t.document == doc_index && t.page == page_number)
    {
        return;
    }

    let Some(rasterizer) = rasterizer else {
        view.page_texture = None;
        return;
    };
    let Some(document) = state.documents.selected_mut() else {
        view.page_texture = None;
        return;
    };
    if view
        .render_failure
        .as_ref()
        .is_some_and(|(path, page)| path == document.path() && *page == page_number)
    {
        return;
    }

    view.page_texture = None;
    match document.page(page_number, rasterizer) {
        Ok(image) => {
            let size = [image.width() as usize, image.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
            let handle = ctx.load_texture("page", color_image, egui::TextureOptions::LINEAR);
            view.page_texture = Some(PageTexture {
                document: doc_index,
                page: page_number,
                handle,
            });
            view.render_failure = None;
        }
        Err(e) => {
            error!("could not display page {page_number}: {e}");
            view.render_failure = Some((document.path().to_path_buf(), page_number));
        }
    }
}

pub fn render_viewer_controls(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let page_count = state.documents.selected().map(|d| d.page_count());

        if ui.button("|<").clicked() && page_count.is_some() {
            state.page.first();
        }
        if ui.button("<").clicked() && page_count.is_some() {
            state.page.previous();
        }
        match page_count {
            Some(count) => ui.label(format!("{}/{}", state.page.current(), count)),
            None => ui.label("0/0"),
        };
        if ui.button(">").clicked() {
            if let Some(count) = page_count {
                state.page.next(count);
            }
        }
        if ui.button(">|").clicked() {
            if let Some(count) = page_count {
                state.page.last(count);
            }
        }

        ui.separator();

        let mut step = state.zoom.step_index();
        let slider = egui::Slider::new(&mut step, 0..=ZOOM_STEPS.len() - 1).show_value(false);
        if ui.add(slider).changed() {
            if let Err(e) = state.zoom.set(ZOOM_STEPS[step]) {
                crate::ui::dialogs::error("Error", &e.to_string());
            }
        }
        ui.label(format!("Zoom: {}%", state.zoom.percent()));
    });
}
