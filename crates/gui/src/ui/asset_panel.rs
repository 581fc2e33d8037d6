//! Left panel: parts catalog, mesh upload and the object list

use egui::Ui;

use crate::i18n::t;
use crate::state::scene::object_kind_label;
use crate::state::{AppState, PARTS};

/// Returns true when the user asked to upload a mesh file
pub fn show(ui: &mut Ui, state: &mut AppState) -> bool {
    let mut upload = false;

    ui.heading(t("assets.title"));
    ui.separator();

    for part in PARTS {
        let mut checked = state.catalog.is_selected(part.id);
        ui.horizontal(|ui| {
            if ui.checkbox(&mut checked, part.name).changed() {
                state.catalog.toggle(part.id);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(part.size_label);
            });
        });
    }

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let count = state.catalog.selected_count();
        let label = format!("{} ({count})", t("assets.assemble"));
        if ui.add_enabled(count > 0, egui::Button::new(label)).clicked() {
            state.assemble_selected_parts();
        }
        if ui
            .add_enabled(count > 0, egui::Button::new(t("assets.clear")))
            .clicked()
        {
            state.catalog.clear();
        }
    });

    ui.add_space(8.0);
    ui.separator();
    if ui.button(t("assets.upload")).clicked() {
        upload = true;
    }
    ui.weak(t("assets.formats"));

    ui.add_space(8.0);
    ui.separator();
    ui.strong(t("assets.scene"));

    if state.scene.is_empty() {
        ui.weak(t("assets.empty"));
        return upload;
    }

    egui::ScrollArea::vertical()
        .id_salt("scene_objects")
        .show(ui, |ui| {
            let mut clicked = None;
            for object in state.scene.objects() {
                let selected = state.selection.is_selected(&object.id);
                let text = format!("[{}] {}", object_kind_label(object), object.name);
                if ui.selectable_label(selected, text).clicked() {
                    clicked = Some(object.id.clone());
                }
            }
            if let Some(id) = clicked {
                state.selection.select(id);
            }
        });

    upload
}
