use egui::Ui;
use shared::ToolMode;

use crate::i18n::t;
use crate::state::{object_display_name, AppState};
use crate::ui::toolbar::tool_label;

pub fn show(ui: &mut Ui, state: &AppState, measuring: bool) {
    ui.horizontal(|ui| {
        ui.weak(format!("{}: {}", t("status.objects"), state.scene.len()));
        if let Some(obj) = state.selection.primary().and_then(|id| state.scene.get(id)) {
            ui.weak(format!("{}: {}", t("status.selected"), object_display_name(obj)));
        }

        ui.separator();

        let hint = match state.tool {
            ToolMode::Select => t("hint.select"),
            ToolMode::Move | ToolMode::Rotate | ToolMode::Scale => {
                if state.selection.is_empty() {
                    t("hint.no_selection")
                } else {
                    t("hint.transform")
                }
            }
            ToolMode::Measure if measuring => t("hint.measure_end"),
            ToolMode::Measure => t("hint.measure_start"),
        };
        ui.colored_label(
            egui::Color32::YELLOW,
            format!("[{}] {hint}", tool_label(state.tool)),
        );

        if let Some(msg) = &state.status {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(255, 140, 100), msg);
        }

        if state.render.is_rendering() {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(255, 200, 100), t("status.rendering"));
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("Studio3D v", env!("CARGO_PKG_VERSION")));
        });
    });
}
