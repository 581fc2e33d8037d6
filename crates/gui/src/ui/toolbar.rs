//! Toolbar actions and UI

use egui::Ui;
use shared::{GeometryType, ObjectDraft, ToolMode};

use crate::i18n::t;
use crate::state::AppState;

/// Requests the toolbar cannot fulfil on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    GenerateRender,
}

// ── Public actions (callable from menus too) ─────────────────

pub fn action_add_primitive(state: &mut AppState, geometry: GeometryType) {
    state.add_object(ObjectDraft::primitive(geometry.display_name(), geometry));
}

pub fn tool_label(tool: ToolMode) -> &'static str {
    match tool {
        ToolMode::Select => t("tool.select"),
        ToolMode::Move => t("tool.move"),
        ToolMode::Rotate => t("tool.rotate"),
        ToolMode::Scale => t("tool.scale"),
        ToolMode::Measure => t("tool.measure"),
    }
}

fn primitive_label(geometry: GeometryType) -> &'static str {
    match geometry {
        GeometryType::Box => t("prim.box"),
        GeometryType::Sphere => t("prim.sphere"),
        GeometryType::Cylinder => t("prim.cylinder"),
    }
}

// ── UI ───────────────────────────────────────────────────────

pub fn show(ui: &mut Ui, state: &mut AppState) -> Option<ToolbarAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.weak(t("tb.tools"));
        for &tool in ToolMode::all() {
            if ui
                .selectable_label(state.tool == tool, tool_label(tool))
                .clicked()
            {
                state.set_tool(tool);
            }
        }

        ui.separator();
        ui.weak(t("tb.add"));
        for &geometry in GeometryType::all() {
            if ui.button(primitive_label(geometry)).clicked() {
                action_add_primitive(state, geometry);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let rendering = state.render.is_rendering();
            let label = if rendering {
                t("tb.rendering")
            } else {
                t("tb.render")
            };
            let button = egui::Button::new(egui::RichText::new(label).strong())
                .fill(crate::app::styles::ACCENT);
            if ui.add_enabled(!rendering, button).clicked() {
                action = Some(ToolbarAction::GenerateRender);
            }
            if rendering {
                ui.spinner();
            }
        });
    });

    action
}
