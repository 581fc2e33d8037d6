//! Properties panel for the selected object

use egui::Ui;
use shared::{ObjectPatch, SceneObject};

use crate::i18n::t;
use crate::state::scene::{object_display_name, object_kind_label};
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("prop.title"));
    ui.separator();

    let Some(selected_id) = state.selection.primary().cloned() else {
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("prop.select_object"));
            ui.weak(t("prop.to_view"));
        });
        return;
    };

    let Some(object) = state.scene.get(&selected_id) else {
        ui.weak(t("prop.not_found"));
        return;
    };

    if let Some(patch) = edit_object(ui, object) {
        state.update_object(&selected_id, patch);
    }
}

/// Draw editors for one object; returns a patch with whatever changed
fn edit_object(ui: &mut Ui, object: &SceneObject) -> Option<ObjectPatch> {
    let mut patch = ObjectPatch::default();
    let mut changed = false;

    ui.horizontal(|ui| {
        ui.strong(object_display_name(object));
    });
    ui.add_space(4.0);

    egui::Grid::new("object_props")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label(format!("{}:", t("prop.name")));
            let mut name = object.name.clone();
            if ui.text_edit_singleline(&mut name).changed() {
                patch.name = Some(name);
                changed = true;
            }
            ui.end_row();

            ui.label(format!("{}:", t("prop.kind")));
            ui.label(object_kind_label(object));
            ui.end_row();

            ui.label(format!("{}:", t("prop.position")));
            let mut position = object.transform.position;
            if vec3_editor(ui, &mut position, 0.05, None) {
                patch.position = Some(position);
                changed = true;
            }
            ui.end_row();

            ui.label(format!("{}:", t("prop.rotation")));
            let mut degrees = object.transform.rotation.map(f64::to_degrees);
            if vec3_editor(ui, &mut degrees, 1.0, None) {
                patch.rotation = Some(degrees.map(f64::to_radians));
                changed = true;
            }
            ui.end_row();

            ui.label(format!("{}:", t("prop.scale")));
            let mut scale = object.transform.scale;
            if vec3_editor(ui, &mut scale, 0.01, Some(0.01..=100.0)) {
                patch.scale = Some(scale);
                changed = true;
            }
            ui.end_row();

            ui.label(format!("{}:", t("prop.color")));
            let [r, g, b] = object.color;
            let mut color = egui::Color32::from_rgb(r, g, b);
            if ui.color_edit_button_srgba(&mut color).changed() {
                patch.color = Some([color.r(), color.g(), color.b()]);
                changed = true;
            }
            ui.end_row();
        });

    changed.then_some(patch)
}

fn vec3_editor(
    ui: &mut Ui,
    values: &mut [f64; 3],
    speed: f64,
    range: Option<std::ops::RangeInclusive<f64>>,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        for v in values.iter_mut() {
            let mut drag = egui::DragValue::new(v).speed(speed).max_decimals(3);
            if let Some(r) = range.clone() {
                drag = drag.range(r);
            }
            changed |= ui.add(drag).changed();
        }
    });
    changed
}
