//! Watermark editor and render prompt

use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("wm.title"));
    ui.separator();

    let wm = &mut state.watermark;
    ui.checkbox(&mut wm.enabled, t("wm.enabled"));
    ui.add_enabled_ui(wm.enabled, |ui| {
        ui.horizontal(|ui| {
            ui.label(t("wm.text"));
            ui.text_edit_singleline(&mut wm.text);
        });
        ui.horizontal(|ui| {
            ui.label(t("wm.opacity"));
            let mut opacity = wm.opacity();
            if ui.add(egui::Slider::new(&mut opacity, 0.0..=1.0)).changed() {
                wm.set_opacity(opacity);
            }
        });
    });

    ui.add_space(8.0);
    ui.strong(t("render.prompt"));
    ui.add(
        egui::TextEdit::multiline(&mut state.render.prompt)
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );
}
