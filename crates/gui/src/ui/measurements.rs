use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("meas.title"));
    ui.separator();

    if state.measurements.is_empty() {
        ui.weak(t("meas.none"));
        return;
    }

    let fmt = &state.settings.measurement;
    egui::Grid::new("measurement_list")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for (i, m) in state.measurements.items().iter().enumerate() {
                ui.label(format!("#{}", i + 1));
                ui.monospace(fmt.format(m.distance));
                ui.end_row();
            }
        });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(format!(
            "{}: {}",
            t("meas.total"),
            fmt.format(state.measurements.total_distance())
        ));
    });
    if ui.button(t("meas.clear")).clicked() {
        state.measurements.clear_all();
    }
}
