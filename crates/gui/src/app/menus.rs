//! Application menu bar and settings window

use eframe::egui;

use crate::i18n::{lang, set_lang, t, Lang};
use crate::state::{AppSettings, AppState};
use crate::viewport::ViewportPanel;

/// File menu commands that need more than the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    NewScene,
    Upload,
    SetBackground,
    ClearBackground,
}

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui) -> Option<FileAction> {
    let mut action = None;
    ui.menu_button(t("menu.file"), |ui| {
        let items = [
            ("menu.new", FileAction::NewScene),
            ("menu.upload", FileAction::Upload),
        ];
        for (key, item) in items {
            if ui.button(t(key)).clicked() {
                action = Some(item);
                ui.close_menu();
            }
        }
        ui.separator();
        if ui.button(t("menu.set_bg")).clicked() {
            action = Some(FileAction::SetBackground);
            ui.close_menu();
        }
        if ui.button(t("menu.clear_bg")).clicked() {
            action = Some(FileAction::ClearBackground);
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
    action
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.assets, t("menu.assets"));
        ui.checkbox(&mut state.panels.properties, t("menu.properties"));
        ui.checkbox(&mut state.panels.measurements, t("menu.measurements"));
        ui.checkbox(&mut state.panels.watermark, t("menu.watermark"));
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            if ui.selectable_label(lang() == Lang::Ru, "Русский").clicked() {
                set_lang(Lang::Ru);
                ui.close_menu();
            }
            if ui.selectable_label(lang() == Lang::En, "English").clicked() {
                set_lang(Lang::En);
                ui.close_menu();
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window. Returns true when settings were applied.
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) -> bool {
    let mut open = state.show_settings_window;
    let mut applied = false;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(400.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_render_settings(ui, state);
                show_grid_settings(ui, state);
                show_viewport_settings(ui, state);
                show_measurement_settings(ui, state);
                show_ui_settings(ui, state);
                applied = show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window &= open;
    applied
}

fn show_render_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.render"));
    ui.horizontal(|ui| {
        ui.label(t("settings.endpoint"));
        ui.text_edit_singleline(&mut state.settings.render.endpoint);
    });
    ui.label(t("settings.default_prompt"));
    ui.add(
        egui::TextEdit::multiline(&mut state.settings.render.default_prompt)
            .desired_rows(2)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(10.0);
}

fn show_grid_settings(ui: &mut egui::Ui, state: &mut AppState) {
    let grid = &mut state.settings.grid;
    ui.heading(t("settings.grid"));
    ui.checkbox(&mut grid.visible, t("settings.grid_visible"));

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_size"));
        ui.add(
            egui::DragValue::new(&mut grid.size)
                .speed(0.1)
                .range(0.1..=10.0),
        );
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.grid_range"));
        ui.add(egui::DragValue::new(&mut grid.range).speed(1).range(1..=50));
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.grid_opacity"));
        ui.add(egui::Slider::new(&mut grid.opacity, 0.0..=1.0));
    });
    ui.add_space(10.0);
}

fn color_row(ui: &mut egui::Ui, label: &str, rgb: &mut [u8; 3]) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.color_edit_button_srgb(rgb).changed()
    })
    .inner
}

fn show_viewport_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.viewport"));
    let viewport = &mut state.settings.viewport;
    if color_row(ui, t("settings.bg_color"), &mut viewport.background_color) {
        state.background.color = viewport.background_color;
    }
    color_row(ui, t("settings.sel_color"), &mut viewport.selection_color);
    color_row(ui, t("settings.meas_color"), &mut viewport.measurement_color);
    ui.checkbox(&mut viewport.show_axis_labels, t("settings.axes_labels"));
    ui.add_space(10.0);
}

fn show_measurement_settings(ui: &mut egui::Ui, state: &mut AppState) {
    let measurement = &mut state.settings.measurement;
    ui.heading(t("settings.measurement"));
    ui.horizontal(|ui| {
        ui.label(t("settings.precision"));
        ui.add(
            egui::DragValue::new(&mut measurement.precision)
                .speed(1.0)
                .range(0..=6),
        );
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.unit_suffix"));
        ui.add(egui::TextEdit::singleline(&mut measurement.unit_suffix).desired_width(60.0));
    });
    ui.label(format!("→ {}", measurement.format(1.0 / 3.0)));
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let mut applied = false;
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.settings.save();
            applied = true;
        }
        if ui.button(t("settings.reset")).clicked() {
            state.settings = AppSettings::default();
            state.background.color = state.settings.viewport.background_color;
            applied = true;
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
    applied
}
