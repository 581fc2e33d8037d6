//! Main application module

mod keyboard;
mod menus;
pub(crate) mod styles;

use std::path::Path;
use std::time::Duration;

use eframe::egui;

use crate::assets::MESH_EXTENSIONS;
use crate::i18n::t;
use crate::render::RenderBridge;
use crate::state::{AppSettings, AppState};
use crate::ui::render_modal::RenderModal;
use crate::ui::toolbar::ToolbarAction;
use crate::ui::{asset_panel, measurements, properties, status_bar, toolbar, watermark};
use crate::viewport::ViewportPanel;

/// Main application
pub struct StudioApp {
    state: AppState,
    viewport: ViewportPanel,
    render_modal: RenderModal,
    /// Render bridge for the endpoint it was built with
    bridge: Option<(String, RenderBridge)>,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl StudioApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::new(AppSettings::load());

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let last_font_size = state.settings.ui.font_size;
        let mut app = Self {
            state,
            viewport: ViewportPanel::new(),
            render_modal: RenderModal::default(),
            bridge: None,
            last_font_size,
        };
        app.ensure_bridge();
        app
    }

    /// (Re)build the render bridge when the configured endpoint changed
    fn ensure_bridge(&mut self) {
        let endpoint = self.state.settings.render.endpoint.clone();
        if self.bridge.as_ref().is_some_and(|(url, _)| *url == endpoint) {
            return;
        }
        if self.state.render.is_rendering() {
            return;
        }
        match RenderBridge::http(&endpoint) {
            Ok(bridge) => {
                tracing::info!("Render endpoint: {}", endpoint);
                self.bridge = Some((endpoint, bridge));
            }
            Err(e) => {
                tracing::error!("Cannot start render bridge: {}", e);
                self.state.set_status(e.to_string());
                self.bridge = None;
            }
        }
    }

    fn generate_render(&mut self) {
        self.ensure_bridge();
        let Some((_, bridge)) = &self.bridge else {
            return;
        };
        let capture = self.viewport.snapshot(&self.state);
        self.state.request_render(bridge, capture);
    }

    fn new_scene(&mut self) {
        self.state.reset_session();
        self.viewport.reset_session();
    }

    fn pick_and_upload(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title(t("menu.upload_title"))
            .add_filter("3D", MESH_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        self.upload(&path);
    }

    fn upload(&mut self, path: &Path) {
        if let Err(e) = self.state.upload_mesh(path) {
            tracing::warn!("Upload of {} failed: {}", path.display(), e);
            self.state.set_status(format!("{}: {e}", path.display()));
        }
    }

    fn pick_background(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title(t("menu.set_bg_title"))
            .add_filter("Image", &["png", "jpg", "jpeg"])
            .pick_file()
        else {
            return;
        };
        if let Err(e) = self.state.background.set_image(&path) {
            tracing::warn!("Background {} rejected: {}", path.display(), e);
            self.state.set_status(format!("{}: {e}", path.display()));
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        self.state.render.poll();
        if self.state.render.is_rendering() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ── Menu bar ──────────────────────────────────────────
        let mut menu_action = None;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menu_action = menus::file_menu(ui).or(menu_action);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::settings_menu(ui, &mut self.state);
            });
        });
        match menu_action {
            Some(menus::FileAction::NewScene) => self.new_scene(),
            Some(menus::FileAction::Upload) => self.pick_and_upload(),
            Some(menus::FileAction::SetBackground) => self.pick_background(),
            Some(menus::FileAction::ClearBackground) => self.state.background.clear_image(),
            None => {}
        }

        // ── Settings window ──────────────────────────────────
        if menus::settings_window(ctx, &mut self.state) {
            self.ensure_bridge();
        }

        // ── Toolbar ───────────────────────────────────────────
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| toolbar::show(ui, &mut self.state))
            .inner;
        if toolbar_action == Some(ToolbarAction::GenerateRender) {
            self.generate_render();
        }

        // ── Status bar ───────────────────────────────────────
        let measuring = self.viewport.is_measuring();
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state, measuring);
            });

        // ── Left panel: catalog + upload ─────────────────────
        if self.state.panels.assets {
            let upload = egui::SidePanel::left("asset_panel")
                .default_width(230.0)
                .width_range(160.0..=400.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| asset_panel::show(ui, &mut self.state))
                .inner;
            if upload {
                self.pick_and_upload();
            }
        }

        // ── Right panel: properties, measurements, watermark ─
        self.show_right_panel(ctx);

        // ── Render result / failure alert ────────────────────
        self.render_modal.show(ctx, &mut self.state);

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }
}

impl StudioApp {
    fn show_right_panel(&mut self, ctx: &egui::Context) {
        let panels = &self.state.panels;
        if !(panels.properties || panels.measurements || panels.watermark) {
            return;
        }

        egui::SidePanel::right("right_panel")
            .default_width(290.0)
            .width_range(200.0..=500.0)
            .resizable(true)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("right_scroll")
                    .show(ui, |ui| {
                        if self.state.panels.properties {
                            properties::show(ui, &mut self.state);
                            ui.add_space(8.0);
                        }
                        if self.state.panels.measurements {
                            measurements::show(ui, &mut self.state);
                            ui.add_space(8.0);
                        }
                        if self.state.panels.watermark {
                            watermark::show(ui, &mut self.state);
                        }
                    });
            });
    }
}
