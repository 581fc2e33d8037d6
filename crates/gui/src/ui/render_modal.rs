//! Render result window and failure alert

use eframe::egui;
use shared::{WatermarkConfig, RENDER_FILE_NAME};

use crate::i18n::t;
use crate::state::AppState;

/// Holds the decoded texture of the current render result
#[derive(Default)]
pub struct RenderModal {
    texture: Option<(u64, egui::TextureHandle)>,
}

impl RenderModal {
    pub fn show(&mut self, ctx: &egui::Context, state: &mut AppState) {
        self.show_alert(ctx, state);
        self.show_result(ctx, state);
    }

    fn show_alert(&self, ctx: &egui::Context, state: &mut AppState) {
        let Some(message) = state.render.alert().map(str::to_owned) else {
            return;
        };
        egui::Window::new(t("render.error_title"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(6.0);
                if ui.button(t("render.ok")).clicked() {
                    state.render.dismiss_alert();
                }
            });
    }

    fn show_result(&mut self, ctx: &egui::Context, state: &mut AppState) {
        if !state.render.show_result {
            return;
        }
        let Some(texture) = self.texture_for(ctx, state) else {
            return;
        };

        let mut open = true;
        let mut download = false;
        egui::Window::new(t("render.result"))
            .open(&mut open)
            .resizable(true)
            .default_width(640.0)
            .show(ctx, |ui| {
                let size = texture.size_vec2();
                let width = ui.available_width().min(size.x).max(64.0);
                let display = egui::vec2(width, width * size.y / size.x.max(1.0));
                let response = ui.add(egui::Image::new((texture.id(), display)));
                draw_watermark_preview(ui.painter(), response.rect, &state.watermark);

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button(t("render.download")).clicked() {
                        download = true;
                    }
                    if ui.button(t("render.close")).clicked() {
                        state.render.show_result = false;
                    }
                });
            });
        if !open {
            state.render.show_result = false;
        }
        if download {
            save_result(state);
        }
    }

    fn texture_for(&mut self, ctx: &egui::Context, state: &mut AppState) -> Option<egui::TextureHandle> {
        let revision = state.render.revision();
        if let Some((rev, tex)) = &self.texture {
            if *rev == revision {
                return Some(tex.clone());
            }
        }

        let result = state.render.result()?;
        match image::load_from_memory(&result.bytes) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                let tex = ctx.load_texture("render-result", color, egui::TextureOptions::LINEAR);
                self.texture = Some((revision, tex.clone()));
                Some(tex)
            }
            Err(e) => {
                tracing::error!("Cannot decode render result: {}", e);
                state.render.show_result = false;
                state.set_status(format!("{e}"));
                None
            }
        }
    }
}

/// Bottom-right watermark text, as it will appear on the final image
pub fn draw_watermark_preview(painter: &egui::Painter, rect: egui::Rect, watermark: &WatermarkConfig) {
    let Some(text) = watermark.request_text() else {
        return;
    };
    let alpha = (watermark.opacity() * 255.0).round() as u8;
    let font = egui::FontId::proportional((rect.height() * 0.04).clamp(10.0, 28.0));
    let pos = rect.right_bottom() - egui::vec2(10.0, 8.0);
    painter.text(
        pos + egui::vec2(1.0, 1.0),
        egui::Align2::RIGHT_BOTTOM,
        &text,
        font.clone(),
        egui::Color32::from_black_alpha(alpha / 2),
    );
    painter.text(
        pos,
        egui::Align2::RIGHT_BOTTOM,
        text,
        font,
        egui::Color32::from_white_alpha(alpha),
    );
}

fn save_result(state: &mut AppState) {
    let Some(result) = state.render.result() else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title(t("render.download_title"))
        .add_filter("PNG", &["png"])
        .set_file_name(RENDER_FILE_NAME)
        .save_file()
    else {
        return;
    };
    if let Err(e) = result.save_to(&path) {
        tracing::error!("Failed to save render: {e}");
        state.set_status(format!("{}: {e}", path.display()));
    }
}
