//! 3D viewport panel: camera controls, gizmo drags, click dispatch and painting

mod overlays;
mod renderer;

pub use studio_gui_lib::viewport::{cache, camera, gizmo, interaction, mesh, picking, snapshot};

use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;
use crate::ui::render_modal::draw_watermark_preview;
use cache::MeshCache;
use camera::ArcBallCamera;
use gizmo::{compute_drag_delta, compute_rotation_delta, GizmoDrag, GizmoKind, GizmoState};
use interaction::{hit_test, object_center, HitTarget, InteractionState};

/// 3D viewport panel
pub struct ViewportPanel {
    camera: ArcBallCamera,
    cache: MeshCache,
    gizmo_state: GizmoState,
    interaction: InteractionState,
    /// Pixel size of the last laid-out frame; `None` until the first layout
    pixel_size: Option<(u32, u32)>,
    background_texture: Option<(u64, egui::TextureHandle)>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
            cache: MeshCache::new(),
            gizmo_state: GizmoState::default(),
            interaction: InteractionState::default(),
            pixel_size: None,
            background_texture: None,
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
    }

    /// Drop the pending measurement start point, if any
    pub fn cancel_pending(&mut self) {
        self.interaction.cancel_pending();
    }

    pub fn is_measuring(&self) -> bool {
        self.interaction.pending_start().is_some()
    }

    /// Forget per-scene caches after "New scene"
    pub fn reset_session(&mut self) {
        self.cache.invalidate();
        self.gizmo_state.end_drag();
        self.interaction.cancel_pending();
    }

    /// PNG capture of the current frame, or `None` when the viewport has not been laid out
    pub fn snapshot(&mut self, state: &AppState) -> Option<Vec<u8>> {
        let (width, height) = self.pixel_size?;
        self.cache.sync(&state.scene, &state.assets);
        let png = snapshot::capture(&self.cache, &self.camera, &state.background, width, height)
            .and_then(|image| snapshot::encode_png(&image));
        match png {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!("Viewport capture failed: {}", e);
                None
            }
        }
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(
            ui.available_size(),
            egui::Sense::click_and_drag(),
        );

        let ppp = ui.ctx().pixels_per_point();
        let width = (rect.width() * ppp).round() as u32;
        let height = (rect.height() * ppp).round() as u32;
        self.pixel_size = (width > 0 && height > 0).then_some((width, height));

        self.interaction.sync_tool(state.tool);
        self.cache.sync(&state.scene, &state.assets);

        // ── Gizmo and camera controls ─────────────────────────────
        self.handle_gizmo_and_camera(&response, ui, rect, state);

        // ── Scroll zoom ─────────────────────────────
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }

        // Gizmo edits above may have changed the scene
        self.cache.sync(&state.scene, &state.assets);

        // ── Click dispatch ──────────────────────────
        self.handle_click(&response, ui, rect, state);

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.refresh_background_texture(ui.ctx(), state);
        self.paint(ui, rect, state, response.hover_pos());
    }

    fn handle_gizmo_and_camera(
        &mut self,
        response: &egui::Response,
        ui: &Ui,
        rect: egui::Rect,
        state: &mut AppState,
    ) {
        // ── Gizmo drag handling ─────────────────────────────────
        if self.gizmo_state.dragging {
            let kind = GizmoKind::for_tool(state.tool);
            if let (true, Some(kind), Some(axis), Some(obj_id)) = (
                response.dragged_by(egui::PointerButton::Primary),
                kind,
                self.gizmo_state.active_axis,
                self.gizmo_state.drag_object_id.clone(),
            ) {
                if let Some(center) = state.scene.get(&obj_id).map(object_center) {
                    let delta = response.drag_delta();
                    let drag = match kind {
                        GizmoKind::Translate => {
                            let amount = compute_drag_delta(&self.camera, center, axis, delta, rect);
                            GizmoDrag::Translate(axis.direction() * amount)
                        }
                        GizmoKind::Scale => GizmoDrag::Scale {
                            axis,
                            amount: compute_drag_delta(&self.camera, center, axis, delta, rect),
                        },
                        GizmoKind::Rotate => {
                            let current = response.interact_pointer_pos().unwrap_or(rect.center());
                            GizmoDrag::Rotate {
                                axis,
                                angle: compute_rotation_delta(
                                    &self.camera,
                                    center,
                                    axis,
                                    current - delta,
                                    current,
                                    rect,
                                ),
                            }
                        }
                    };
                    state.scene.apply_gizmo_drag(&obj_id, drag);
                }
            }
            // End drag when button released or the tool changed under it
            if response.drag_stopped()
                || !response.dragged_by(egui::PointerButton::Primary)
                || kind.is_none()
            {
                self.gizmo_state.end_drag();
            }
            return;
        }

        // ── Gizmo drag start on LMB drag ───────────────────
        if response.drag_started_by(egui::PointerButton::Primary) && !ui.input(|i| i.modifiers.alt) {
            let pointer_pos = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(pos) = pointer_pos {
                let ray = self.camera.screen_ray(pos, rect);
                if let HitTarget::Gizmo(axis) = hit_test(&ray, state, &self.cache) {
                    if let Some(id) = state.selection.primary().cloned() {
                        self.gizmo_state.begin_drag(axis, id);
                        return;
                    }
                }
            }
        }

        // ── Camera controls (only when not dragging gizmo) ──
        if response.dragged_by(egui::PointerButton::Middle)
            || response.dragged_by(egui::PointerButton::Primary)
        {
            let delta = response.drag_delta();
            self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
        }

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(delta.x * 0.01, delta.y * 0.01);
        }
    }

    fn handle_click(
        &mut self,
        response: &egui::Response,
        ui: &Ui,
        rect: egui::Rect,
        state: &mut AppState,
    ) {
        if !response.clicked() || ui.input(|i| i.modifiers.alt) || self.gizmo_state.dragging {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };

        let ray = self.camera.screen_ray(pos, rect);
        let target = hit_test(&ray, state, &self.cache);
        self.interaction.dispatch(state, target);
    }

    fn refresh_background_texture(&mut self, ctx: &egui::Context, state: &AppState) {
        let revision = state.background.revision();
        if self
            .background_texture
            .as_ref()
            .is_some_and(|(rev, _)| *rev == revision)
        {
            return;
        }
        self.background_texture = state.background.image().map(|img| {
            let size = [img.pixels.width() as usize, img.pixels.height() as usize];
            let color = egui::ColorImage::from_rgba_unmultiplied(size, img.pixels.as_raw());
            let tex = ctx.load_texture("viewport-background", color, egui::TextureOptions::LINEAR);
            (revision, tex)
        });
    }

    fn paint(&self, ui: &Ui, rect: egui::Rect, state: &AppState, hover: Option<egui::Pos2>) {
        let painter = ui.painter_at(rect);

        renderer::paint_background(
            &painter,
            rect,
            &state.background,
            self.background_texture.as_ref().map(|(_, tex)| tex),
        );
        if state.settings.grid.visible {
            renderer::draw_grid(&painter, rect, &self.camera, &state.settings.grid);
        }
        overlays::draw_axis_labels(&painter, rect, &self.camera, state.settings.viewport.show_axis_labels);

        renderer::paint_meshes(&painter, rect, &self.camera, &self.cache, state);

        // ── Gizmo ───────────────────────────────────────────
        let selected = state.selection.primary().and_then(|id| state.scene.get(id));
        if let (Some(kind), Some(object)) = (GizmoKind::for_tool(state.tool), selected) {
            renderer::draw_gizmo(
                &painter,
                rect,
                &self.camera,
                kind,
                object_center(object),
                self.gizmo_state.active_axis,
            );
        }

        // ── Overlays ─────────────────────────────────────
        overlays::draw_measurements(
            &painter,
            rect,
            &self.camera,
            state.measurements.items(),
            &state.settings.measurement,
            state.settings.viewport.measurement_color,
        );
        if let Some(start) = self.interaction.pending_start() {
            overlays::draw_pending_marker(&painter, rect, &self.camera, start, hover);
        }

        draw_watermark_preview(&painter, rect, &state.watermark);
        overlays::draw_camera_info(&painter, rect, &self.camera);

        // Navigation hint
        if state.scene.is_empty() {
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 20.0),
                egui::Align2::CENTER_BOTTOM,
                t("status.nav_hint"),
                egui::FontId::proportional(11.0),
                egui::Color32::from_rgb(100, 100, 110),
            );
        }
    }
}
