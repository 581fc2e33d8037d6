//! Flat-shaded scene painting through egui's painter
//!
//! Triangles are projected on the CPU, sorted back to front and submitted as
//! one `egui::Mesh`. Shading matches the snapshot rasterizer.

use egui::{Color32, Pos2, Rect, Stroke};
use glam::Vec3;

use super::cache::MeshCache;
use super::camera::ArcBallCamera;
use super::gizmo::{gizmo_segments, GizmoAxis, GizmoKind};
use super::snapshot::{light_direction, shade_factor};
use crate::state::background::BackgroundState;
use crate::state::settings::GridSettings;
use crate::state::AppState;

/// Blend factor toward the selection color for the selected object
const SELECTION_TINT: f32 = 0.35;

struct ScreenTriangle {
    points: [Pos2; 3],
    depth: f32,
    color: Color32,
}

pub fn paint_background(
    painter: &egui::Painter,
    rect: Rect,
    background: &BackgroundState,
    texture: Option<&egui::TextureHandle>,
) {
    match texture {
        Some(tex) => {
            let uv = fill_uv(tex.size_vec2(), rect.size());
            painter.image(tex.id(), rect, uv, Color32::WHITE);
        }
        None => {
            let [r, g, b] = background.color;
            painter.rect_filled(rect, 0.0, Color32::from_rgb(r, g, b));
        }
    }
}

/// UV sub-rectangle that covers `target` without distortion (center crop)
fn fill_uv(image: egui::Vec2, target: egui::Vec2) -> Rect {
    if image.x <= 0.0 || image.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    }
    let image_aspect = image.x / image.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        let w = target_aspect / image_aspect;
        Rect::from_min_max(Pos2::new(0.5 - w / 2.0, 0.0), Pos2::new(0.5 + w / 2.0, 1.0))
    } else {
        let h = image_aspect / target_aspect;
        Rect::from_min_max(Pos2::new(0.0, 0.5 - h / 2.0), Pos2::new(1.0, 0.5 + h / 2.0))
    }
}

pub fn draw_grid(painter: &egui::Painter, rect: Rect, camera: &ArcBallCamera, settings: &GridSettings) {
    let alpha = (settings.opacity * 255.0) as u8;
    let grid_color = Color32::from_rgba_premultiplied(60, 60, 60, alpha);
    let stroke = Stroke::new(0.5, grid_color);

    let range = settings.range;
    let step = settings.size;
    let extent = range as f32 * step;

    for i in -range..=range {
        let f = i as f32 * step;

        // Lines along Z
        draw_line_3d(painter, rect, camera, Vec3::new(f, 0.0, -extent), Vec3::new(f, 0.0, extent), stroke);
        // Lines along X
        draw_line_3d(painter, rect, camera, Vec3::new(-extent, 0.0, f), Vec3::new(extent, 0.0, f), stroke);
    }
}

/// Paint every cached mesh, selected object tinted
pub fn paint_meshes(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    cache: &MeshCache,
    state: &AppState,
) {
    let eye = camera.eye_position();
    let light = light_direction(camera);
    let [sr, sg, sb] = state.settings.viewport.selection_color;
    let selection = [sr as f32 / 255.0, sg as f32 / 255.0, sb as f32 / 255.0];

    let mut triangles: Vec<ScreenTriangle> = Vec::new();

    for cached in cache.meshes() {
        let selected = state.selection.is_selected(&cached.id);
        let mesh = &cached.mesh;

        for [i0, i1, i2] in mesh.triangles() {
            let world = [mesh.position(i0), mesh.position(i1), mesh.position(i2)];
            let (Some(a), Some(b), Some(c)) = (
                camera.project(world[0], rect),
                camera.project(world[1], rect),
                camera.project(world[2], rect),
            ) else {
                continue;
            };

            let centroid = (world[0] + world[1] + world[2]) / 3.0;
            let shade = shade_factor(mesh.normal(i0), eye - centroid, light);
            let mut rgb = mesh.color(i0);
            if selected {
                for (channel, target) in rgb.iter_mut().zip(selection) {
                    *channel += (target - *channel) * SELECTION_TINT;
                }
            }

            triangles.push(ScreenTriangle {
                points: [a, b, c],
                depth: (centroid - eye).length_squared(),
                color: Color32::from_rgb(
                    to_byte(rgb[0] * shade),
                    to_byte(rgb[1] * shade),
                    to_byte(rgb[2] * shade),
                ),
            });
        }
    }

    // Painter's algorithm: farthest first
    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut out = egui::Mesh::default();
    for tri in &triangles {
        let base = out.vertices.len() as u32;
        for p in tri.points {
            out.colored_vertex(p, tri.color);
        }
        out.add_triangle(base, base + 1, base + 2);
    }
    if !out.is_empty() {
        painter.add(egui::Shape::mesh(out));
    }
}

pub fn draw_gizmo(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    kind: GizmoKind,
    center: Vec3,
    active: Option<GizmoAxis>,
) {
    for seg in gizmo_segments(kind, center) {
        let width = if active == Some(seg.axis) { 4.0 } else { 2.5 };
        draw_line_3d(painter, rect, camera, seg.start, seg.end, Stroke::new(width, seg.color));
    }
    if let Some(c) = camera.project(center, rect) {
        painter.circle_filled(c, 3.0, Color32::WHITE);
    }
}

pub fn draw_line_3d(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    a: Vec3,
    b: Vec3,
    stroke: Stroke,
) {
    if let (Some(pa), Some(pb)) = (camera.project(a, rect), camera.project(b, rect)) {
        if rect.contains(pa) || rect.contains(pb) {
            painter.line_segment([pa, pb], stroke);
        }
    }
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
