//! Viewport overlay drawing (axis labels, measurements, watermark preview)

use egui::{Color32, Painter, Stroke};
use glam::Vec3;
use shared::Measurement;

use super::camera::ArcBallCamera;
use super::renderer::draw_line_3d;
use crate::state::settings::MeasurementSettings;

/// Draw axis lines with labels at their ends
pub fn draw_axis_labels(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera, labels: bool) {
    let axes = [
        (Vec3::X, "X", Color32::from_rgb(220, 70, 70)),
        (Vec3::Y, "Y", Color32::from_rgb(70, 200, 70)),
        (Vec3::Z, "Z", Color32::from_rgb(70, 110, 220)),
    ];

    for (dir, label, color) in axes {
        draw_line_3d(painter, rect, camera, Vec3::ZERO, dir * 0.75, Stroke::new(1.5, color));
        if !labels {
            continue;
        }
        if let Some(screen) = camera.project(dir * 0.85, rect) {
            if rect.contains(screen) {
                painter.text(
                    screen,
                    egui::Align2::LEFT_BOTTOM,
                    label,
                    egui::FontId::monospace(12.0),
                    color,
                );
            }
        }
    }
}

/// Completed measurements: a line, two end dots and a distance label
pub fn draw_measurements(
    painter: &Painter,
    rect: egui::Rect,
    camera: &ArcBallCamera,
    measurements: &[Measurement],
    settings: &MeasurementSettings,
    color: [u8; 3],
) {
    let color = Color32::from_rgb(color[0], color[1], color[2]);
    let stroke = Stroke::new(2.0, color);

    for m in measurements {
        let (start, end) = (to_vec3(m.start), to_vec3(m.end));
        let (Some(a), Some(b)) = (camera.project(start, rect), camera.project(end, rect)) else {
            continue;
        };
        painter.line_segment([a, b], stroke);
        painter.circle_filled(a, 3.5, color);
        painter.circle_filled(b, 3.5, color);

        if let Some(mid) = camera.project(to_vec3(m.midpoint()), rect) {
            let galley = painter.layout_no_wrap(
                settings.format(m.distance),
                egui::FontId::monospace(12.0),
                Color32::BLACK,
            );
            let label_rect = egui::Rect::from_center_size(
                mid - egui::vec2(0.0, 12.0),
                galley.size() + egui::vec2(8.0, 4.0),
            );
            painter.rect_filled(label_rect, 3.0, color);
            painter.galley(label_rect.min + egui::vec2(4.0, 2.0), galley, Color32::BLACK);
        }
    }
}

/// Marker for the first point of an unfinished measurement
pub fn draw_pending_marker(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera, point: Vec3, hover: Option<egui::Pos2>) {
    let Some(p) = camera.project(point, rect) else {
        return;
    };
    let color = Color32::from_rgb(255, 230, 80);
    painter.circle_stroke(p, 6.0, Stroke::new(2.0, color));
    painter.circle_filled(p, 2.5, color);

    if let Some(h) = hover.filter(|h| rect.contains(*h)) {
        painter.line_segment([p, h], Stroke::new(1.0, color.gamma_multiply(0.6)));
    }
}

pub fn draw_camera_info(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera) {
    let overlay_rect = egui::Rect::from_min_size(
        egui::pos2(rect.right() - 140.0, rect.top() + 4.0),
        egui::vec2(136.0, 44.0),
    );
    painter.rect_filled(
        overlay_rect,
        4.0,
        Color32::from_rgba_premultiplied(0, 0, 0, 140),
    );
    painter.text(
        overlay_rect.min + egui::vec2(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        format!(
            "Dist: {:.1}\nYaw: {:.0}  Pitch: {:.0}",
            camera.distance,
            camera.yaw.to_degrees(),
            camera.pitch.to_degrees(),
        ),
        egui::FontId::monospace(10.0),
        Color32::from_rgb(160, 160, 170),
    );
}

fn to_vec3(p: [f64; 3]) -> Vec3 {
    Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32)
}
