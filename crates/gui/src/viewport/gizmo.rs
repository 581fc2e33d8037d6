use glam::Vec3;
use shared::{ObjectId, ToolMode, Transform};

use super::camera::ArcBallCamera;
use super::picking::Ray;

/// Length of translate/scale axis handles
pub const GIZMO_LENGTH: f32 = 1.5;
/// Radius of rotate rings
pub const RING_RADIUS: f32 = 1.2;
/// Smallest scale a drag may produce on any axis
pub const MIN_SCALE: f64 = 0.01;

const HIT_THRESHOLD: f32 = 0.15;
const RING_SEGMENTS: usize = 48;

/// Which axis a gizmo handle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    pub const ALL: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    pub fn direction(self) -> Vec3 {
        match self {
            GizmoAxis::X => Vec3::X,
            GizmoAxis::Y => Vec3::Y,
            GizmoAxis::Z => Vec3::Z,
        }
    }

    pub fn index(self) -> usize {
        match self {
            GizmoAxis::X => 0,
            GizmoAxis::Y => 1,
            GizmoAxis::Z => 2,
        }
    }

    pub fn color(self) -> egui::Color32 {
        match self {
            GizmoAxis::X => egui::Color32::from_rgb(230, 60, 60),
            GizmoAxis::Y => egui::Color32::from_rgb(60, 200, 60),
            GizmoAxis::Z => egui::Color32::from_rgb(60, 90, 230),
        }
    }
}

/// Handle style, derived from the active tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoKind {
    Translate,
    Rotate,
    Scale,
}

impl GizmoKind {
    pub fn for_tool(tool: ToolMode) -> Option<Self> {
        match tool {
            ToolMode::Move => Some(GizmoKind::Translate),
            ToolMode::Rotate => Some(GizmoKind::Rotate),
            ToolMode::Scale => Some(GizmoKind::Scale),
            ToolMode::Select | ToolMode::Measure => None,
        }
    }
}

/// State of an in-progress gizmo drag
#[derive(Default)]
pub struct GizmoState {
    /// Currently dragged axis
    pub active_axis: Option<GizmoAxis>,
    /// Whether a gizmo drag is in progress
    pub dragging: bool,
    /// ID of the object being edited
    pub drag_object_id: Option<ObjectId>,
}

impl GizmoState {
    pub fn begin_drag(&mut self, axis: GizmoAxis, object_id: ObjectId) {
        self.active_axis = Some(axis);
        self.dragging = true;
        self.drag_object_id = Some(object_id);
    }

    pub fn end_drag(&mut self) {
        self.active_axis = None;
        self.dragging = false;
        self.drag_object_id = None;
    }
}

/// One incremental gizmo edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoDrag {
    Translate(Vec3),
    /// World units dragged along the axis
    Scale { axis: GizmoAxis, amount: f32 },
    /// Radians around the axis
    Rotate { axis: GizmoAxis, angle: f32 },
}

/// Apply one drag increment; only the component for the dragged axis changes
/// for rotate and scale.
pub fn apply_drag(transform: &Transform, drag: GizmoDrag) -> Transform {
    let mut out = *transform;
    match drag {
        GizmoDrag::Translate(delta) => {
            out.position[0] += delta.x as f64;
            out.position[1] += delta.y as f64;
            out.position[2] += delta.z as f64;
        }
        GizmoDrag::Scale { axis, amount } => {
            let i = axis.index();
            out.scale[i] = (out.scale[i] * (1.0 + amount as f64)).max(MIN_SCALE);
        }
        GizmoDrag::Rotate { axis, angle } => {
            out.rotation[axis.index()] += angle as f64;
        }
    }
    out
}

/// Test which gizmo handle the ray touches
pub fn gizmo_hit_test(ray: &Ray, center: Vec3, kind: GizmoKind) -> Option<GizmoAxis> {
    match kind {
        GizmoKind::Translate | GizmoKind::Scale => axis_hit_test(ray, center, GIZMO_LENGTH),
        GizmoKind::Rotate => ring_hit_test(ray, center, RING_RADIUS),
    }
}

/// Test if a ray hits one of the axis lines.
/// Returns the axis if the ray passes within the threshold distance of an axis line.
pub fn axis_hit_test(ray: &Ray, center: Vec3, axis_length: f32) -> Option<GizmoAxis> {
    let mut best: Option<(GizmoAxis, f32)> = None;

    for axis in GizmoAxis::ALL {
        let line_end = center + axis.direction() * axis_length;
        let dist = ray_line_distance(ray, center, line_end);

        if dist < HIT_THRESHOLD && best.is_none_or(|(_, d)| dist < d) {
            best = Some((axis, dist));
        }
    }

    best.map(|(axis, _)| axis)
}

/// Test if a ray hits one of the rotation rings (circle in the plane normal to each axis).
pub fn ring_hit_test(ray: &Ray, center: Vec3, radius: f32) -> Option<GizmoAxis> {
    let mut best: Option<(GizmoAxis, f32)> = None;

    for axis in GizmoAxis::ALL {
        let normal = axis.direction();
        let denom = ray.direction.dot(normal);
        if denom.abs() < 1e-6 {
            continue;
        }
        let t = (center - ray.origin).dot(normal) / denom;
        if t <= 0.0 {
            continue;
        }
        let off_ring = ((ray.at(t) - center).length() - radius).abs();
        if off_ring < HIT_THRESHOLD && best.is_none_or(|(_, bt)| t < bt) {
            best = Some((axis, t));
        }
    }

    best.map(|(axis, _)| axis)
}

/// Compute the world-space distance dragged along an axis.
/// Projects the screen-space drag delta onto the axis direction in screen space.
pub fn compute_drag_delta(
    camera: &ArcBallCamera,
    center: Vec3,
    axis: GizmoAxis,
    screen_delta: egui::Vec2,
    rect: egui::Rect,
) -> f32 {
    let p0 = camera.project(center, rect);
    let p1 = camera.project(center + axis.direction(), rect);

    let (Some(screen_p0), Some(screen_p1)) = (p0, p1) else {
        return 0.0;
    };

    let screen_axis = screen_p1 - screen_p0;
    let screen_axis_len = screen_axis.length();

    if screen_axis_len < 1.0 {
        return 0.0;
    }

    let projected = screen_delta.dot(screen_axis / screen_axis_len);

    // 1 world unit = screen_axis_len pixels
    projected / screen_axis_len
}

/// Signed angle swept around the projected gizmo center between two pointer positions.
pub fn compute_rotation_delta(
    camera: &ArcBallCamera,
    center: Vec3,
    axis: GizmoAxis,
    previous: egui::Pos2,
    current: egui::Pos2,
    rect: egui::Rect,
) -> f32 {
    let Some(c) = camera.project(center, rect) else {
        return 0.0;
    };
    let a = previous - c;
    let b = current - c;
    if a.length() < 1.0 || b.length() < 1.0 {
        return 0.0;
    }

    // Screen y points down, so a positive cross is clockwise on screen.
    let swept = (a.x * b.y - a.y * b.x).atan2(a.dot(b));
    let facing = axis.direction().dot(camera.eye_position() - center);
    if facing >= 0.0 {
        -swept
    } else {
        swept
    }
}

/// World-space line segment with a display color
#[derive(Debug, Clone, Copy)]
pub struct GizmoSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: egui::Color32,
    pub axis: GizmoAxis,
}

/// Line segments that draw the gizmo handles
pub fn gizmo_segments(kind: GizmoKind, center: Vec3) -> Vec<GizmoSegment> {
    let mut out = Vec::new();

    for axis in GizmoAxis::ALL {
        let color = axis.color();
        let dir = axis.direction();
        match kind {
            GizmoKind::Translate | GizmoKind::Scale => {
                let tip = center + dir * GIZMO_LENGTH;
                out.push(GizmoSegment { start: center, end: tip, color, axis });

                // Arrowhead for translate, crossbar for scale
                let side = perpendicular(dir) * GIZMO_LENGTH * 0.08;
                let back = dir * GIZMO_LENGTH * 0.15;
                match kind {
                    GizmoKind::Translate => {
                        out.push(GizmoSegment { start: tip, end: tip - back + side, color, axis });
                        out.push(GizmoSegment { start: tip, end: tip - back - side, color, axis });
                    }
                    _ => {
                        out.push(GizmoSegment { start: tip - side, end: tip + side, color, axis });
                    }
                }
            }
            GizmoKind::Rotate => {
                let u = perpendicular(dir);
                let v = dir.cross(u);
                let point = |i: usize| {
                    let a = i as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
                    center + (u * a.cos() + v * a.sin()) * RING_RADIUS
                };
                for i in 0..RING_SEGMENTS {
                    out.push(GizmoSegment { start: point(i), end: point(i + 1), color, axis });
                }
            }
        }
    }

    out
}

// ── Helpers ──────────────────────────────────────────────────

fn perpendicular(dir: Vec3) -> Vec3 {
    if dir.y.abs() < 0.9 {
        dir.cross(Vec3::Y).normalize()
    } else {
        dir.cross(Vec3::X).normalize()
    }
}

/// Minimum distance between a ray and a line segment.
fn ray_line_distance(ray: &Ray, line_start: Vec3, line_end: Vec3) -> f32 {
    let u = ray.direction;
    let v = line_end - line_start;
    let w = ray.origin - line_start;

    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);

    let denom = a * c - b * b;

    let (sc, tc) = if denom < 1e-7 {
        // Nearly parallel
        (0.0, if b > c { d / b } else { e / c })
    } else {
        ((b * e - c * d) / denom, (a * e - b * d) / denom)
    };

    let tc = tc.clamp(0.0, 1.0);
    let sc = sc.max(0.0);

    let closest_ray = ray.origin + u * sc;
    let closest_line = line_start + v * tc;

    (closest_ray - closest_line).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    #[test]
    fn test_axis_hit_x() {
        let r = ray(Vec3::new(1.0, 0.05, 5.0), Vec3::NEG_Z);
        assert_eq!(axis_hit_test(&r, Vec3::ZERO, GIZMO_LENGTH), Some(GizmoAxis::X));
    }

    #[test]
    fn test_axis_miss() {
        let r = ray(Vec3::new(1.0, 1.0, 5.0), Vec3::NEG_Z);
        assert_eq!(axis_hit_test(&r, Vec3::ZERO, GIZMO_LENGTH), None);
    }

    #[test]
    fn test_ring_hit_z() {
        // Looking straight down -Z at the point on the Z ring (circle in XY plane)
        let r = ray(Vec3::new(RING_RADIUS, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(ring_hit_test(&r, Vec3::ZERO, RING_RADIUS), Some(GizmoAxis::Z));
    }

    #[test]
    fn test_apply_translate() {
        let t = apply_drag(&Transform::new(), GizmoDrag::Translate(Vec3::new(1.0, -2.0, 0.5)));
        assert_eq!(t.position, [1.0, -2.0, 0.5]);
        assert_eq!(t.scale, [1.0; 3]);
    }

    #[test]
    fn test_apply_scale_multiplies_one_axis() {
        let start = Transform {
            scale: [2.0, 1.0, 1.0],
            ..Transform::new()
        };
        let t = apply_drag(&start, GizmoDrag::Scale { axis: GizmoAxis::X, amount: 0.5 });
        assert_eq!(t.scale, [3.0, 1.0, 1.0]);
    }

    #[test]
    fn test_apply_scale_floor() {
        let t = apply_drag(&Transform::new(), GizmoDrag::Scale { axis: GizmoAxis::Y, amount: -5.0 });
        assert_eq!(t.scale[1], MIN_SCALE);
    }

    #[test]
    fn test_apply_rotate_independent_axes() {
        let t = apply_drag(&Transform::new(), GizmoDrag::Rotate { axis: GizmoAxis::Y, angle: 0.25 });
        let t = apply_drag(&t, GizmoDrag::Rotate { axis: GizmoAxis::Y, angle: 0.25 });
        assert!((t.rotation[1] - 0.5).abs() < 1e-6);
        assert_eq!(t.rotation[0], 0.0);
        assert_eq!(t.rotation[2], 0.0);
    }

    #[test]
    fn test_kind_for_tool() {
        assert_eq!(GizmoKind::for_tool(ToolMode::Move), Some(GizmoKind::Translate));
        assert_eq!(GizmoKind::for_tool(ToolMode::Select), None);
        assert_eq!(GizmoKind::for_tool(ToolMode::Measure), None);
    }

    #[test]
    fn test_drag_delta_along_screen_axis() {
        let cam = ArcBallCamera::new();
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        // Y axis points up on screen; dragging up moves along +Y
        let d = compute_drag_delta(&cam, Vec3::ZERO, GizmoAxis::Y, egui::vec2(0.0, -20.0), rect);
        assert!(d > 0.0);
    }
}
