//! Headless test harness: drives the same state, hit test and interaction
//! dispatcher as the viewport, without a window.

use std::time::{Duration, Instant};

use glam::Vec3;
use shared::{GeometryType, ObjectDraft, ObjectId, ToolMode};

use crate::render::RenderBridge;
use crate::state::{AppState, RenderOutcome};
use crate::viewport::cache::MeshCache;
use crate::viewport::camera::ArcBallCamera;
use crate::viewport::gizmo::GizmoDrag;
use crate::viewport::interaction::{hit_test, ClickAction, HitTarget, InteractionState};
use crate::viewport::picking::Ray;
use crate::viewport::snapshot::{self, SnapshotError};

/// Default capture size
pub const VIEW_WIDTH: u32 = 320;
pub const VIEW_HEIGHT: u32 = 240;

/// Headless test harness owning app state, mesh cache, camera and click state
pub struct TestHarness {
    pub state: AppState,
    pub camera: ArcBallCamera,
    pub interaction: InteractionState,
    cache: MeshCache,
}

impl TestHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self {
            state: AppState::default(),
            camera: ArcBallCamera::new(),
            interaction: InteractionState::default(),
            cache: MeshCache::new(),
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    pub fn add(&mut self, draft: ObjectDraft) -> ObjectId {
        self.state.add_object(draft)
    }

    /// Add a primitive at `pos`
    pub fn add_primitive(&mut self, geometry: GeometryType, pos: [f64; 3]) -> ObjectId {
        self.add(ObjectDraft::primitive(geometry.display_name(), geometry).with_position(pos))
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        self.state.set_tool(tool);
        self.interaction.sync_tool(tool);
    }

    /// Apply one gizmo increment to the selected object
    pub fn drag_selected(&mut self, drag: GizmoDrag) -> bool {
        let Some(id) = self.state.selection.primary().cloned() else {
            return false;
        };
        self.state.scene.apply_gizmo_drag(&id, drag)
    }

    // ── Clicks ────────────────────────────────────────────────

    /// Click along an arbitrary world-space ray
    pub fn click_ray(&mut self, ray: Ray) -> ClickAction {
        self.sync();
        let target = hit_test(&ray, &self.state, &self.cache);
        self.interaction.dispatch(&mut self.state, target)
    }

    /// Click straight down onto `(x, z)` from above the scene
    pub fn click_from_above(&mut self, x: f32, z: f32) -> ClickAction {
        self.click_ray(Ray {
            origin: Vec3::new(x, 50.0, z),
            direction: Vec3::NEG_Y,
        })
    }

    /// What a ray would hit, without dispatching
    pub fn hit(&mut self, ray: &Ray) -> HitTarget {
        self.sync();
        hit_test(ray, &self.state, &self.cache)
    }

    // ── Snapshot + render ─────────────────────────────────────

    pub fn capture_png(&mut self) -> Result<Vec<u8>, SnapshotError> {
        self.sync();
        let image = snapshot::capture(
            &self.cache,
            &self.camera,
            &self.state.background,
            VIEW_WIDTH,
            VIEW_HEIGHT,
        )?;
        snapshot::encode_png(&image)
    }

    /// Capture the viewport and submit it
    pub fn request_render(&mut self, bridge: &RenderBridge) -> bool {
        let capture = self.capture_png().ok();
        self.state.request_render(bridge, capture)
    }

    /// Poll until the in-flight render settles or `timeout` passes
    pub fn wait_for_render(&mut self, timeout: Duration) -> Option<RenderOutcome> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(outcome) = self.state.render.poll() {
                return Some(outcome);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn object_count(&self) -> usize {
        self.state.scene.len()
    }

    pub fn mesh_count(&mut self) -> usize {
        self.sync();
        self.cache.meshes().len()
    }

    fn sync(&mut self) {
        self.cache.sync(&self.state.scene, &self.state.assets);
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_empty() {
        let mut h = TestHarness::new();
        assert_eq!(h.object_count(), 0);
        assert_eq!(h.mesh_count(), 0);
    }

    #[test]
    fn test_click_selects_in_select_mode() {
        let mut h = TestHarness::new();
        let id = h.add_primitive(GeometryType::Box, [3.0, 0.0, 0.0]);
        h.set_tool(ToolMode::Select);
        h.state.selection.clear();

        assert_eq!(h.click_from_above(3.0, 0.0), ClickAction::Select(id.clone()));
        assert!(h.state.selection.is_selected(&id));

        assert_eq!(h.click_from_above(-3.0, 0.0), ClickAction::ClearSelection);
        assert!(h.state.selection.is_empty());
    }

    #[test]
    fn test_hit_does_not_dispatch() {
        let mut h = TestHarness::new();
        let id = h.add_primitive(GeometryType::Box, [3.0, 0.0, 0.0]);
        h.state.selection.clear();

        let down = |x: f32| Ray { origin: Vec3::new(x, 50.0, 0.0), direction: Vec3::NEG_Y };
        match h.hit(&down(3.0)) {
            HitTarget::Surface(hit) => assert_eq!(hit.object_id, id),
            other => panic!("expected surface hit, got {other:?}"),
        }
        assert_eq!(h.hit(&down(-3.0)), HitTarget::Empty);
        assert!(h.state.selection.is_empty());
    }

    #[test]
    fn test_drag_selected_moves_object() {
        let mut h = TestHarness::new();
        let id = h.add_primitive(GeometryType::Sphere, [0.0, 0.0, 0.0]);
        assert!(h.drag_selected(GizmoDrag::Translate(Vec3::new(1.0, 0.0, 0.0))));
        assert_eq!(h.state.scene.get(&id).unwrap().transform.position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_capture_png() {
        let mut h = TestHarness::new();
        h.add(ObjectDraft::default());
        let png = h.capture_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
