//! Click interpretation for the viewport.
//!
//! Every primary click is reduced to one [`HitTarget`] by a single hit test,
//! then [`transition`] maps `(tool, target, pending measurement start)` to a
//! [`ClickAction`]. [`InteractionState::dispatch`] applies that action to the
//! application state. Gizmo drags are not clicks and never pass through here.

use glam::Vec3;
use shared::{Measurement, ObjectId, SceneObject, ToolMode};

use super::cache::MeshCache;
use super::gizmo::{gizmo_hit_test, GizmoAxis, GizmoKind};
use super::picking::{Ray, SurfaceHit};
use crate::state::AppState;

/// What a click landed on, as decided by one authoritative hit test
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    /// A handle of the visible gizmo (takes priority over surfaces)
    Gizmo(GizmoAxis),
    /// The surface of a scene object
    Surface(SurfaceHit),
    /// Background / ground
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickAction {
    Select(ObjectId),
    ClearSelection,
    MeasureStart(Vec3),
    MeasureComplete(Measurement),
    Ignore,
}

/// World-space gizmo anchor for an object
pub fn object_center(object: &SceneObject) -> Vec3 {
    let [x, y, z] = object.transform.position;
    Vec3::new(x as f32, y as f32, z as f32)
}

/// The one hit test every click goes through: visible gizmo handles first,
/// then the nearest object surface, otherwise empty space.
pub fn hit_test(ray: &Ray, state: &AppState, cache: &MeshCache) -> HitTarget {
    let gizmo = GizmoKind::for_tool(state.tool).zip(
        state
            .selection
            .primary()
            .and_then(|id| state.scene.get(id)),
    );
    if let Some((kind, object)) = gizmo {
        if let Some(axis) = gizmo_hit_test(ray, object_center(object), kind) {
            return HitTarget::Gizmo(axis);
        }
    }

    match cache.pick(ray) {
        Some(hit) => HitTarget::Surface(hit),
        None => HitTarget::Empty,
    }
}

/// Transition table: tool × hit target × pending start → action.
///
/// Measurement points must land on a surface; clicks on empty space in
/// measure mode are ignored and keep the pending start.
pub fn transition(tool: ToolMode, target: &HitTarget, pending_start: Option<Vec3>) -> ClickAction {
    match (tool, target) {
        (ToolMode::Select, HitTarget::Surface(hit)) => ClickAction::Select(hit.object_id.clone()),
        (ToolMode::Select, HitTarget::Empty) => ClickAction::ClearSelection,
        (ToolMode::Select, HitTarget::Gizmo(_)) => ClickAction::Ignore,

        // The gizmo owns the pointer in transform modes; plain clicks never re-pick.
        (ToolMode::Move | ToolMode::Rotate | ToolMode::Scale, _) => ClickAction::Ignore,

        (ToolMode::Measure, HitTarget::Surface(hit)) => match pending_start {
            None => ClickAction::MeasureStart(hit.point),
            Some(start) => ClickAction::MeasureComplete(Measurement::new(
                to_f64(start),
                to_f64(hit.point),
            )),
        },
        (ToolMode::Measure, HitTarget::Empty | HitTarget::Gizmo(_)) => ClickAction::Ignore,
    }
}

/// Viewport-local interaction state: the pending measurement start point
#[derive(Debug, Default)]
pub struct InteractionState {
    pending_start: Option<Vec3>,
    /// Tool seen on the previous dispatch; a change discards the pending start
    last_tool: ToolMode,
}

impl InteractionState {
    pub fn pending_start(&self) -> Option<Vec3> {
        self.pending_start
    }

    pub fn cancel_pending(&mut self) {
        self.pending_start = None;
    }

    /// Drop a pending measurement start when the tool changed
    pub fn sync_tool(&mut self, tool: ToolMode) {
        if tool != self.last_tool {
            self.pending_start = None;
            self.last_tool = tool;
        }
    }

    /// Interpret one click and apply the resulting action to `state`.
    pub fn dispatch(&mut self, state: &mut AppState, target: HitTarget) -> ClickAction {
        self.sync_tool(state.tool);

        let action = transition(state.tool, &target, self.pending_start);
        match &action {
            ClickAction::Select(id) => state.selection.select(id.clone()),
            ClickAction::ClearSelection => state.selection.clear(),
            ClickAction::MeasureStart(point) => self.pending_start = Some(*point),
            ClickAction::MeasureComplete(measurement) => {
                tracing::info!("Measured {:.3}", measurement.distance);
                state.add_measurement(measurement.clone());
                self.pending_start = None;
            }
            ClickAction::Ignore => {}
        }
        action
    }
}

fn to_f64(v: Vec3) -> [f64; 3] {
    [v.x as f64, v.y as f64, v.z as f64]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(id: &str, point: Vec3) -> HitTarget {
        HitTarget::Surface(SurfaceHit {
            object_id: id.to_string(),
            point,
            distance: 1.0,
        })
    }

    #[test]
    fn test_select_mode_table() {
        assert_eq!(
            transition(ToolMode::Select, &surface("a", Vec3::ZERO), None),
            ClickAction::Select("a".into())
        );
        assert_eq!(
            transition(ToolMode::Select, &HitTarget::Empty, None),
            ClickAction::ClearSelection
        );
    }

    #[test]
    fn test_transform_modes_ignore_clicks() {
        for tool in [ToolMode::Move, ToolMode::Rotate, ToolMode::Scale] {
            assert_eq!(transition(tool, &surface("a", Vec3::ZERO), None), ClickAction::Ignore);
            assert_eq!(transition(tool, &HitTarget::Empty, None), ClickAction::Ignore);
            assert_eq!(
                transition(tool, &HitTarget::Gizmo(GizmoAxis::X), None),
                ClickAction::Ignore
            );
        }
    }

    #[test]
    fn test_measure_requires_surface() {
        assert_eq!(transition(ToolMode::Measure, &HitTarget::Empty, None), ClickAction::Ignore);
        assert_eq!(
            transition(ToolMode::Measure, &HitTarget::Empty, Some(Vec3::ONE)),
            ClickAction::Ignore
        );
    }

    #[test]
    fn test_measure_two_clicks() {
        let mut state = AppState::default();
        state.set_tool(ToolMode::Measure);
        let mut ix = InteractionState::default();

        let first = ix.dispatch(&mut state, surface("a", Vec3::ZERO));
        assert_eq!(first, ClickAction::MeasureStart(Vec3::ZERO));
        assert_eq!(ix.pending_start(), Some(Vec3::ZERO));
        assert!(state.selection.primary().is_none());

        let second = ix.dispatch(&mut state, surface("b", Vec3::new(3.0, 4.0, 0.0)));
        assert!(matches!(second, ClickAction::MeasureComplete(_)));
        assert_eq!(ix.pending_start(), None);
        assert_eq!(state.measurements.len(), 1);
        assert!((state.measurements.items()[0].distance - 5.0).abs() < 1e-6);
        assert!(state.selection.primary().is_none());
    }

    #[test]
    fn test_tool_change_discards_pending() {
        let mut state = AppState::default();
        state.set_tool(ToolMode::Measure);
        let mut ix = InteractionState::default();
        ix.dispatch(&mut state, surface("a", Vec3::ZERO));
        assert!(ix.pending_start().is_some());

        state.set_tool(ToolMode::Select);
        ix.sync_tool(state.tool);
        assert!(ix.pending_start().is_none());
    }

    #[test]
    fn test_hit_test_gizmo_before_surface() {
        let mut state = AppState::default();
        state.add_object(shared::ObjectDraft::default());
        let mut cache = MeshCache::new();
        cache.sync(&state.scene, &state.assets);

        // Crosses the Y handle above the box
        let handle = Ray {
            origin: Vec3::new(0.0, 1.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        // Through the box, clear of every handle
        let body = Ray {
            origin: Vec3::new(0.3, -0.3, 10.0),
            direction: Vec3::NEG_Z,
        };

        assert_eq!(state.tool, ToolMode::Move);
        assert_eq!(hit_test(&handle, &state, &cache), HitTarget::Gizmo(GizmoAxis::Y));
        assert!(matches!(hit_test(&body, &state, &cache), HitTarget::Surface(_)));

        state.set_tool(ToolMode::Select);
        assert_eq!(hit_test(&handle, &state, &cache), HitTarget::Empty);
        assert!(matches!(hit_test(&body, &state, &cache), HitTarget::Surface(_)));
    }

    #[test]
    fn test_empty_click_keeps_pending() {
        let mut state = AppState::default();
        state.set_tool(ToolMode::Measure);
        let mut ix = InteractionState::default();
        ix.dispatch(&mut state, surface("a", Vec3::X));
        ix.dispatch(&mut state, HitTarget::Empty);
        assert_eq!(ix.pending_start(), Some(Vec3::X));
        assert!(state.measurements.is_empty());
    }
}
