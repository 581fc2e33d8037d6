//! Gizmo drag write-back

use shared::ObjectPatch;

use super::SceneState;
use crate::viewport::gizmo::{apply_drag, GizmoDrag};

impl SceneState {
    /// Apply one gizmo increment and write position, rotation and scale back.
    pub fn apply_gizmo_drag(&mut self, id: &str, drag: GizmoDrag) -> bool {
        let Some(current) = self.get(id).map(|o| o.transform) else {
            return false;
        };
        let next = apply_drag(&current, drag);
        self.update_object(id, ObjectPatch::transform(&next))
    }
}
