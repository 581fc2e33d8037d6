// Library crate: exposes testable modules for integration tests.
// Window-bound modules (app, ui, on-screen painting) remain in the binary crate.

pub mod assets;
pub mod fixtures;
pub mod harness;
pub mod render;
pub mod state;

/// Viewport logic that runs without a window: camera, meshes, picking, gizmo
/// math, click interpretation and CPU capture.
pub mod viewport {
    pub mod cache;
    pub mod camera;
    pub mod gizmo;
    pub mod interaction;
    pub mod mesh;
    pub mod picking;
    pub mod snapshot;
}
