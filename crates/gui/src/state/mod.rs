pub mod background;
pub mod catalog;
pub mod measurement;
pub mod render;
pub mod scene;
pub mod selection;
pub mod settings;

use std::path::Path;

use shared::{
    Measurement, ObjectDraft, ObjectId, ObjectPatch, ObjectSource, ToolMode, WatermarkConfig,
    GRAY, LIGHT_GRAY,
};

use crate::assets::{AssetError, AssetRegistry};
use crate::render::RenderBridge;
use background::BackgroundState;
pub use catalog::{CatalogState, PartSpec, ASSEMBLY_SPACING, PARTS};
use measurement::MeasurementState;
pub use render::{RenderOutcome, RenderState, RENDER_FAILED_ALERT};
pub use scene::{object_display_name, object_kind_label, short_id, SceneState};
use selection::SelectionState;
pub use settings::AppSettings;

/// Where uploaded meshes are placed
pub const UPLOAD_POSITION: [f64; 3] = [0.0, 2.0, 0.0];

/// Panel visibility flags
pub struct PanelVisibility {
    pub assets: bool,
    pub properties: bool,
    pub measurements: bool,
    pub watermark: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            assets: true,
            properties: true,
            measurements: true,
            watermark: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub scene: SceneState,
    pub selection: SelectionState,
    pub measurements: MeasurementState,
    pub tool: ToolMode,
    pub watermark: WatermarkConfig,
    pub catalog: CatalogState,
    pub assets: AssetRegistry,
    pub background: BackgroundState,
    pub render: RenderState,
    pub settings: AppSettings,
    pub panels: PanelVisibility,
    /// Last user-facing status message (import errors and the like)
    pub status: Option<String>,
    /// Show settings window
    pub show_settings_window: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            scene: SceneState::default(),
            selection: SelectionState::default(),
            measurements: MeasurementState::default(),
            tool: ToolMode::default(),
            watermark: WatermarkConfig::default(),
            catalog: CatalogState::default(),
            assets: AssetRegistry::default(),
            background: BackgroundState::with_color(settings.viewport.background_color),
            render: RenderState::with_prompt(settings.render.default_prompt.clone()),
            settings,
            panels: PanelVisibility::default(),
            status: None,
            show_settings_window: false,
        }
    }

    // ── Scene ────────────────────────────────────────────────

    /// Add an object, select it and switch to the move tool
    pub fn add_object(&mut self, draft: ObjectDraft) -> ObjectId {
        let id = self.scene.insert(draft);
        if let Some(obj) = self.scene.get(&id) {
            tracing::info!("Added object {} ({})", obj.name, id);
        }
        self.selection.select(id.clone());
        self.tool = ToolMode::Move;
        id
    }

    pub fn update_object(&mut self, id: &str, patch: ObjectPatch) -> bool {
        self.scene.update_object(id, patch)
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        if self.tool != tool {
            tracing::debug!("Tool mode {:?} -> {:?}", self.tool, tool);
            self.tool = tool;
        }
    }

    pub fn add_measurement(&mut self, measurement: Measurement) {
        self.measurements.add(measurement);
    }

    // ── Catalog & uploads ────────────────────────────────────

    /// Add every selected catalog part in a row along X, then clear the selection set
    pub fn assemble_selected_parts(&mut self) -> Vec<ObjectId> {
        let parts = self.catalog.selected_parts();
        let ids = parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let draft = ObjectDraft::primitive(part.name, part.geometry)
                    .with_position([i as f64 * ASSEMBLY_SPACING, 0.0, 0.0])
                    .with_color(LIGHT_GRAY);
                self.add_object(draft)
            })
            .collect::<Vec<_>>();
        self.catalog.clear();
        if !ids.is_empty() {
            tracing::info!("Assembled {} catalog parts", ids.len());
        }
        ids
    }

    /// Import a mesh file and add it as an object named after the file
    pub fn upload_mesh(&mut self, path: &Path) -> Result<ObjectId, AssetError> {
        let locator = self.assets.load(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Uploaded Mesh".to_string());

        let draft = ObjectDraft {
            name: Some(name),
            source: Some(ObjectSource::Uploaded { locator }),
            ..Default::default()
        }
        .with_position(UPLOAD_POSITION)
        .with_color(GRAY);
        Ok(self.add_object(draft))
    }

    // ── Render ───────────────────────────────────────────────

    /// Send a capture to the render service. A missing capture aborts quietly.
    pub fn request_render(&mut self, bridge: &RenderBridge, capture: Option<Vec<u8>>) -> bool {
        let Some(png) = capture else {
            tracing::warn!("Viewport capture unavailable, render request dropped");
            return false;
        };
        let prompt = self.render.prompt.clone();
        let watermark = self.watermark.request_text();
        self.render.start(bridge, png, &prompt, watermark)
    }

    // ── Session ──────────────────────────────────────────────

    /// Drop every object, measurement and uploaded asset
    pub fn reset_session(&mut self) {
        let removed = self.scene.clear();
        let released = self.assets.release_all();
        self.measurements.clear_all();
        self.selection.clear();
        self.catalog.clear();
        self.render.reset();
        self.tool = ToolMode::Select;
        self.status = None;
        tracing::info!(
            "New scene: {} objects removed, {} assets released",
            removed.len(),
            released
        );
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::GeometryType;

    #[test]
    fn test_add_object_selects_and_moves() {
        let mut state = AppState::default();
        let id = state.add_object(ObjectDraft::default());
        assert_eq!(state.scene.len(), 1);
        assert_eq!(state.selection.primary(), Some(&id));
        assert_eq!(state.tool, ToolMode::Move);

        let obj = state.scene.get(&id).unwrap();
        assert_eq!(obj.name, "New Object");
        assert_eq!(obj.color, shared::WHITE);
    }

    #[test]
    fn test_update_keeps_selection_and_tool() {
        let mut state = AppState::default();
        let a = state.add_object(ObjectDraft::primitive("A", GeometryType::Box));
        let b = state.add_object(ObjectDraft::primitive("B", GeometryType::Sphere));
        state.set_tool(ToolMode::Scale);

        let patch = ObjectPatch {
            scale: Some([2.0, 2.0, 2.0]),
            ..Default::default()
        };
        assert!(state.update_object(&a, patch));
        assert_eq!(state.selection.primary(), Some(&b));
        assert_eq!(state.tool, ToolMode::Scale);
        assert!(!state.update_object("missing", ObjectPatch::default()));
    }

    #[test]
    fn test_assemble_positions_and_color() {
        let mut state = AppState::default();
        state.catalog.toggle("ball-joint");
        state.catalog.toggle("base-plate");
        let ids = state.assemble_selected_parts();

        assert_eq!(ids.len(), 2);
        assert_eq!(state.catalog.selected_count(), 0);
        let first = state.scene.get(&ids[0]).unwrap();
        let second = state.scene.get(&ids[1]).unwrap();
        assert_eq!(first.name, "Base Plate");
        assert_eq!(first.transform.position, [0.0, 0.0, 0.0]);
        assert_eq!(second.transform.position, [1.5, 0.0, 0.0]);
        assert_eq!(second.color, LIGHT_GRAY);
        assert_eq!(state.selection.primary(), Some(&ids[1]));
    }

    #[test]
    fn test_assemble_nothing_selected() {
        let mut state = AppState::default();
        assert!(state.assemble_selected_parts().is_empty());
        assert!(state.scene.is_empty());
        assert_eq!(state.tool, ToolMode::Select);
    }

    #[test]
    fn test_upload_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bracket.obj");
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let mut state = AppState::default();
        let id = state.upload_mesh(&path).unwrap();
        let obj = state.scene.get(&id).unwrap();
        assert_eq!(obj.name, "bracket");
        assert_eq!(obj.transform.position, UPLOAD_POSITION);
        assert_eq!(obj.color, GRAY);
        assert!(obj.source.is_uploaded());
        assert_eq!(state.assets.len(), 1);
    }

    #[test]
    fn test_upload_failure_adds_nothing() {
        let mut state = AppState::default();
        assert!(state.upload_mesh(Path::new("/nope/missing.glb")).is_err());
        assert!(state.scene.is_empty());
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_reset_session_releases_assets() {
        let mut state = AppState::default();
        let loc = state.assets.insert(
            "m.obj".into(),
            "m.obj".into(),
            crate::viewport::mesh::MeshData::default(),
        );
        state.add_object(ObjectDraft::default());
        state.add_measurement(Measurement::new([0.0; 3], [1.0, 0.0, 0.0]));

        state.reset_session();
        assert!(state.scene.is_empty());
        assert!(state.measurements.is_empty());
        assert!(state.selection.is_empty());
        assert!(state.assets.resolve(&loc).is_none());
        assert_eq!(state.tool, ToolMode::Select);
    }
}
