//! World-space mesh cache for painting, picking and snapshots

use std::collections::HashMap;

use shared::{GeometryType, ObjectId, ObjectSource};

use super::mesh::{primitive_mesh, MeshData};
use super::picking::{pick_surface, Aabb, Ray, SurfaceHit};
use crate::assets::AssetRegistry;
use crate::state::scene::SceneState;

/// One object's mesh, already transformed into world space
#[derive(Clone, Debug)]
pub struct CachedMesh {
    pub id: ObjectId,
    pub mesh: MeshData,
    pub aabb: Aabb,
}

impl CachedMesh {
    pub fn new(id: ObjectId, mesh: MeshData) -> Self {
        let aabb = Aabb::from_mesh(&mesh);
        Self { id, mesh, aabb }
    }
}

/// Rebuilds world meshes whenever the scene version changes
#[derive(Default)]
pub struct MeshCache {
    built_version: Option<u64>,
    meshes: Vec<CachedMesh>,
    /// Unit primitive meshes, generated once
    templates: HashMap<GeometryType, MeshData>,
    rebuild_count: u64,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self, scene_version: u64) -> bool {
        self.built_version == Some(scene_version)
    }

    pub fn invalidate(&mut self) {
        self.built_version = None;
    }

    /// Rebuild if the scene changed since the last build
    pub fn sync(&mut self, scene: &SceneState, assets: &AssetRegistry) {
        if !self.is_valid(scene.version()) {
            self.rebuild(scene, assets);
        }
    }

    pub fn rebuild(&mut self, scene: &SceneState, assets: &AssetRegistry) {
        self.meshes.clear();

        for object in scene.objects() {
            let local = match &object.source {
                ObjectSource::Primitive { geometry } => &*self
                    .templates
                    .entry(*geometry)
                    .or_insert_with(|| primitive_mesh(*geometry)),
                ObjectSource::Uploaded { locator } => match assets.resolve(locator) {
                    Some(mesh) => mesh,
                    None => {
                        tracing::warn!("Object {} references unknown asset {}", object.id, locator);
                        continue;
                    }
                },
            };

            if local.is_empty() {
                continue;
            }
            let world = local.transformed(&object.transform, object.color);
            self.meshes.push(CachedMesh::new(object.id.clone(), world));
        }

        self.built_version = Some(scene.version());
        self.rebuild_count += 1;
    }

    pub fn meshes(&self) -> &[CachedMesh] {
        &self.meshes
    }

    pub fn get(&self, id: &str) -> Option<&CachedMesh> {
        self.meshes.iter().find(|m| m.id == id)
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Nearest surface under the ray
    pub fn pick(&self, ray: &Ray) -> Option<SurfaceHit> {
        pick_surface(ray, &self.meshes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ObjectDraft;

    #[test]
    fn test_rebuild_only_on_version_change() {
        let mut scene = SceneState::default();
        let assets = AssetRegistry::default();
        scene.insert(ObjectDraft::primitive("Box", GeometryType::Box));

        let mut cache = MeshCache::new();
        cache.sync(&scene, &assets);
        cache.sync(&scene, &assets);
        assert_eq!(cache.rebuild_count(), 1);
        assert_eq!(cache.meshes().len(), 1);

        scene.insert(ObjectDraft::primitive("Ball", GeometryType::Sphere));
        cache.sync(&scene, &assets);
        assert_eq!(cache.rebuild_count(), 2);
        assert_eq!(cache.meshes().len(), 2);
    }

    #[test]
    fn test_missing_asset_skipped() {
        let mut scene = SceneState::default();
        let assets = AssetRegistry::default();
        scene.insert(ObjectDraft {
            source: Some(ObjectSource::Uploaded {
                locator: shared::AssetLocator("asset://9/gone.obj".into()),
            }),
            ..Default::default()
        });
        let mut cache = MeshCache::new();
        cache.sync(&scene, &assets);
        assert!(cache.meshes().is_empty());
    }
}
