//! Scene object store
//!
//! Ordered collection of placed objects. Insertion order is render and list order.

mod display;
mod transform_ops;

pub use display::{object_display_name, object_kind_label, short_id};

use shared::{generate_id, ObjectDraft, ObjectId, ObjectPatch, SceneObject};

/// Scene objects plus a version counter for cache invalidation
#[derive(Default)]
pub struct SceneState {
    objects: Vec<SceneObject>,
    /// Monotonically increasing version counter for cache invalidation
    version: u64,
}

impl SceneState {
    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Get an object by ID
    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Fill defaults, assign a fresh id and append. Returns the new id.
    pub fn insert(&mut self, draft: ObjectDraft) -> ObjectId {
        let id = generate_id("obj-");
        self.objects.push(draft.into_object(id.clone()));
        self.version += 1;
        id
    }

    /// Merge the given fields into the matching object.
    /// Returns false (and changes nothing) if the id is unknown.
    pub fn update_object(&mut self, id: &str, patch: ObjectPatch) -> bool {
        let Some(object) = self.objects.iter_mut().find(|o| o.id == id) else {
            return false;
        };
        patch.apply_to(object);
        self.version += 1;
        true
    }

    /// Drop every object (new session). Returns the removed objects.
    pub fn clear(&mut self) -> Vec<SceneObject> {
        self.version += 1;
        std::mem::take(&mut self.objects)
    }
}
