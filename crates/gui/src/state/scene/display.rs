//! Display helper functions for scene objects

use shared::{ObjectSource, SceneObject};

/// Get display name for an object
pub fn object_display_name(object: &SceneObject) -> String {
    format!("{} ({})", object.name, short_id(&object.id))
}

/// Short kind label: geometry name or "Mesh"
pub fn object_kind_label(object: &SceneObject) -> &'static str {
    match &object.source {
        ObjectSource::Primitive { geometry } => geometry.display_name(),
        ObjectSource::Uploaded { .. } => "Mesh",
    }
}

/// Last 6 characters of an id
pub fn short_id(id: &str) -> &str {
    let start = id.char_indices().rev().nth(5).map(|(i, _)| i).unwrap_or(0);
    &id[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("obj-12345-abcdef12"), "cdef12");
        assert_eq!(short_id("abc"), "abc");
    }
}
