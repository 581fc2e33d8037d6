//! Uploaded mesh assets.
//!
//! An upload is imported once, stored under a session-scoped
//! [`AssetLocator`] and resolved by the mesh cache on every rebuild.
//! Locators stay valid until released; the registry releases everything
//! it still holds when dropped.

mod error;
pub mod import;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use shared::AssetLocator;

pub use error::AssetError;
pub use import::{import_mesh, parse_obj, MESH_EXTENSIONS};

use crate::viewport::mesh::MeshData;

struct AssetEntry {
    source: PathBuf,
    mesh: MeshData,
}

#[derive(Default)]
pub struct AssetRegistry {
    entries: HashMap<AssetLocator, AssetEntry>,
    next_id: u64,
}

impl AssetRegistry {
    /// Import a mesh file and register it under a new locator
    pub fn load(&mut self, path: &Path) -> Result<AssetLocator, AssetError> {
        let mesh = import_mesh(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mesh".to_string());
        let locator = self.insert(file_name, path.to_path_buf(), mesh);
        tracing::info!("Loaded asset {} from {}", locator, path.display());
        Ok(locator)
    }

    /// Register an already imported mesh
    pub fn insert(&mut self, file_name: String, source: PathBuf, mesh: MeshData) -> AssetLocator {
        self.next_id += 1;
        let locator = AssetLocator(format!("asset://{}/{}", self.next_id, file_name));
        self.entries
            .insert(locator.clone(), AssetEntry { source, mesh });
        locator
    }

    pub fn resolve(&self, locator: &AssetLocator) -> Option<&MeshData> {
        self.entries.get(locator).map(|e| &e.mesh)
    }

    pub fn source_path(&self, locator: &AssetLocator) -> Option<&Path> {
        self.entries.get(locator).map(|e| e.source.as_path())
    }

    /// Release one asset; returns false if it was already gone
    pub fn release(&mut self, locator: &AssetLocator) -> bool {
        let released = self.entries.remove(locator).is_some();
        if released {
            tracing::debug!("Released asset {}", locator);
        }
        released
    }

    pub fn release_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        if count > 0 {
            tracing::debug!("Released {} assets", count);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for AssetRegistry {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_obj(dir: &Path) -> PathBuf {
        let path = dir.join("tri.obj");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();
        path
    }

    #[test]
    fn test_load_and_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(dir.path());

        let mut reg = AssetRegistry::default();
        let locator = reg.load(&path).unwrap();
        assert_eq!(locator.as_str(), "asset://1/tri.obj");
        assert_eq!(reg.resolve(&locator).unwrap().triangle_count(), 1);
        assert_eq!(reg.source_path(&locator), Some(path.as_path()));
    }

    #[test]
    fn test_locators_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(dir.path());
        let mut reg = AssetRegistry::default();
        let a = reg.load(&path).unwrap();
        let b = reg.load(&path).unwrap();
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_release() {
        let mut reg = AssetRegistry::default();
        let loc = reg.insert("m.obj".into(), PathBuf::from("m.obj"), MeshData::default());
        assert!(reg.release(&loc));
        assert!(!reg.release(&loc));
        assert!(reg.resolve(&loc).is_none());
    }

    #[test]
    fn test_missing_file() {
        let mut reg = AssetRegistry::default();
        let err = reg.load(Path::new("/nonexistent/part.obj")).unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
        assert!(reg.is_empty());
    }
}
