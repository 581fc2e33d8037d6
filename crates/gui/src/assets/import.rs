//! Mesh file importers: glTF/GLB and Wavefront OBJ.
//!
//! Both produce a flat-shaded [`MeshData`]. glTF meshes are placed by their
//! scene node transforms; OBJ vertices are taken as written.

use std::path::Path;

use glam::{Mat4, Vec3};

use super::AssetError;
use crate::viewport::mesh::MeshData;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Mesh formats accepted by the upload dialog
pub const MESH_EXTENSIONS: &[&str] = &["glb", "gltf", "obj"];

/// Import a mesh file, choosing the importer by extension
pub fn import_mesh(path: &Path) -> Result<MeshData, AssetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let mesh = match ext.as_str() {
        "glb" | "gltf" => import_gltf(path)?,
        "obj" => parse_obj(&std::fs::read_to_string(path)?)?,
        other => return Err(AssetError::UnsupportedFormat(other.to_string())),
    };

    if mesh.is_empty() {
        return Err(AssetError::EmptyMesh(path.display().to_string()));
    }
    Ok(mesh)
}

/// Import every triangle primitive of a glTF or GLB file.
///
/// Meshes are placed by walking the default scene (or the first one) and
/// composing node transforms from the root down. A file without scenes
/// falls back to its raw meshes in their own coordinates.
pub fn import_gltf(path: &Path) -> Result<MeshData, AssetError> {
    let (document, buffers, _images) = gltf::import(path)?;

    let mut geometry = GltfGeometry::default();
    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                geometry.visit(&node, Mat4::IDENTITY, &buffers);
            }
        }
        None => {
            for mesh in document.meshes() {
                geometry.add_mesh(&mesh, Mat4::IDENTITY, &buffers);
            }
        }
    }

    tracing::debug!(
        "glTF {}: {} vertices, {} triangles",
        path.display(),
        geometry.positions.len(),
        geometry.triangles.len()
    );
    Ok(MeshData::flat_shaded(&geometry.positions, &geometry.triangles, WHITE))
}

/// Triangle soup gathered from a glTF node tree
#[derive(Default)]
struct GltfGeometry {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl GltfGeometry {
    fn visit(&mut self, node: &gltf::Node<'_>, parent: Mat4, buffers: &[gltf::buffer::Data]) {
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            self.add_mesh(&mesh, world, buffers);
        }
        for child in node.children() {
            self.visit(&child, world, buffers);
        }
    }

    fn add_mesh(&mut self, mesh: &gltf::Mesh<'_>, world: Mat4, buffers: &[gltf::buffer::Data]) {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

            let Some(read) = reader.read_positions() else {
                continue;
            };
            let base = self.positions.len() as u32;
            self.positions
                .extend(read.map(|p| world.transform_point3(Vec3::from(p))));
            let count = self.positions.len() as u32 - base;

            let indices: Vec<u32> = match reader.read_indices() {
                Some(iter) => iter.into_u32().collect(),
                None => (0..count).collect(),
            };
            self.triangles.extend(
                indices
                    .chunks_exact(3)
                    .filter(|t| t.iter().all(|&i| i < count))
                    .map(|t| [base + t[0], base + t[1], base + t[2]]),
            );
        }
    }
}

/// Parse Wavefront OBJ text. Only `v` and `f` records are read; faces with
/// more than three corners are fan-triangulated. Negative (relative) indices
/// are supported.
pub fn parse_obj(text: &str) -> Result<MeshData, AssetError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut triangles: Vec<[u32; 3]> = Vec::new();

    for (line_no, raw) in text.lines().enumerate() {
        let line_no = line_no + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("v") => {
                let coords: Vec<f32> = parts
                    .take(3)
                    .map(|s| s.parse::<f32>())
                    .collect::<Result<_, _>>()
                    .map_err(|e| obj_error(line_no, format!("bad vertex: {e}")))?;
                if coords.len() != 3 {
                    return Err(obj_error(line_no, "vertex needs three coordinates"));
                }
                positions.push(Vec3::new(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                let corners = parts
                    .map(|token| resolve_obj_index(token, positions.len(), line_no))
                    .collect::<Result<Vec<u32>, _>>()?;
                if corners.len() < 3 {
                    return Err(obj_error(line_no, "face needs at least three corners"));
                }
                for i in 1..corners.len() - 1 {
                    triangles.push([corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {}
        }
    }

    Ok(MeshData::flat_shaded(&positions, &triangles, WHITE))
}

// ── Helpers ──────────────────────────────────────────────────

fn obj_error(line: usize, message: impl Into<String>) -> AssetError {
    AssetError::Obj {
        line,
        message: message.into(),
    }
}

/// `7`, `7/1`, `7/1/3`, `7//3` or `-1` → zero-based vertex index
fn resolve_obj_index(token: &str, vertex_count: usize, line: usize) -> Result<u32, AssetError> {
    let first = token.split('/').next().unwrap_or("");
    let raw: i64 = first
        .parse()
        .map_err(|_| obj_error(line, format!("bad face index '{token}'")))?;

    let index = match raw {
        0 => return Err(obj_error(line, "face index 0 is invalid")),
        n if n > 0 => n - 1,
        n => vertex_count as i64 + n,
    };

    if index < 0 || index >= vertex_count as i64 {
        return Err(obj_error(line, format!("face index {raw} out of range")));
    }
    Ok(index as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn test_parse_quad_fan() {
        let m = parse_obj(QUAD).unwrap();
        assert_eq!(m.triangle_count(), 2);
        assert_eq!(m.vertex_count(), 6);
        assert!((m.normal(0) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_parse_slashes_and_negative() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3/1/1 -2//1 -1/3\n";
        let m = parse_obj(text).unwrap();
        assert_eq!(m.triangle_count(), 1);
        assert_eq!(m.position(1), Vec3::X);
    }

    #[test]
    fn test_out_of_range_index() {
        let err = parse_obj("v 0 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, AssetError::Obj { line: 2, .. }));
    }

    #[test]
    fn test_bad_vertex() {
        let err = parse_obj("v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, AssetError::Obj { line: 1, .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = import_mesh(Path::new("model.fbx")).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedFormat(ext) if ext == "fbx"));
    }

    /// One triangle mesh used by three nodes: at the root, translated, and
    /// as the child of a translated parent.
    fn write_instanced_gltf(dir: &Path) -> std::path::PathBuf {
        use base64::Engine;

        let bytes: Vec<u8> = [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
            .iter()
            .flatten()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let uri = format!(
            "data:application/octet-stream;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        );
        let json = serde_json::json!({
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": [0, 1, 2] }],
            "nodes": [
                { "mesh": 0 },
                { "mesh": 0, "translation": [10.0, 0.0, 0.0] },
                { "translation": [0.0, 0.0, -4.0], "children": [3] },
                { "mesh": 0, "translation": [0.0, 5.0, 0.0] }
            ],
            "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
            "buffers": [{ "byteLength": bytes.len(), "uri": uri }],
            "bufferViews": [{ "buffer": 0, "byteOffset": 0, "byteLength": bytes.len() }],
            "accessors": [{
                "bufferView": 0,
                "componentType": 5126,
                "count": 3,
                "type": "VEC3",
                "min": [0.0, 0.0, 0.0],
                "max": [1.0, 1.0, 0.0]
            }]
        });
        let path = dir.join("instanced.gltf");
        std::fs::write(&path, json.to_string()).unwrap();
        path
    }

    #[test]
    fn test_gltf_applies_node_transforms() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = import_mesh(&write_instanced_gltf(dir.path())).unwrap();

        assert_eq!(mesh.triangle_count(), 3);
        let positions: Vec<Vec3> = (0..mesh.vertex_count() as u32).map(|i| mesh.position(i)).collect();
        let has = |p: Vec3| positions.iter().any(|q| (*q - p).length() < 1e-5);

        assert!(has(Vec3::new(0.0, 0.0, 0.0)));
        assert!(has(Vec3::new(11.0, 0.0, 0.0)));
        // Child offset composed with the parent's
        assert!(has(Vec3::new(0.0, 6.0, -4.0)));
        assert!(!has(Vec3::new(0.0, 5.0, 0.0)));
    }
}
