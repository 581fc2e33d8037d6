use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};
use shared::{Color, GeometryType, Transform};

/// Floats per vertex in [`MeshData`]
pub const STRIDE: usize = 9;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn position(&self, index: u32) -> Vec3 {
        let base = index as usize * STRIDE;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    pub fn normal(&self, index: u32) -> Vec3 {
        let base = index as usize * STRIDE + 3;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    pub fn color(&self, index: u32) -> [f32; 3] {
        let base = index as usize * STRIDE + 6;
        [
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        ]
    }

    /// Iterate triangles as vertex index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Build a flat-shaded mesh: every triangle gets its own three vertices
    /// and the face normal.
    pub fn flat_shaded(positions: &[Vec3], triangles: &[[u32; 3]], color: [f32; 3]) -> Self {
        let mut vertices = Vec::with_capacity(triangles.len() * 3 * STRIDE);
        let mut indices = Vec::with_capacity(triangles.len() * 3);

        for tri in triangles {
            let a = positions[tri[0] as usize];
            let b = positions[tri[1] as usize];
            let c = positions[tri[2] as usize];
            let normal = (b - a).cross(c - a).normalize_or_zero();
            let base = (vertices.len() / STRIDE) as u32;
            for p in [a, b, c] {
                push_vert(&mut vertices, p.x, p.y, p.z, normal, color);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2]);
        }

        MeshData { vertices, indices }
    }

    /// Copy of this mesh in world space with every vertex recolored.
    pub fn transformed(&self, transform: &Transform, color: Color) -> MeshData {
        let model = model_matrix(transform);
        let normal_matrix = Mat3::from_mat4(model).inverse().transpose();
        let rgb = color_to_unit(color);

        let mut vertices = Vec::with_capacity(self.vertices.len());
        for v in self.vertices.chunks_exact(STRIDE) {
            let p = model.transform_point3(Vec3::new(v[0], v[1], v[2]));
            let n = (normal_matrix * Vec3::new(v[3], v[4], v[5])).normalize_or_zero();
            push_vert(&mut vertices, p.x, p.y, p.z, n, rgb);
        }

        MeshData {
            vertices,
            indices: self.indices.clone(),
        }
    }
}

/// Model matrix: translation * rotation (XYZ Euler) * scale
pub fn model_matrix(transform: &Transform) -> Mat4 {
    let [px, py, pz] = transform.position.map(|v| v as f32);
    let [rx, ry, rz] = transform.rotation.map(|v| v as f32);
    let [sx, sy, sz] = transform.scale.map(|v| v as f32);
    Mat4::from_scale_rotation_translation(
        Vec3::new(sx, sy, sz),
        Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
        Vec3::new(px, py, pz),
    )
}

/// sRGB bytes scaled to 0..1 (still sRGB, not linearized)
pub fn color_to_unit(color: Color) -> [f32; 3] {
    color.map(|c| c as f32 / 255.0)
}

/// Unit-sized mesh for a primitive geometry tag
pub fn primitive_mesh(geometry: GeometryType) -> MeshData {
    let white = [1.0, 1.0, 1.0];
    match geometry {
        GeometryType::Box => cube(1.0, 1.0, 1.0, white),
        GeometryType::Sphere => sphere(0.5, 16, 24, white),
        GeometryType::Cylinder => cylinder(0.5, 1.0, 32, white),
    }
}

pub fn cube(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * STRIDE);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / STRIDE) as u32;
        for v in quad {
            push_vert(&mut vertices, v.x, v.y, v.z, *normal, color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

pub fn cylinder(radius: f32, height: f32, segments: u32, color: [f32; 3]) -> MeshData {
    let hh = height * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for i in 0..segments {
        let a0 = (i as f32) * std::f32::consts::TAU / segments as f32;
        let a1 = ((i + 1) as f32) * std::f32::consts::TAU / segments as f32;

        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();

        let n0 = Vec3::new(c0, 0.0, s0);
        let n1 = Vec3::new(c1, 0.0, s1);

        let base = (vertices.len() / STRIDE) as u32;

        push_vert(&mut vertices, radius * c0, -hh, radius * s0, n0, color);
        push_vert(&mut vertices, radius * c1, -hh, radius * s1, n1, color);
        push_vert(&mut vertices, radius * c1, hh, radius * s1, n1, color);
        push_vert(&mut vertices, radius * c0, hh, radius * s0, n0, color);

        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    add_cap(&mut vertices, &mut indices, radius, hh, segments, Vec3::Y, color);
    add_cap(&mut vertices, &mut indices, radius, -hh, segments, Vec3::NEG_Y, color);

    MeshData { vertices, indices }
}

pub fn sphere(radius: f32, rings: u32, sectors: u32, color: [f32; 3]) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let (sp, cp) = phi.sin_cos();

        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            let (st, ct) = theta.sin_cos();

            let n = Vec3::new(sp * ct, cp, sp * st);
            push_vert(&mut vertices, radius * n.x, radius * n.y, radius * n.z, n, color);
        }
    }

    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    MeshData { vertices, indices }
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[px, py, pz, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn add_cap(
    vertices: &mut Vec<f32>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    normal: Vec3,
    color: [f32; 3],
) {
    let center_idx = (vertices.len() / STRIDE) as u32;
    push_vert(vertices, 0.0, y, 0.0, normal, color);

    for i in 0..segments {
        let angle = (i as f32) * std::f32::consts::TAU / segments as f32;
        push_vert(vertices, radius * angle.cos(), y, radius * angle.sin(), normal, color);
    }

    for i in 0..segments {
        let next = (i + 1) % segments;
        indices.extend_from_slice(&[center_idx, center_idx + 1 + i, center_idx + 1 + next]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let m = cube(1.0, 1.0, 1.0, [1.0; 3]);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
    }

    #[test]
    fn test_transformed_translates_and_recolors() {
        let m = cube(1.0, 1.0, 1.0, [1.0; 3]);
        let t = Transform::at([10.0, 0.0, 0.0]);
        let w = m.transformed(&t, [255, 0, 0]);
        for i in 0..w.vertex_count() as u32 {
            let p = w.position(i);
            assert!(p.x >= 9.5 - 1e-5 && p.x <= 10.5 + 1e-5);
            assert_eq!(w.color(i), [1.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_transformed_scales() {
        let m = cube(1.0, 1.0, 1.0, [1.0; 3]);
        let t = Transform {
            scale: [2.0, 1.0, 1.0],
            ..Transform::new()
        };
        let w = m.transformed(&t, [255; 3]);
        let max_x = (0..w.vertex_count() as u32)
            .map(|i| w.position(i).x)
            .fold(f32::MIN, f32::max);
        assert!((max_x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_flat_shaded_normal() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let m = MeshData::flat_shaded(&positions, &[[0, 1, 2]], [1.0; 3]);
        assert_eq!(m.vertex_count(), 3);
        assert!((m.normal(0) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_color_to_unit_keeps_srgb() {
        let [r, g, b] = color_to_unit([128, 0, 255]);
        // Mid-gray stays at half scale; a linearized value would be near 0.216
        assert!((r - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(g, 0.0);
        assert_eq!(b, 1.0);
    }
}
