use glam::Vec3;
use shared::ObjectId;

use super::cache::CachedMesh;
use super::mesh::MeshData;

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from MeshData (9 floats per vertex: pos+normal+color)
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for i in 0..data.vertex_count() as u32 {
            let p = data.position(i);
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = ray.direction.recip();

    let t1 = (aabb.min - ray.origin) * inv_dir;
    let t2 = (aabb.max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Nearest triangle hit distance in a mesh
pub fn pick_triangle(ray: &Ray, mesh: &MeshData) -> Option<f32> {
    mesh.triangles()
        .filter_map(|[i0, i1, i2]| {
            ray_triangle_intersect(ray, mesh.position(i0), mesh.position(i1), mesh.position(i2))
        })
        .min_by(|a, b| a.total_cmp(b))
}

/// A ray hit on the surface of a scene object
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceHit {
    pub object_id: ObjectId,
    /// World-space hit point
    pub point: Vec3,
    pub distance: f32,
}

/// Find the nearest object surface hit by the ray.
/// AABBs reject most objects before the triangle test.
pub fn pick_surface(ray: &Ray, meshes: &[CachedMesh]) -> Option<SurfaceHit> {
    let mut best: Option<SurfaceHit> = None;

    for cached in meshes {
        let Some(box_dist) = ray_aabb(ray, &cached.aabb) else {
            continue;
        };
        if best.as_ref().is_some_and(|b| box_dist > b.distance) {
            continue;
        }
        if let Some(dist) = pick_triangle(ray, &cached.mesh) {
            if best.as_ref().is_none_or(|b| dist < b.distance) {
                best = Some(SurfaceHit {
                    object_id: cached.id.clone(),
                    point: ray.at(dist),
                    distance: dist,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::mesh::cube;

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let aabb = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        let hit = ray_aabb(&ray(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z), &aabb);
        assert!((hit.unwrap() - 4.0).abs() < 1e-5);
        assert!(ray_aabb(&ray(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z), &aabb).is_none());
    }

    #[test]
    fn test_ray_triangle() {
        let t = ray_triangle_intersect(
            &ray(Vec3::new(0.2, 0.2, 1.0), Vec3::NEG_Z),
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
        );
        assert!((t.unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pick_surface_nearest() {
        let near = cube(1.0, 1.0, 1.0, [1.0; 3]);
        let far = near.transformed(&shared::Transform::at([0.0, 0.0, -5.0]), [255; 3]);
        let meshes = vec![
            CachedMesh::new("far".into(), far),
            CachedMesh::new("near".into(), near),
        ];
        let hit = pick_surface(&ray(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z), &meshes).unwrap();
        assert_eq!(hit.object_id, "near");
        assert!((hit.point.z - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_pick_surface_empty_space() {
        let meshes = vec![CachedMesh::new("a".into(), cube(1.0, 1.0, 1.0, [1.0; 3]))];
        assert!(pick_surface(&ray(Vec3::new(5.0, 5.0, 10.0), Vec3::NEG_Z), &meshes).is_none());
    }
}
