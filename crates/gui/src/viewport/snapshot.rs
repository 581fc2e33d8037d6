//! Synchronous CPU capture of the current viewport frame.
//!
//! The on-screen painter and this rasterizer share the camera, the mesh cache
//! and the shading rule, so the captured image matches what the user sees
//! (minus overlays such as gizmos, grid and measurement labels).

use std::io::Cursor;

use glam::{Vec2, Vec3};
use image::{imageops::FilterType, DynamicImage, ImageFormat, Rgba, RgbaImage};
use thiserror::Error;

use super::cache::MeshCache;
use super::camera::ArcBallCamera;
use crate::state::background::BackgroundState;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("viewport is not ready for capture")]
    NotReady,

    #[error("PNG encode error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Lambert term with a fixed ambient floor; the normal is flipped to face the viewer.
pub fn shade_factor(normal: Vec3, to_viewer: Vec3, light_dir: Vec3) -> f32 {
    let n = if normal.dot(to_viewer) < 0.0 { -normal } else { normal };
    0.35 + 0.65 * n.dot(light_dir).max(0.0)
}

/// Key light: over the viewer's shoulder
pub fn light_direction(camera: &ArcBallCamera) -> Vec3 {
    ((camera.eye_position() - camera.target).normalize_or_zero() + Vec3::Y * 0.6).normalize_or_zero()
}

/// Render the scene into an RGBA image of `width` × `height` pixels.
pub fn capture(
    cache: &MeshCache,
    camera: &ArcBallCamera,
    background: &BackgroundState,
    width: u32,
    height: u32,
) -> Result<RgbaImage, SnapshotError> {
    if width == 0 || height == 0 {
        return Err(SnapshotError::NotReady);
    }

    let mut frame = fill_background(background, width, height);
    let mut depth = vec![f32::INFINITY; (width * height) as usize];

    let aspect = width as f32 / height as f32;
    let eye = camera.eye_position();
    let light = light_direction(camera);
    let size = Vec2::new(width as f32, height as f32);

    for cached in cache.meshes() {
        let mesh = &cached.mesh;
        for [i0, i1, i2] in mesh.triangles() {
            let world = [mesh.position(i0), mesh.position(i1), mesh.position(i2)];

            let mut screen = [Vec3::ZERO; 3];
            let mut visible = true;
            for (k, p) in world.iter().enumerate() {
                match camera.project_ndc(*p, aspect) {
                    Some((ndc, _)) => {
                        screen[k] = Vec3::new(
                            (ndc.x + 1.0) * 0.5 * size.x,
                            (1.0 - ndc.y) * 0.5 * size.y,
                            ndc.z,
                        );
                    }
                    None => visible = false,
                }
            }
            if !visible {
                continue;
            }

            let centroid = (world[0] + world[1] + world[2]) / 3.0;
            let shade = shade_factor(mesh.normal(i0), eye - centroid, light);
            let [r, g, b] = mesh.color(i0);
            let rgba = Rgba([
                to_byte(r * shade),
                to_byte(g * shade),
                to_byte(b * shade),
                255,
            ]);

            raster_triangle(&mut frame, &mut depth, screen, rgba);
        }
    }

    Ok(frame)
}

/// Encode a captured frame as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, SnapshotError> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

// ── Helpers ──────────────────────────────────────────────────

fn fill_background(background: &BackgroundState, width: u32, height: u32) -> RgbaImage {
    match background.image() {
        Some(img) => DynamicImage::ImageRgba8(img.pixels.clone())
            .resize_to_fill(width, height, FilterType::Triangle)
            .to_rgba8(),
        None => {
            let [r, g, b] = background.color;
            RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]))
        }
    }
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn edge(a: Vec3, b: Vec3, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

fn raster_triangle(frame: &mut RgbaImage, depth: &mut [f32], v: [Vec3; 3], color: Rgba<u8>) {
    let area = edge(v[0], v[1], v[2].x, v[2].y);
    if area.abs() < 1e-8 {
        return;
    }

    let (w, h) = frame.dimensions();
    let min_x = v.iter().map(|p| p.x).fold(f32::MAX, f32::min).floor().max(0.0) as u32;
    let min_y = v.iter().map(|p| p.y).fold(f32::MAX, f32::min).floor().max(0.0) as u32;
    let max_x = v.iter().map(|p| p.x).fold(f32::MIN, f32::max).ceil().min(w as f32 - 1.0);
    let max_y = v.iter().map(|p| p.y).fold(f32::MIN, f32::max).ceil().min(h as f32 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }

    for y in min_y..=max_y as u32 {
        for x in min_x..=max_x as u32 {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            // Barycentric weights; sign of `area` absorbs winding.
            let w0 = edge(v[1], v[2], px, py) / area;
            let w1 = edge(v[2], v[0], px, py) / area;
            let w2 = edge(v[0], v[1], px, py) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let z = w0 * v[0].z + w1 * v[1].z + w2 * v[2].z;
            if !(-1.0..=1.0).contains(&z) {
                continue;
            }
            let slot = (y * w + x) as usize;
            if z < depth[slot] {
                depth[slot] = z;
                frame.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetRegistry;
    use crate::state::scene::SceneState;
    use shared::{GeometryType, ObjectDraft};

    #[test]
    fn test_zero_size_not_ready() {
        let cache = MeshCache::new();
        let err = capture(&cache, &ArcBallCamera::new(), &BackgroundState::default(), 0, 10);
        assert!(matches!(err, Err(SnapshotError::NotReady)));
    }

    #[test]
    fn test_empty_scene_is_background() {
        let cache = MeshCache::new();
        let bg = BackgroundState {
            color: [10, 20, 30],
            ..Default::default()
        };
        let img = capture(&cache, &ArcBallCamera::new(), &bg, 16, 8).unwrap();
        assert_eq!(img.dimensions(), (16, 8));
        assert!(img.pixels().all(|p| p.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn test_object_covers_center_pixel() {
        let mut scene = SceneState::default();
        scene.insert(ObjectDraft::primitive("Box", GeometryType::Box).with_color([255, 0, 0]));
        let mut cache = MeshCache::new();
        cache.sync(&scene, &AssetRegistry::default());

        let bg = BackgroundState {
            color: [0, 0, 0],
            ..Default::default()
        };
        let img = capture(&cache, &ArcBallCamera::new(), &bg, 64, 48).unwrap();
        let center = img.get_pixel(32, 24);
        assert!(center.0[0] > 0, "box should be drawn at the image center");
        assert_eq!(center.0[1], 0);
        assert_eq!(center.0[2], 0);
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_encode_png_signature() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
