//! Factory functions for test data: drafts, mesh/image files on disk and
//! canned render services.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use base64::Engine;
use shared::*;

use crate::render::{RenderError, RenderFuture, RenderService, RenderedImage};

// ── Draft factories ─────────────────────────────────────────────

/// A named primitive draft at `pos`.
pub fn primitive_at(name: &str, geometry: GeometryType, pos: [f64; 3]) -> ObjectDraft {
    ObjectDraft::primitive(name, geometry).with_position(pos)
}

/// A unit box at the origin.
pub fn unit_box() -> ObjectDraft {
    ObjectDraft::primitive("Box", GeometryType::Box)
}

// ── Files ───────────────────────────────────────────────────────

/// Wavefront OBJ text for a unit cube centred on the origin (quads).
pub const CUBE_OBJ: &str = "\
o cube
v -0.5 -0.5 -0.5
v  0.5 -0.5 -0.5
v  0.5  0.5 -0.5
v -0.5  0.5 -0.5
v -0.5 -0.5  0.5
v  0.5 -0.5  0.5
v  0.5  0.5  0.5
v -0.5  0.5  0.5
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 3 4 8 7
f 2 3 7 6
f 1 5 8 4
";

/// Write [`CUBE_OBJ`] to `dir/<name>` and return the path.
pub fn write_cube_obj(dir: &Path, name: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, CUBE_OBJ)?;
    Ok(path)
}

/// Write a solid-color PNG to `dir/<name>` and return the path.
pub fn write_png(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    color: Color,
) -> Result<PathBuf, image::ImageError> {
    let path = dir.join(name);
    let [r, g, b] = color;
    image::RgbaImage::from_pixel(width, height, image::Rgba([r, g, b, 255])).save(&path)?;
    Ok(path)
}

// ── Render services ─────────────────────────────────────────────

/// Returns the same image for every call and records what it was sent.
#[derive(Default)]
pub struct StaticRenderService {
    pub image: Vec<u8>,
    pub calls: AtomicUsize,
    pub last_request: std::sync::Mutex<Option<RenderRequest>>,
}

impl StaticRenderService {
    pub fn new(image: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            image,
            ..Default::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RenderRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

impl RenderService for StaticRenderService {
    fn render(&self, request: RenderRequest) -> RenderFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }
        let response = RenderResponse {
            image_base64: base64::engine::general_purpose::STANDARD.encode(&self.image),
            mime_type: "image/png".to_string(),
        };
        Box::pin(async move { RenderedImage::from_response(response) })
    }
}

/// Fails every call with an upstream error.
#[derive(Default)]
pub struct FailingRenderService {
    pub calls: AtomicUsize,
}

impl FailingRenderService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RenderService for FailingRenderService {
    fn render(&self, _request: RenderRequest) -> RenderFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async {
            Err(RenderError::Status {
                status: 502,
                message: "upstream unavailable".to_string(),
            })
        })
    }
}
