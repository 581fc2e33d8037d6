//! Scene background: a solid color or an image file

use std::path::{Path, PathBuf};

use image::RgbaImage;
use shared::Color;

use crate::assets::AssetError;

pub struct BackgroundImage {
    pub path: PathBuf,
    pub pixels: RgbaImage,
}

#[derive(Default)]
pub struct BackgroundState {
    pub color: Color,
    pub(crate) image: Option<BackgroundImage>,
    /// Bumped whenever the image changes so the painter can refresh its texture
    pub(crate) revision: u64,
}

impl BackgroundState {
    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn image(&self) -> Option<&BackgroundImage> {
        self.image.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Decode a PNG/JPEG file and use it as the background
    pub fn set_image(&mut self, path: &Path) -> Result<(), AssetError> {
        let pixels = image::open(path)?.to_rgba8();
        tracing::info!(
            "Background image {} ({}x{})",
            path.display(),
            pixels.width(),
            pixels.height()
        );
        self.image = Some(BackgroundImage {
            path: path.to_path_buf(),
            pixels,
        });
        self.revision += 1;
        Ok(())
    }

    pub fn clear_image(&mut self) {
        if self.image.take().is_some() {
            self.revision += 1;
        }
    }
}
