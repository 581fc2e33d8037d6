//! Asset loading errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("OBJ parse error on line {line}: {message}")]
    Obj { line: usize, message: String },

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("File contains no triangles: {0}")]
    EmptyMesh(String),
}
