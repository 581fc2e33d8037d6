use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Render service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid image payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Render service returned an empty image")]
    EmptyImage,

    #[error("Render task ended without a result")]
    Dropped,

    #[error("Failed to start render runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
