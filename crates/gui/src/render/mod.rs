//! Bridge to the external image-generation service.
//!
//! The UI thread never blocks on the network: [`RenderBridge::submit`] spawns
//! the call on a private tokio runtime and hands back a oneshot receiver that
//! [`crate::state::render::RenderState`] polls once per frame.

mod error;
mod http;

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use base64::Engine;
use shared::{RenderRequest, RenderResponse};
use tokio::sync::oneshot;

pub use error::RenderError;
pub use http::HttpRenderService;

pub type RenderResult = Result<RenderedImage, RenderError>;
pub type RenderFuture<'a> = Pin<Box<dyn Future<Output = RenderResult> + Send + 'a>>;

/// Anything that turns a viewport capture into a generated image
pub trait RenderService: Send + Sync {
    fn render(&self, request: RenderRequest) -> RenderFuture<'_>;
}

/// Decoded result of a render call
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl RenderedImage {
    pub fn from_response(response: RenderResponse) -> Result<Self, RenderError> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(response.image_base64.trim())?;
        if bytes.is_empty() {
            return Err(RenderError::EmptyImage);
        }
        Ok(Self {
            bytes,
            mime_type: response.mime_type,
        })
    }

    /// Write the image bytes as-is
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, &self.bytes)?;
        tracing::info!("Saved render to {}", path.display());
        Ok(())
    }
}

/// Encode a PNG capture into a request
pub fn build_request(png: &[u8], prompt: &str, watermark: Option<String>) -> RenderRequest {
    let prompt = prompt.trim();
    RenderRequest {
        image_png_base64: base64::engine::general_purpose::STANDARD.encode(png),
        prompt: if prompt.is_empty() {
            shared::DEFAULT_RENDER_PROMPT.to_string()
        } else {
            prompt.to_string()
        },
        watermark,
    }
}

pub struct RenderBridge {
    runtime: tokio::runtime::Runtime,
    service: Arc<dyn RenderService>,
}

impl RenderBridge {
    pub fn new(service: Arc<dyn RenderService>) -> Result<Self, RenderError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("render-bridge")
            .enable_all()
            .build()?;
        Ok(Self { runtime, service })
    }

    pub fn http(endpoint: &str) -> Result<Self, RenderError> {
        Self::new(Arc::new(HttpRenderService::new(endpoint)))
    }

    /// Start one render call in the background
    pub fn submit(&self, request: RenderRequest) -> oneshot::Receiver<RenderResult> {
        let (tx, rx) = oneshot::channel();
        let service = Arc::clone(&self.service);
        self.runtime.spawn(async move {
            let result = service.render(request).await;
            // Receiver gone means the session was reset; nothing to report.
            let _ = tx.send(result);
        });
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl RenderService for Echo {
        fn render(&self, request: RenderRequest) -> RenderFuture<'_> {
            Box::pin(async move {
                RenderedImage::from_response(RenderResponse {
                    image_base64: request.image_png_base64,
                    mime_type: "image/png".into(),
                })
            })
        }
    }

    #[test]
    fn test_build_request_defaults_prompt() {
        let req = build_request(b"abc", "  ", None);
        assert_eq!(req.prompt, shared::DEFAULT_RENDER_PROMPT);
        assert_eq!(req.image_png_base64, "YWJj");

        let req = build_request(b"abc", "matte", Some("ACME".into()));
        assert_eq!(req.prompt, "matte");
        assert_eq!(req.watermark.as_deref(), Some("ACME"));
    }

    #[test]
    fn test_empty_image_rejected() {
        let err = RenderedImage::from_response(RenderResponse {
            image_base64: String::new(),
            mime_type: "image/png".into(),
        })
        .unwrap_err();
        assert!(matches!(err, RenderError::EmptyImage));
    }

    #[test]
    fn test_bad_base64_rejected() {
        let err = RenderedImage::from_response(RenderResponse {
            image_base64: "!!not base64!!".into(),
            mime_type: "image/png".into(),
        })
        .unwrap_err();
        assert!(matches!(err, RenderError::Decode(_)));
    }

    #[test]
    fn test_bridge_round_trip() {
        let bridge = RenderBridge::new(Arc::new(Echo)).unwrap();
        let rx = bridge.submit(build_request(b"png-bytes", "p", None));
        let result = rx.blocking_recv().unwrap().unwrap();
        assert_eq!(result.bytes, b"png-bytes");
    }

    #[test]
    fn test_http_unreachable_is_error() {
        let bridge = RenderBridge::http("http://127.0.0.1:9/api/render").unwrap();
        let rx = bridge.submit(build_request(b"x", "p", None));
        let result = rx.blocking_recv().unwrap();
        assert!(matches!(result, Err(RenderError::Http(_))));
    }

    #[test]
    fn test_save_to() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(shared::RENDER_FILE_NAME);
        let img = RenderedImage {
            bytes: vec![1, 2, 3],
            mime_type: "image/png".into(),
        };
        img.save_to(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }
}
