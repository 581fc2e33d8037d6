//! Client for the upstream image-generation API.
//!
//! The upstream is an image-edit endpoint taking a multipart form: `model`,
//! `prompt` and the source PNG as the `image` file part. It answers with a
//! base64 image, either as `image_base64` or in the `data[0].b64_json` form.

use base64::Engine;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use shared::{RenderRequest, RenderResponse};
use thiserror::Error;

const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/images/edits";
const DEFAULT_MODEL: &str = "gpt-image-1";
const CAPTURE_FILE_NAME: &str = "scene.png";

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("upstream response has no image")]
    MissingImage,

    #[error("capture is not valid base64: {0}")]
    InvalidCapture(#[from] base64::DecodeError),
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl UpstreamConfig {
    /// `RENDER_UPSTREAM_URL`, `RENDER_API_KEY`, `RENDER_MODEL`
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| var(name).filter(|v| !v.trim().is_empty());
        Self {
            url: non_blank("RENDER_UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
            api_key: non_blank("RENDER_API_KEY"),
            model: non_blank("RENDER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

pub struct UpstreamClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub async fn render(&self, request: &RenderRequest) -> Result<RenderResponse, UpstreamError> {
        let png = base64::engine::general_purpose::STANDARD.decode(request.image_png_base64.trim())?;
        let image = Part::bytes(png)
            .file_name(CAPTURE_FILE_NAME)
            .mime_str("image/png")?;
        let form = Form::new()
            .text("model", self.config.model.clone())
            .text("prompt", request.instruction())
            .part("image", image);

        let mut call = self.client.post(&self.config.url).multipart(form);
        if let Some(key) = &self.config.api_key {
            call = call.bearer_auth(key);
        }

        let response = call.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        extract_image(&body)
    }
}

/// Pull the generated image out of an upstream response body
pub fn extract_image(body: &Value) -> Result<RenderResponse, UpstreamError> {
    let image = body["image_base64"]
        .as_str()
        .or_else(|| body.pointer("/data/0/b64_json").and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .ok_or(UpstreamError::MissingImage)?;

    let mime_type = body["mime_type"].as_str().unwrap_or("image/png");

    Ok(RenderResponse {
        image_base64: image.to_string(),
        mime_type: mime_type.to_string(),
    })
}
