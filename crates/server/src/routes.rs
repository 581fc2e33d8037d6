use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use shared::{RenderRequest, RenderResponse};

use crate::upstream::UpstreamError;
use crate::AppState;

/// Health check
pub async fn health() -> &'static str {
    "ok"
}

/// Render endpoint: forwards the capture and instruction upstream
pub async fn render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, (StatusCode, Json<Value>)> {
    if request.image_png_base64.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "image_png_base64 is empty" })),
        ));
    }

    tracing::info!(
        "Render request ({} base64 chars, watermark: {})",
        request.image_png_base64.len(),
        request.watermark.is_some()
    );

    match state.upstream.render(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(e @ UpstreamError::InvalidCapture(_)) => {
            tracing::warn!("Rejected render request: {}", e);
            Err((StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
        }
        Err(e) => {
            tracing::error!("Upstream render failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::upstream::{UpstreamClient, UpstreamConfig};

    fn state(url: &str) -> AppState {
        AppState {
            upstream: Arc::new(UpstreamClient::new(UpstreamConfig {
                url: url.to_string(),
                api_key: None,
                model: "test".to_string(),
            })),
        }
    }

    fn request(image: &str) -> RenderRequest {
        RenderRequest {
            image_png_base64: image.to_string(),
            prompt: "studio".to_string(),
            watermark: None,
        }
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn test_empty_image_rejected() {
        let err = render(State(state("http://127.0.0.1:9")), Json(request(" ")))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_capture_rejected() {
        let err = render(State(state("http://127.0.0.1:9")), Json(request("%%%")))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let err = render(State(state("http://127.0.0.1:9/v1")), Json(request("iVBORw0=")))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_GATEWAY);
        assert!(err.1 .0["error"].is_string());
    }
}
