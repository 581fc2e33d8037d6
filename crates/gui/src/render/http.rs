//! JSON-over-HTTP client for the render relay

use shared::{RenderRequest, RenderResponse};

use super::{RenderError, RenderFuture, RenderService, RenderedImage};

pub struct HttpRenderService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRenderService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: RenderRequest) -> Result<RenderedImage, RenderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RenderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: RenderResponse = response.json().await?;
        RenderedImage::from_response(body)
    }
}

impl RenderService for HttpRenderService {
    fn render(&self, request: RenderRequest) -> RenderFuture<'_> {
        Box::pin(self.post(request))
    }
}
