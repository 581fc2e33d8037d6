//! Render request lifecycle: single in-flight call, result, failure alert

use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::render::{build_request, RenderBridge, RenderResult, RenderedImage};

pub const RENDER_FAILED_ALERT: &str = "Rendering failed. Please try again.";

/// What [`RenderState::poll`] observed this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Finished,
    Failed,
}

#[derive(Default)]
pub struct RenderState {
    pub prompt: String,
    rendering: bool,
    result: Option<RenderedImage>,
    pending: Option<oneshot::Receiver<RenderResult>>,
    alert: Option<String>,
    /// Bumped for every stored result
    revision: u64,
    /// Result window open
    pub show_result: bool,
}

impl RenderState {
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    pub fn result(&self) -> Option<&RenderedImage> {
        self.result.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Submit a capture. Returns false while another render is in flight.
    pub fn start(
        &mut self,
        bridge: &RenderBridge,
        png: Vec<u8>,
        prompt: &str,
        watermark: Option<String>,
    ) -> bool {
        if self.rendering {
            tracing::debug!("Render already in progress, request ignored");
            return false;
        }

        let request = build_request(&png, prompt, watermark);
        tracing::info!(
            "Render started ({} bytes capture, watermark: {})",
            png.len(),
            request.watermark.is_some()
        );

        self.pending = Some(bridge.submit(request));
        self.rendering = true;
        self.result = None;
        self.show_result = false;
        true
    }

    /// Check the in-flight call without blocking
    pub fn poll(&mut self) -> Option<RenderOutcome> {
        let rx = self.pending.as_mut()?;
        let received = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(crate::render::RenderError::Dropped),
        };

        self.pending = None;
        self.rendering = false;

        match received {
            Ok(image) => {
                tracing::info!("Render finished ({} bytes, {})", image.bytes.len(), image.mime_type);
                self.result = Some(image);
                self.revision += 1;
                self.show_result = true;
                Some(RenderOutcome::Finished)
            }
            Err(e) => {
                tracing::error!("Render failed: {}", e);
                self.alert = Some(RENDER_FAILED_ALERT.to_string());
                Some(RenderOutcome::Failed)
            }
        }
    }

    /// Forget the result and any in-flight call
    pub fn reset(&mut self) {
        self.pending = None;
        self.rendering = false;
        self.result = None;
        self.alert = None;
        self.show_result = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderError, RenderFuture, RenderService};
    use shared::RenderRequest;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct Failing;

    impl RenderService for Failing {
        fn render(&self, _request: RenderRequest) -> RenderFuture<'_> {
            Box::pin(async {
                Err(RenderError::Status {
                    status: 500,
                    message: "boom".into(),
                })
            })
        }
    }

    struct Slow;

    impl RenderService for Slow {
        fn render(&self, _request: RenderRequest) -> RenderFuture<'_> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(RenderError::Dropped)
            })
        }
    }

    fn wait(state: &mut RenderState) -> RenderOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(outcome) = state.poll() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "render did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_failure_sets_alert_once() {
        let bridge = RenderBridge::new(Arc::new(Failing)).unwrap();
        let mut state = RenderState::default();
        assert!(state.start(&bridge, vec![1], "p", None));
        assert!(state.is_rendering());

        assert_eq!(wait(&mut state), RenderOutcome::Failed);
        assert!(!state.is_rendering());
        assert!(state.result().is_none());
        assert_eq!(state.alert(), Some(RENDER_FAILED_ALERT));
        assert_eq!(state.poll(), None);
    }

    #[test]
    fn test_single_flight() {
        let bridge = RenderBridge::new(Arc::new(Slow)).unwrap();
        let mut state = RenderState::default();
        assert!(state.start(&bridge, vec![1], "p", None));
        assert!(!state.start(&bridge, vec![2], "p", None));
        assert_eq!(state.poll(), None);
        assert!(state.is_rendering());
    }

    #[test]
    fn test_poll_idle() {
        let mut state = RenderState::default();
        assert_eq!(state.poll(), None);
        assert!(!state.is_rendering());
    }
}
