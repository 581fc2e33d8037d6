//! Integration tests for the render round trip: capture, request, result,
//! failure alert and download.

use std::time::Duration;

use base64::Engine;
use studio_gui_lib::fixtures::{self, FailingRenderService, StaticRenderService};
use studio_gui_lib::harness::TestHarness;
use studio_gui_lib::render::RenderBridge;
use studio_gui_lib::state::{RenderOutcome, RENDER_FAILED_ALERT};

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn test_render_success_stores_result() {
    let service = StaticRenderService::new(b"fake-png".to_vec());
    let bridge = RenderBridge::new(service.clone()).unwrap();

    let mut h = TestHarness::new();
    h.add(fixtures::unit_box());
    assert!(h.request_render(&bridge));
    assert!(h.state.render.is_rendering());

    assert_eq!(h.wait_for_render(WAIT), Some(RenderOutcome::Finished));
    assert!(!h.state.render.is_rendering());
    assert!(h.state.render.show_result);
    assert_eq!(h.state.render.result().unwrap().bytes, b"fake-png");
    assert!(h.state.render.alert().is_none());
    assert_eq!(service.call_count(), 1);

    let request = service.last_request().unwrap();
    let capture = base64::engine::general_purpose::STANDARD
        .decode(request.image_png_base64)
        .unwrap();
    assert_eq!(&capture[1..4], b"PNG");
    assert!(request.watermark.is_none());
}

#[test]
fn test_watermark_reaches_request() {
    let service = StaticRenderService::new(vec![1, 2, 3]);
    let bridge = RenderBridge::new(service.clone()).unwrap();

    let mut h = TestHarness::new();
    h.state.watermark.enabled = true;
    h.state.watermark.text = "  ACME  ".to_string();
    h.request_render(&bridge);
    h.wait_for_render(WAIT);

    let request = service.last_request().unwrap();
    assert_eq!(request.watermark.as_deref(), Some("ACME"));
    assert!(request.instruction().contains("\"ACME\""));
}

#[test]
fn test_blank_prompt_uses_default() {
    let service = StaticRenderService::new(vec![1]);
    let bridge = RenderBridge::new(service.clone()).unwrap();

    let mut h = TestHarness::new();
    h.state.render.prompt = "   ".to_string();
    h.request_render(&bridge);
    h.wait_for_render(WAIT);

    assert_eq!(service.last_request().unwrap().prompt, shared::DEFAULT_RENDER_PROMPT);
}

#[test]
fn test_render_failure_raises_one_alert() {
    let service = FailingRenderService::new();
    let bridge = RenderBridge::new(service.clone()).unwrap();

    let mut h = TestHarness::new();
    h.add(fixtures::unit_box());
    assert!(h.request_render(&bridge));

    assert_eq!(h.wait_for_render(WAIT), Some(RenderOutcome::Failed));
    assert!(!h.state.render.is_rendering());
    assert!(h.state.render.result().is_none());
    assert_eq!(h.state.render.alert(), Some(RENDER_FAILED_ALERT));
    assert_eq!(service.call_count(), 1);

    // Settled: further polls report nothing new
    assert_eq!(h.state.render.poll(), None);

    h.state.render.dismiss_alert();
    assert!(h.state.render.alert().is_none());
}

#[test]
fn test_retry_after_failure() {
    let failing = FailingRenderService::new();
    let bridge = RenderBridge::new(failing).unwrap();
    let mut h = TestHarness::new();
    h.request_render(&bridge);
    h.wait_for_render(WAIT);

    let ok = StaticRenderService::new(vec![9]);
    let bridge = RenderBridge::new(ok.clone()).unwrap();
    assert!(h.request_render(&bridge));
    assert_eq!(h.wait_for_render(WAIT), Some(RenderOutcome::Finished));
    assert_eq!(ok.call_count(), 1);
}

#[test]
fn test_missing_capture_aborts() {
    let service = StaticRenderService::new(vec![1]);
    let bridge = RenderBridge::new(service.clone()).unwrap();

    let mut h = TestHarness::new();
    assert!(!h.state.request_render(&bridge, None));
    assert!(!h.state.render.is_rendering());
    assert_eq!(service.call_count(), 0);
}

#[test]
fn test_download_writes_result() {
    let service = StaticRenderService::new(b"rendered".to_vec());
    let bridge = RenderBridge::new(service).unwrap();

    let mut h = TestHarness::new();
    h.request_render(&bridge);
    h.wait_for_render(WAIT);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(shared::RENDER_FILE_NAME);
    h.state.render.result().unwrap().save_to(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"rendered");
}
