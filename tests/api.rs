//! End-to-end tests of the control surface

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use rounded_timer::{
    create_router,
    services::Alarm,
    state::{AppState, ManualClock},
    tasks::pulse,
};

struct CountingAlarm(Arc<AtomicU64>);

impl Alarm for CountingAlarm {
    fn ring(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    state: Arc<AppState>,
    clock: Arc<ManualClock>,
    rings: Arc<AtomicU64>,
}

impl Harness {
    fn new() -> Self {
        let clock = Arc::new(ManualClock::new(0));
        let rings = Arc::new(AtomicU64::new(0));
        let state = Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            (300, 300),
            clock.clone(),
            Box::new(CountingAlarm(rings.clone())),
        ));
        Self { state, clock, rings }
    }

    fn router(&self) -> Router {
        create_router(Arc::clone(&self.state))
    }

    /// Advance the clock in 100ms ticks, pulsing the ticker each time
    fn run_for(&self, millis: u64) {
        for _ in 0..millis / 100 {
            self.clock.advance(100);
            pulse(&self.state);
        }
    }

    async fn post_form(&self, path: &str, form: &str) -> (StatusCode, Value) {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn post(&self, path: &str) -> (StatusCode, Value) {
        self.send(Request::post(path).body(Body::empty()).unwrap()).await
    }

    async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        self.send(Request::get(path).body(Body::empty()).unwrap()).await
    }

    async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

#[tokio::test]
async fn ten_second_countdown_expires_once() {
    let h = Harness::new();

    let (status, body) = h.post_form("/start", "minutes=0&seconds=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["remaining_millis"], 10_000);
    assert_eq!(body["timer"]["display"], "00:10");

    h.run_for(9_900);
    assert_eq!(h.rings.load(Ordering::SeqCst), 0);

    h.run_for(2_000);
    assert_eq!(h.rings.load(Ordering::SeqCst), 1);

    let (_, status) = h.get_json("/status").await;
    assert_eq!(status["timer"]["running"], false);
    assert_eq!(status["timer"]["alerts"], 1);
    assert_eq!(status["last_action"], "start");
}

#[tokio::test]
async fn repeat_rearms_after_expiry() {
    let h = Harness::new();

    let (status, body) = h
        .post_form("/start", "minutes=0&seconds=5&repeat=on&repeat_minutes=0&repeat_seconds=3")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["repeat_interval_millis"], 3_000);

    h.run_for(5_000);
    assert_eq!(h.rings.load(Ordering::SeqCst), 1);

    let (_, status) = h.get_json("/status").await;
    assert_eq!(status["timer"]["running"], true);
    assert_eq!(status["timer"]["remaining_millis"], 3_000);

    h.run_for(3_000);
    assert_eq!(h.rings.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn invalid_text_is_reported_and_state_untouched() {
    let h = Harness::new();
    h.post_form("/start", "minutes=1&seconds=0").await;
    h.run_for(1_000);
    let before = h.state.get_timer_state().unwrap();

    let (status, body) = h.post_form("/start", "minutes=abc&seconds=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Enter valid numbers.");
    assert_eq!(body["field"], "minutes");
    assert_eq!(h.state.get_timer_state().unwrap(), before);

    // A bad repeat field must not half-start the timer either
    let (status, _) = h
        .post_form("/start", "minutes=0&seconds=5&repeat=on&repeat_minutes=0&repeat_seconds=x")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.state.get_timer_state().unwrap(), before);
}

#[tokio::test]
async fn zero_duration_is_ignored() {
    let h = Harness::new();

    let (status, body) = h.post_form("/start", "minutes=0&seconds=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["timer"]["running"], false);
}

#[tokio::test]
async fn stop_freezes_last_duration_and_reset_clears_it() {
    let h = Harness::new();
    h.post_form("/start", "minutes=2&seconds=5").await;
    h.run_for(30_000);

    let (status, body) = h.post("/stop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["display"], "02:05");

    h.run_for(1_000);
    let (_, svg) = h.get_text("/dial.svg").await;
    assert!(svg.contains(">02:05</text>"));

    let (_, body) = h.post("/reset").await;
    assert_eq!(body["timer"]["remaining_millis"], 0);

    // Reset repaints without waiting for a tick
    let (_, svg) = h.get_text("/dial.svg").await;
    assert!(svg.contains(">00:00</text>"));
}

#[tokio::test]
async fn dial_can_be_painted_at_any_size() {
    let h = Harness::new();

    let response = h
        .router()
        .oneshot(Request::get("/dial.svg?width=12&height=8").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let svg = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(svg.contains("width=\"12\" height=\"8\""));
    assert!(!svg.contains("<ellipse"));
}

#[tokio::test]
async fn page_and_health_are_served() {
    let h = Harness::new();

    let (status, page) = h.get_text("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<title>Rounded Timer</title>"));
    assert!(page.contains("name=\"repeat_seconds\" value=\"30\""));

    let (status, health) = h.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
}
