use std::sync::{Arc, Mutex};
use std::time::Duration;

use image::RgbaImage;
use snaptext_types::{AppEvent, Trigger};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::controller::ShellHandler;
use crate::events::event_loop;

#[derive(Default)]
struct FakeHandler {
    calls: Mutex<Vec<String>>,
    /// Capture processing never finishes, like a hanging OCR endpoint
    hang_on_capture: bool,
}

impl FakeHandler {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait::async_trait]
impl ShellHandler for FakeHandler {
    async fn on_show_requested(&self, trigger: Trigger) -> anyhow::Result<()> {
        self.record(format!("show:{trigger:?}"));
        Ok(())
    }

    async fn on_quit_requested(&self) -> anyhow::Result<()> {
        self.record("quit");
        Ok(())
    }

    async fn on_capture_complete(&self, image: RgbaImage) -> anyhow::Result<()> {
        if self.hang_on_capture {
            std::future::pending::<()>().await;
        }
        self.record(format!("capture:{}x{}", image.width(), image.height()));
        Ok(())
    }

    async fn on_selection_cancelled(&self) {
        self.record("cancelled");
    }
}

#[tokio::test]
async fn test_events_dispatched_in_order() {
    let handler = Arc::new(FakeHandler::default());
    let (tx, rx) = kanal::bounded_async(16);

    tx.send(AppEvent::ShowRequested(Trigger::Hotkey)).await.unwrap();
    tx.send(AppEvent::SelectionCancelled).await.unwrap();
    tx.send(AppEvent::ShowRequested(Trigger::TrayClick)).await.unwrap();
    tx.send(AppEvent::CaptureComplete(RgbaImage::new(3, 2)))
        .await
        .unwrap();
    drop(tx);

    timeout(
        Duration::from_secs(2),
        event_loop(handler.clone(), rx, CancellationToken::new()),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(
        handler.calls(),
        vec![
            "show:Hotkey".to_string(),
            "cancelled".to_string(),
            "show:TrayClick".to_string(),
            "capture:3x2".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_quit_stops_loop_with_senders_alive() {
    let handler = Arc::new(FakeHandler::default());
    let (tx, rx) = kanal::bounded_async(16);

    tx.send(AppEvent::QuitRequested).await.unwrap();
    tx.send(AppEvent::ShowRequested(Trigger::Hotkey)).await.unwrap();

    timeout(
        Duration::from_secs(2),
        event_loop(handler.clone(), rx, CancellationToken::new()),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(handler.calls(), vec!["quit".to_string()]);
    drop(tx);
}

#[tokio::test]
async fn test_quit_abandons_hanging_capture() {
    let handler = Arc::new(FakeHandler {
        hang_on_capture: true,
        ..Default::default()
    });
    let (tx, rx) = kanal::bounded_async(16);

    tx.send(AppEvent::CaptureComplete(RgbaImage::new(1, 1)))
        .await
        .unwrap();
    tx.send(AppEvent::QuitRequested).await.unwrap();

    let result = timeout(
        Duration::from_secs(2),
        event_loop(handler.clone(), rx, CancellationToken::new()),
    )
    .await;

    assert!(result.is_ok(), "quit must not wait for the OCR call");
    assert_eq!(handler.calls(), vec!["quit".to_string()]);
    drop(tx);
}

#[tokio::test]
async fn test_cancellation_stops_loop() {
    let handler = Arc::new(FakeHandler::default());
    let (tx, rx) = kanal::bounded_async::<AppEvent>(16);
    let cancel = CancellationToken::new();

    let task = tokio::spawn(event_loop(handler.clone(), rx, cancel.child_token()));
    tx.send(AppEvent::ShowRequested(Trigger::TrayMenu))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();

    timeout(Duration::from_secs(2), task)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(handler.calls(), vec!["show:TrayMenu".to_string()]);
}
