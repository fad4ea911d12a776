//! Recording fakes and a mock OCR endpoint shared by the app tests

use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use axum::routing::post;
use axum::{Json, Router};
use image::{Rgba, RgbaImage};
use serde_json::Value;
use snaptext_io::{ClipboardSink, Notice, NoticeStyle, Notifier};
use tokio::net::TcpListener;

use crate::controller::ScreenSource;

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn bodies(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.body.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub texts: Mutex<Vec<String>>,
    pub broken: bool,
}

impl RecordingClipboard {
    pub fn broken() -> Self {
        Self {
            texts: Mutex::new(Vec::new()),
            broken: true,
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&self, text: &str) -> anyhow::Result<()> {
        if self.broken {
            return Err(anyhow!("clipboard unavailable"));
        }
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Screen made of a single colour
pub struct FakeScreen {
    pub width: u32,
    pub height: u32,
}

impl ScreenSource for FakeScreen {
    fn capture(&self) -> anyhow::Result<RgbaImage> {
        Ok(RgbaImage::from_pixel(
            self.width,
            self.height,
            Rgba([30, 30, 30, 255]),
        ))
    }
}

pub struct BrokenScreen;

impl ScreenSource for BrokenScreen {
    fn capture(&self) -> anyhow::Result<RgbaImage> {
        Err(anyhow!("no monitor found"))
    }
}

pub fn style() -> NoticeStyle {
    NoticeStyle::new("Screenshot OCR", Duration::from_secs(2))
}

pub fn sample_capture() -> RgbaImage {
    RgbaImage::from_pixel(16, 8, Rgba([255, 255, 255, 255]))
}

/// Serve `reply` for every POST to `/ocr`, returns the endpoint URL
pub async fn spawn_mock_ocr(reply: Value) -> String {
    let app = Router::new().route("/ocr", post(move || async move { Json(reply) }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/ocr")
}

/// URL of a port nothing listens on
pub async fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/ocr")
}
