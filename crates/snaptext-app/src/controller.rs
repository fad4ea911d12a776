use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use image::RgbaImage;
use kanal::{AsyncReceiver, AsyncSender};
use snaptext_io::{NoticeStyle, Notifier};
use snaptext_types::{AppEvent, Trigger, UiCommand};

use crate::pipeline::{Pipeline, PipelineReport};

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<UiCommand>, AsyncReceiver<UiCommand>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(8),
            ui_to_app: kanal::bounded_async(64), // hotkey, tray and selector events
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// What the tray shell and the selector can ask of the app
#[async_trait::async_trait]
pub trait ShellHandler: Send + Sync {
    async fn on_show_requested(&self, trigger: Trigger) -> anyhow::Result<()>;
    async fn on_quit_requested(&self) -> anyhow::Result<()>;
    async fn on_capture_complete(&self, image: RgbaImage) -> anyhow::Result<()>;
    async fn on_selection_cancelled(&self);
}

/// Source of the full screen image behind the selector
pub trait ScreenSource: Send + Sync {
    fn capture(&self) -> anyhow::Result<RgbaImage>;
}

pub struct PrimaryScreen;

impl ScreenSource for PrimaryScreen {
    fn capture(&self) -> anyhow::Result<RgbaImage> {
        snaptext_ocr::capture_primary_screen()
    }
}

pub struct TrayController {
    screen: Arc<dyn ScreenSource>,
    pipeline: Pipeline,
    notifier: Arc<dyn Notifier>,
    style: NoticeStyle,
    ui_tx: AsyncSender<UiCommand>,
    selector_open: AtomicBool,
}

impl TrayController {
    pub fn new(
        screen: Arc<dyn ScreenSource>,
        pipeline: Pipeline,
        notifier: Arc<dyn Notifier>,
        style: NoticeStyle,
        ui_tx: AsyncSender<UiCommand>,
    ) -> Self {
        Self {
            screen,
            pipeline,
            notifier,
            style,
            ui_tx,
            selector_open: AtomicBool::new(false),
        }
    }

    pub fn selector_open(&self) -> bool {
        self.selector_open.load(Ordering::SeqCst)
    }

    /// Same as `on_capture_complete`, returning what the user was told
    pub async fn complete_capture(&self, image: RgbaImage) -> PipelineReport {
        self.selector_open.store(false, Ordering::SeqCst);
        self.pipeline.process(image).await
    }

    async fn present_selector(&self) -> anyhow::Result<()> {
        let screen = self.screen.clone();
        let image = tokio::task::spawn_blocking(move || screen.capture())
            .await
            .context("Screen capture task failed")??;

        tracing::debug!(">>> [OCR] Captured screen {}x{}", image.width(), image.height());
        self.ui_tx
            .send(UiCommand::ShowSelector(image))
            .await
            .context("UI is no longer listening")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ShellHandler for TrayController {
    async fn on_show_requested(&self, trigger: Trigger) -> anyhow::Result<()> {
        if self.selector_open.swap(true, Ordering::SeqCst) {
            tracing::debug!("Selector already open, ignoring {:?}", trigger);
            return Ok(());
        }
        tracing::info!("Showing selector ({:?})", trigger);

        if let Err(e) = self.present_selector().await {
            self.selector_open.store(false, Ordering::SeqCst);
            self.notifier
                .notify(self.style.notice(format!("Failed to capture the screen: {e:#}")));
            return Err(e);
        }
        Ok(())
    }

    async fn on_quit_requested(&self) -> anyhow::Result<()> {
        tracing::info!("Quit requested");
        self.ui_tx
            .send(UiCommand::Quit)
            .await
            .context("UI is no longer listening")?;
        Ok(())
    }

    async fn on_capture_complete(&self, image: RgbaImage) -> anyhow::Result<()> {
        let report = self.complete_capture(image).await;
        tracing::debug!(">>> [OCR] Capture finished: {:?}", report);
        Ok(())
    }

    async fn on_selection_cancelled(&self) {
        tracing::debug!("Selector closed without a selection");
        self.selector_open.store(false, Ordering::SeqCst);
    }
}
