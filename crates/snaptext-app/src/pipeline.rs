use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use snaptext_io::{ClipboardSink, NoticeStyle, Notifier};
use snaptext_ocr::{OcrOutcome, Recognizer};
use tokio::sync::Mutex;

/// What one capture ended in, as reported to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineReport {
    Copied(String),
    NothingRecognized,
    Failed(String),
}

/// Capture -> temp PNG -> OCR -> clipboard + notification
///
/// Runs are serialized: the temp file is shared by every capture.
pub struct Pipeline {
    recognizer: Arc<dyn Recognizer>,
    clipboard: Arc<dyn ClipboardSink>,
    notifier: Arc<dyn Notifier>,
    style: NoticeStyle,
    capture_path: PathBuf,
    running: Mutex<()>,
}

impl Pipeline {
    pub fn new(
        recognizer: Arc<dyn Recognizer>,
        clipboard: Arc<dyn ClipboardSink>,
        notifier: Arc<dyn Notifier>,
        style: NoticeStyle,
        capture_path: PathBuf,
    ) -> Self {
        Self {
            recognizer,
            clipboard,
            notifier,
            style,
            capture_path,
            running: Mutex::new(()),
        }
    }

    pub async fn process(&self, image: RgbaImage) -> PipelineReport {
        let _running = self.running.lock().await;
        tracing::debug!(">>> [OCR] Processing {}x{} capture", image.width(), image.height());

        let path = self.capture_path.clone();
        let saved =
            tokio::task::spawn_blocking(move || snaptext_ocr::save_png(&image, &path)).await;
        match saved {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return self.fail(format!("{e:#}")),
            Err(e) => return self.fail(format!("Saving the capture panicked: {e}")),
        }

        match self.recognizer.recognize(&self.capture_path).await {
            OcrOutcome::Recognized(text) => {
                if let Err(e) = self.clipboard.set_text(&text) {
                    return self.fail(format!("{e:#}"));
                }
                tracing::info!("Copied {:?} to the clipboard", text);
                self.notifier
                    .notify(self.style.notice(format!("Copied \"{text}\" to the clipboard")));
                PipelineReport::Copied(text)
            }
            OcrOutcome::NoTextFound => {
                tracing::info!("Unable to read text from image, did not copy");
                self.notifier
                    .notify(self.style.notice("No text was recognized in this capture"));
                PipelineReport::NothingRecognized
            }
            OcrOutcome::RequestFailed(reason) => self.fail(reason),
        }
    }

    fn fail(&self, reason: String) -> PipelineReport {
        tracing::error!("An error occurred when trying to process the image: {}", reason);
        self.notifier.notify(
            self.style
                .notice(format!("An error occurred while recognizing the image: {reason}")),
        );
        PipelineReport::Failed(reason)
    }
}
