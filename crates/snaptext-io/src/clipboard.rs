use std::sync::Mutex;

use anyhow::{Context, anyhow};
use arboard::Clipboard;

/// Destination for recognized text
pub trait ClipboardSink: Send + Sync {
    /// Replace the clipboard contents with `text`
    fn set_text(&self, text: &str) -> anyhow::Result<()>;
}

/// The system clipboard
///
/// Holds on to one `arboard::Clipboard` for the process lifetime, some
/// platforms drop the contents together with the last handle.
pub struct SystemClipboard {
    inner: Mutex<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> anyhow::Result<Self> {
        let clipboard = Clipboard::new().context("Failed to open clipboard")?;
        Ok(Self {
            inner: Mutex::new(clipboard),
        })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = self
            .inner
            .lock()
            .map_err(|_| anyhow!("Clipboard lock poisoned"))?;
        clipboard
            .set_text(text.to_owned())
            .context("Failed to write clipboard")?;
        tracing::debug!("Clipboard updated with {} chars", text.len());
        Ok(())
    }
}
