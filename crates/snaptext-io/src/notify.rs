use std::path::PathBuf;
use std::time::Duration;

use notify_rust::{Notification, Timeout};

/// One desktop notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub icon: Option<PathBuf>,
    pub timeout: Duration,
}

impl Notice {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            icon: None,
            timeout: Duration::from_secs(2),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<PathBuf>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Shared title, icon and timeout for every notice the app sends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeStyle {
    pub title: String,
    pub icon: Option<PathBuf>,
    pub timeout: Duration,
}

impl NoticeStyle {
    pub fn new(title: impl Into<String>, timeout: Duration) -> Self {
        Self {
            title: title.into(),
            icon: None,
            timeout,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<PathBuf>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn notice(&self, body: impl Into<String>) -> Notice {
        Notice {
            title: self.title.clone(),
            body: body.into(),
            icon: self.icon.clone(),
            timeout: self.timeout,
        }
    }
}

/// Fire-and-forget user notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Show `notice` and wait until the notification service accepted it
pub fn show_notice(notice: &Notice) -> Result<(), notify_rust::error::Error> {
    let mut notification = Notification::new();
    notification
        .summary(&notice.title)
        .body(&notice.body)
        .timeout(Timeout::Milliseconds(
            notice.timeout.as_millis().min(u32::MAX as u128) as u32,
        ));

    if let Some(icon) = &notice.icon {
        notification.icon(&icon.to_string_lossy());
    }

    notification.show().map(|_| ())
}

/// Sends notices through the OS notification service
///
/// Every notice is shown from its own short-lived thread; failures are
/// logged and otherwise ignored.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!("Notify: {} - {}", notice.title, notice.body);
        std::thread::spawn(move || {
            if let Err(e) = show_notice(&notice) {
                tracing::warn!("Failed to show notification: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_defaults() {
        let notice = Notice::new("Screenshot OCR", "Copied");
        assert_eq!(notice.icon, None);
        assert_eq!(notice.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_style_fills_notice() {
        let style =
            NoticeStyle::new("Screenshot OCR", Duration::from_secs(3)).with_icon("icon.ico");
        let notice = style.notice("No text recognized");
        assert_eq!(notice.title, "Screenshot OCR");
        assert_eq!(notice.body, "No text recognized");
        assert_eq!(notice.icon, Some(PathBuf::from("icon.ico")));
        assert_eq!(notice.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_notice_builder() {
        let notice = Notice::new("t", "b")
            .with_icon("res/icon.ico")
            .with_timeout(Duration::from_millis(500));
        assert_eq!(notice.icon, Some(PathBuf::from("res/icon.ico")));
        assert_eq!(notice.timeout, Duration::from_millis(500));
    }
}
