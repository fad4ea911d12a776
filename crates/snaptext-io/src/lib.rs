pub mod clipboard;
pub mod notify;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use notify::{DesktopNotifier, Notice, NoticeStyle, Notifier, show_notice};
