use image::RgbaImage;

/// Events consumed by the backend event loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    ShowRequested(Trigger),
    QuitRequested,
    /// Cropped region of the captured screen, in physical pixels
    CaptureComplete(RgbaImage),
    SelectionCancelled,
}

/// What asked for the selector to be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Hotkey,
    TrayClick,
    TrayMenu,
}

/// Commands sent from the backend to the UI thread
#[derive(Debug, Clone)]
pub enum UiCommand {
    /// Full screen capture to use as the selector background
    ShowSelector(RgbaImage),
    Quit,
}

/// Pixel rectangle inside a screen capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRegion {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
