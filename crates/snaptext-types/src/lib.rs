pub mod types;

pub use types::{AppEvent, CaptureRegion, Trigger, UiCommand};
