mod capture;
mod client;
mod hotkey;

pub use capture::{capture_primary_screen, encode_png, save_png};
pub use client::{OcrClient, OcrOutcome, Recognizer, SUCCESS_STATUS, parse_response};
pub use hotkey::{HotkeyError, HotkeyManager, is_press_of, parse_hotkey};
