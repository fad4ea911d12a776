use serde::{Deserialize, Serialize};

fn default_title() -> String {
    "Screenshot OCR".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NotificationConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// How long a notification stays on screen
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
