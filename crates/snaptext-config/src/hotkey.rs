use std::fmt;

use serde::{Deserialize, Serialize};

/// Two-key global hotkey as written in the config: `["alt", "r"]`
///
/// Only the shape is checked here. Whether the names map to real keys is
/// decided when the hotkey is parsed for registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct HotkeyConfig {
    pub modifier: String,
    pub key: String,
}

impl HotkeyConfig {
    pub fn new(modifier: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            modifier: modifier.into(),
            key: key.into(),
        }
    }

    /// Human readable form for menus, e.g. `Alt + R`
    pub fn label(&self) -> String {
        format!("{} + {}", capitalize(&self.modifier), capitalize(&self.key))
    }
}

impl TryFrom<Vec<String>> for HotkeyConfig {
    type Error = String;

    fn try_from(keys: Vec<String>) -> Result<Self, Self::Error> {
        match keys.as_slice() {
            [modifier, key] if !modifier.trim().is_empty() && !key.trim().is_empty() => {
                Ok(Self::new(modifier.trim(), key.trim()))
            }
            [_, _] => Err("hot-key entries must not be empty".to_string()),
            other => Err(format!(
                "hot-key must list exactly two keys, got {}",
                other.len()
            )),
        }
    }
}

impl From<HotkeyConfig> for Vec<String> {
    fn from(hotkey: HotkeyConfig) -> Self {
        vec![hotkey.modifier, hotkey.key]
    }
}

impl fmt::Display for HotkeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.modifier, self.key)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
