use anyhow::{Context, Result};
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
use snaptext_config::HotkeyConfig;

#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("Unknown modifier '{0}', expected ctrl, alt, shift or super")]
    UnknownModifier(String),

    #[error("Unknown key '{0}'")]
    UnknownKey(String),
}

/// Turn the configured pair into a registrable hotkey
pub fn parse_hotkey(config: &HotkeyConfig) -> Result<HotKey, HotkeyError> {
    let modifiers = parse_modifier(&config.modifier)
        .ok_or_else(|| HotkeyError::UnknownModifier(config.modifier.clone()))?;
    let code = parse_code(&config.key).ok_or_else(|| HotkeyError::UnknownKey(config.key.clone()))?;
    Ok(HotKey::new(Some(modifiers), code))
}

fn parse_modifier(name: &str) -> Option<Modifiers> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifiers::CONTROL),
        "alt" | "option" => Some(Modifiers::ALT),
        "shift" => Some(Modifiers::SHIFT),
        "super" | "win" | "meta" | "cmd" | "command" => Some(Modifiers::SUPER),
        _ => None,
    }
}

fn parse_code(name: &str) -> Option<Code> {
    let name = name.to_ascii_lowercase();
    let code = match name.as_str() {
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "space" => Code::Space,
        "enter" | "return" => Code::Enter,
        "tab" => Code::Tab,
        "escape" | "esc" => Code::Escape,
        "print" | "printscreen" => Code::PrintScreen,
        "insert" => Code::Insert,
        "delete" => Code::Delete,
        "home" => Code::Home,
        "end" => Code::End,
        "pageup" => Code::PageUp,
        "pagedown" => Code::PageDown,
        _ => return None,
    };
    Some(code)
}

/// Owns one OS-level hotkey registration
///
/// Must be created on the thread that runs the UI event loop; the hotkey is
/// unregistered when the manager is dropped.
pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl HotkeyManager {
    pub fn register(hotkey: HotKey) -> Result<Self> {
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        manager
            .register(hotkey)
            .context("Failed to register hotkey")?;

        Ok(Self { manager, hotkey })
    }

    /// Get the hotkey ID for matching events
    pub fn id(&self) -> u32 {
        self.hotkey.id()
    }
}

/// True when `event` is a key-down of the hotkey with `id`
pub fn is_press_of(id: u32, event: &GlobalHotKeyEvent) -> bool {
    event.id == id && event.state == HotKeyState::Pressed
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        let _ = self.manager.unregister(self.hotkey);
    }
}
