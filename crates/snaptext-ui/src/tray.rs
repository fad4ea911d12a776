use std::path::Path;

use anyhow::{Context, Result};
use kanal::Sender;
use snaptext_types::{AppEvent, Trigger};
use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem};
use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

/// Tray icon plus its two-item context menu
///
/// Clicks and menu picks are forwarded as `AppEvent`s; the icon disappears
/// when the shell is dropped.
pub struct TrayShell {
    _tray: TrayIcon,
}

#[derive(Debug, Clone)]
pub struct TrayMenuIds {
    pub show: MenuId,
    pub quit: MenuId,
}

impl TrayShell {
    pub fn build(icon_path: &Path, hotkey_label: &str, events: Sender<AppEvent>) -> Result<Self> {
        let icon = load_icon(icon_path)?;

        let show_item = MenuItem::new(format!("Capture text ({hotkey_label})"), true, None);
        let quit_item = MenuItem::new("Quit", true, None);
        let ids = TrayMenuIds {
            show: show_item.id().clone(),
            quit: quit_item.id().clone(),
        };

        let menu = Menu::new();
        menu.append_items(&[&show_item, &quit_item])
            .context("Failed to build tray menu")?;

        let tray = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_menu_on_left_click(false)
            .with_tooltip("Snaptext")
            .with_icon(icon)
            .build()
            .context("Failed to create tray icon")?;

        let menu_tx = events.clone();
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            if let Some(app_event) = menu_event(&event.id, &ids) {
                forward(&menu_tx, app_event);
            }
        }));

        TrayIconEvent::set_event_handler(Some(move |event: TrayIconEvent| {
            if let Some(app_event) = tray_event(&event) {
                forward(&events, app_event);
            }
        }));

        tracing::info!("Tray icon ready");
        Ok(Self { _tray: tray })
    }
}

fn load_icon(path: &Path) -> Result<Icon> {
    let image = image::open(path)
        .with_context(|| format!("Failed to open tray icon {}", path.display()))?
        .into_rgba8();
    let (width, height) = image.dimensions();
    Icon::from_rgba(image.into_raw(), width, height).context("Failed to decode tray icon")
}

/// Map a context menu pick to an app event
pub fn menu_event(id: &MenuId, ids: &TrayMenuIds) -> Option<AppEvent> {
    if *id == ids.show {
        Some(AppEvent::ShowRequested(Trigger::TrayMenu))
    } else if *id == ids.quit {
        Some(AppEvent::QuitRequested)
    } else {
        None
    }
}

/// Single or double left click on the icon shows the selector
pub fn tray_event(event: &TrayIconEvent) -> Option<AppEvent> {
    match event {
        TrayIconEvent::Click {
            button: MouseButton::Left,
            button_state: MouseButtonState::Up,
            ..
        }
        | TrayIconEvent::DoubleClick {
            button: MouseButton::Left,
            ..
        } => Some(AppEvent::ShowRequested(Trigger::TrayClick)),
        _ => None,
    }
}

/// Hand an event from a listener thread to the backend queue
pub(crate) fn forward(tx: &Sender<AppEvent>, event: AppEvent) {
    match tx.try_send(event) {
        Ok(true) => {}
        Ok(false) => tracing::warn!("Event queue full, dropping event"),
        Err(e) => tracing::error!("Failed to forward event: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> TrayMenuIds {
        TrayMenuIds {
            show: MenuId::new("show"),
            quit: MenuId::new("quit"),
        }
    }

    #[test]
    fn test_menu_show() {
        assert!(matches!(
            menu_event(&MenuId::new("show"), &ids()),
            Some(AppEvent::ShowRequested(Trigger::TrayMenu))
        ));
    }

    #[test]
    fn test_menu_quit() {
        assert!(matches!(
            menu_event(&MenuId::new("quit"), &ids()),
            Some(AppEvent::QuitRequested)
        ));
    }

    #[test]
    fn test_menu_unknown() {
        assert!(menu_event(&MenuId::new("other"), &ids()).is_none());
    }

    #[test]
    fn test_forward_full_queue_does_not_block() {
        let (tx, rx) = kanal::bounded::<AppEvent>(1);
        forward(&tx, AppEvent::QuitRequested);
        forward(&tx, AppEvent::ShowRequested(Trigger::Hotkey));

        assert!(matches!(rx.try_recv(), Ok(Some(AppEvent::QuitRequested))));
        assert!(matches!(rx.try_recv(), Ok(None)));
    }
}
