use std::path::PathBuf;

use global_hotkey::{GlobalHotKeyEvent, hotkey::HotKey};
use kanal::{AsyncReceiver, AsyncSender};
use snaptext_ocr::HotkeyManager;
use snaptext_types::{AppEvent, Trigger, UiCommand};

pub mod selection;
pub mod selector;
pub mod tray;

use self::selector::Selector;
use self::tray::TrayShell;

slint::include_modules!();

/// Everything the UI thread needs, handed over by the app at startup
pub struct UiContext {
    pub ui_rx: AsyncReceiver<UiCommand>,
    pub app_tx: AsyncSender<AppEvent>,
    pub hotkey: HotKey,
    pub hotkey_label: String,
    pub icon_path: PathBuf,
}

/// Run the UI event loop on the current (main) thread until `UiCommand::Quit`
pub fn run_ui(ctx: UiContext) -> anyhow::Result<()> {
    let UiContext {
        ui_rx,
        app_tx,
        hotkey,
        hotkey_label,
        icon_path,
    } = ctx;

    let window = SelectorWindow::new()?;
    let selector = Selector::new(&window, app_tx.clone());

    // Hotkey listener thread -> backend queue
    let hotkey_manager = HotkeyManager::register(hotkey)?;
    let hotkey_id = hotkey_manager.id();
    let hotkey_tx = app_tx.clone_sync();
    GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
        if snaptext_ocr::is_press_of(hotkey_id, &event) {
            tracing::info!("Hotkey pressed");
            tray::forward(&hotkey_tx, AppEvent::ShowRequested(Trigger::Hotkey));
        }
    }));
    tracing::info!("Hotkey registered ({hotkey_label})");

    let tray = TrayShell::build(&icon_path, &hotkey_label, app_tx.clone_sync())?;

    // Backend -> UI commands, drained on the UI thread
    slint::spawn_local(async move {
        while let Ok(command) = ui_rx.recv().await {
            match command {
                UiCommand::ShowSelector(screen) => {
                    if let Err(e) = selector.show(screen) {
                        tracing::error!("Failed to show selector: {}", e);
                        selector.abort();
                    }
                }
                UiCommand::Quit => {
                    tracing::info!("Quit requested, leaving event loop");
                    break;
                }
            }
        }
        slint::quit_event_loop().ok();
    })?;

    slint::run_event_loop_until_quit()?;

    drop(tray);
    drop(hotkey_manager);
    Ok(())
}
