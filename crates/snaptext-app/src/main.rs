use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use snaptext_io::{DesktopNotifier, Notice, SystemClipboard};
use snaptext_ocr::OcrClient;
use snaptext_ui::UiContext;
use tokio_util::sync::CancellationToken;

pub mod args;
pub mod controller;
pub mod events;
pub mod logging;
pub mod pipeline;
pub mod startup;

#[cfg(test)]
mod tests;

use self::args::Args;
use self::controller::{ChannelSet, PrimaryScreen, TrayController};
use self::pipeline::Pipeline;
use self::startup::{AppPaths, Startup};

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    logging::init_tracing(args.log_format);

    let paths = AppPaths::new(&args.base_dir, &args.config);
    let startup = match startup::preflight(paths.clone()) {
        Ok(startup) => startup,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            if let Err(e) = snaptext_io::show_notice(&startup::fatal_notice(&e, &paths)) {
                tracing::warn!("Failed to show notification: {}", e);
            }
            return ExitCode::FAILURE;
        }
    };

    match run(startup) {
        Ok(()) => {
            tracing::info!("Bye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Exiting: {:#}", e);
            let notice =
                Notice::new(startup::DEFAULT_NOTICE_TITLE, format!("Snaptext stopped: {e}"));
            if let Err(e) = snaptext_io::show_notice(&notice) {
                tracing::warn!("Failed to show notification: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Wire the backend on a tokio runtime and run the UI on this thread
fn run(startup: Startup) -> anyhow::Result<()> {
    let style = startup.notice_style();
    let Startup {
        config,
        hotkey,
        paths,
    } = startup;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("snaptext-worker")
        .build()?;

    let channels = ChannelSet::new();
    let notifier = Arc::new(DesktopNotifier::new());
    let pipeline = Pipeline::new(
        Arc::new(OcrClient::new(config.url.clone())?),
        Arc::new(SystemClipboard::new()?),
        notifier.clone(),
        style.clone(),
        paths.capture.clone(),
    );
    let controller = Arc::new(TrayController::new(
        Arc::new(PrimaryScreen),
        pipeline,
        notifier,
        style,
        channels.app_to_ui.0.clone(),
    ));

    let cancel = CancellationToken::new();
    let backend = runtime.spawn(events::event_loop(
        controller,
        channels.ui_to_app.1.clone(),
        cancel.child_token(),
    ));

    let ui = snaptext_ui::run_ui(UiContext {
        ui_rx: channels.app_to_ui.1.clone(),
        app_tx: channels.ui_to_app.0.clone(),
        hotkey,
        hotkey_label: config.hotkey.label(),
        icon_path: paths.icon.clone(),
    });

    // In-flight OCR requests are abandoned here
    cancel.cancel();
    backend.abort();
    runtime.shutdown_background();
    ui
}
