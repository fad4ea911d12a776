use std::sync::Arc;

use kanal::AsyncReceiver;
use snaptext_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::controller::ShellHandler;

/// Backend main loop
///
/// Events are taken off the queue one at a time. Capture processing runs in
/// its own task so a quit request is handled even while an OCR call is in
/// flight; on quit or cancellation those tasks are abandoned.
pub async fn event_loop<H>(
    handler: Arc<H>,
    events_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    H: ShellHandler + ?Sized + 'static,
{
    let mut captures = JoinSet::new();

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                captures.abort_all();
                return Ok(());
            }
            Some(finished) = captures.join_next(), if !captures.is_empty() => {
                if let Err(e) = finished {
                    tracing::error!("Capture task failed: {}", e);
                }
                continue;
            }
            event = events_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", std::mem::discriminant(&event));
        match event {
            AppEvent::ShowRequested(trigger) => {
                if let Err(e) = handler.on_show_requested(trigger).await {
                    tracing::error!("Failed to show selector: {:#}", e);
                }
            }
            AppEvent::CaptureComplete(image) => {
                let handler = handler.clone();
                captures.spawn(async move {
                    if let Err(e) = handler.on_capture_complete(image).await {
                        tracing::error!("Failed to process capture: {:#}", e);
                    }
                });
            }
            AppEvent::SelectionCancelled => handler.on_selection_cancelled().await,
            AppEvent::QuitRequested => {
                captures.abort_all();
                if let Err(e) = handler.on_quit_requested().await {
                    tracing::error!("Failed to quit cleanly: {:#}", e);
                }
                return Ok(());
            }
        }
    }

    tracing::info!("[EVENT_LOOP] Event queue closed, finishing pending captures");
    while let Some(finished) = captures.join_next().await {
        if let Err(e) = finished {
            tracing::error!("Capture task failed: {}", e);
        }
    }
    Ok(())
}
