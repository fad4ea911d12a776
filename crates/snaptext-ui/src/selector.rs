use std::cell::RefCell;
use std::rc::Rc;

use image::RgbaImage;
use kanal::AsyncSender;
use slint::{ComponentHandle, Rgba8Pixel, SharedPixelBuffer, Weak};
use snaptext_types::AppEvent;

use crate::SelectorWindow;
use crate::selection::{self, Point, Selection, SelectionOutcome};

/// UI-thread state of one selection cycle
#[derive(Default)]
struct SelectorState {
    selection: Selection,
    screen: Option<RgbaImage>,
}

/// Drives the overlay window from the selection state machine
///
/// Lives on the UI thread only.
#[derive(Clone)]
pub struct Selector {
    window: Weak<SelectorWindow>,
    state: Rc<RefCell<SelectorState>>,
    app_tx: AsyncSender<AppEvent>,
}

impl Selector {
    pub fn new(window: &SelectorWindow, app_tx: AsyncSender<AppEvent>) -> Self {
        let selector = Self {
            window: window.as_weak(),
            state: Rc::new(RefCell::new(SelectorState::default())),
            app_tx,
        };

        {
            let s = selector.clone();
            window.on_pointer_pressed(move |x, y| {
                s.state.borrow_mut().selection.press(Point::new(x, y));
                s.repaint();
            });
        }
        {
            let s = selector.clone();
            window.on_pointer_moved(move |x, y| {
                let changed = s.state.borrow_mut().selection.drag(Point::new(x, y));
                if changed {
                    s.repaint();
                }
            });
        }
        {
            let s = selector.clone();
            window.on_pointer_released(move |x, y| s.release(Point::new(x, y)));
        }
        {
            let s = selector.clone();
            window.on_cancel_requested(move || s.cancel());
        }
        {
            // Alt+F4 or the window manager closing the overlay ends the cycle too
            let s = selector.clone();
            window.window().on_close_requested(move || {
                if s.is_active() {
                    tracing::debug!("Selector closed by the window system");
                    s.abort();
                }
                slint::CloseRequestResponse::HideWindow
            });
        }

        selector
    }

    /// Present `screen` as the overlay background and start a new cycle
    pub fn show(&self, screen: RgbaImage) -> anyhow::Result<()> {
        let Some(window) = self.window.upgrade() else {
            anyhow::bail!("Selector window is gone");
        };

        let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(
            screen.as_raw(),
            screen.width(),
            screen.height(),
        );
        window.set_screen(slint::Image::from_rgba8(buffer));

        {
            let mut state = self.state.borrow_mut();
            state.selection = Selection::Idle;
            state.screen = Some(screen);
        }
        self.repaint();

        window.show()?;
        window.window().set_fullscreen(true);
        window.invoke_focus_selector();
        tracing::debug!("Selector shown");
        Ok(())
    }

    /// True between `show` and the end of the selection cycle
    fn is_active(&self) -> bool {
        self.state.borrow().screen.is_some()
    }

    /// Hide without output and tell the backend the cycle is over
    pub fn abort(&self) {
        self.close();
        self.send(AppEvent::SelectionCancelled);
    }

    fn release(&self, at: Point) {
        let outcome = self.state.borrow_mut().selection.release(at);
        match outcome {
            SelectionOutcome::Ignored | SelectionOutcome::Pending => self.repaint(),
            SelectionOutcome::Committed(rect) => {
                let scale = self
                    .window
                    .upgrade()
                    .map(|w| w.window().scale_factor())
                    .unwrap_or(1.0);
                let screen = self.close();

                match screen.as_ref().and_then(|s| selection::crop(s, rect, scale)) {
                    Some((region, image)) => {
                        tracing::info!(
                            "Selected {}x{} at ({}, {})",
                            region.width,
                            region.height,
                            region.x,
                            region.y
                        );
                        self.send(AppEvent::CaptureComplete(image));
                    }
                    None => {
                        tracing::warn!("Selection did not cover any captured pixels");
                        self.send(AppEvent::SelectionCancelled);
                    }
                }
            }
        }
    }

    fn cancel(&self) {
        tracing::debug!("Selection cancelled");
        self.abort();
    }

    /// Hide the overlay, reset the selection and hand back the capture
    fn close(&self) -> Option<RgbaImage> {
        let screen = {
            let mut state = self.state.borrow_mut();
            state.selection.cancel();
            state.screen.take()
        };

        if let Some(window) = self.window.upgrade() {
            window.set_selecting(false);
            window.set_screen(slint::Image::default());
            if let Err(e) = window.hide() {
                tracing::warn!("Failed to hide selector: {}", e);
            }
        }
        screen
    }

    fn repaint(&self) {
        let Some(window) = self.window.upgrade() else {
            return;
        };
        match self.state.borrow().selection.live_rect() {
            Some(rect) => {
                window.set_sel_x(rect.x);
                window.set_sel_y(rect.y);
                window.set_sel_width(rect.width);
                window.set_sel_height(rect.height);
                window.set_selecting(true);
            }
            None => window.set_selecting(false),
        }
    }

    fn send(&self, event: AppEvent) {
        let tx = self.app_tx.clone();
        let spawned = slint::spawn_local(async move {
            if let Err(e) = tx.send(event).await {
                tracing::error!("Failed to send selector event: {}", e);
            }
        });
        if let Err(e) = spawned {
            tracing::error!("Failed to schedule selector event: {}", e);
        }
    }
}
