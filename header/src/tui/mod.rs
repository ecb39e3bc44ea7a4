//! Terminal front-end for the wallet header.
//!
//! Renders the header with [`ratatui`] and stands in for the host
//! application: it executes the header's navigation commands as screens and
//! lets the connectivity signal be driven from the keyboard.
//!
//! # Submodules
//!
//! - [`app`]: state, key handling, navigation commands and the event loop
//! - [`ui`]: frame layout and screen dispatch
//! - [`terminal`]: raw mode and alternate screen with panic-safe restore
//! - [`widgets`]: header, scanner and activity widgets
//!
//! [`run`] ties them together: it owns the terminal, feeds events to the
//! [`App`] and redraws after each one.

pub mod app;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use app::{App, AppState, EventHandler, Screen, Symbols, Theme, TuiEvent};
pub use terminal::{install_panic_hook, Tui};

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::error::TuiError;

/// Capacity of the channel between the event handler and the main loop.
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Runs the interactive header until the user quits.
///
/// Owns the terminal for the duration of the call. Every event is applied to
/// `app`, queued navigation commands are drained, and a frame is drawn.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to, or if the
/// input task fails.
pub async fn run(mut app: App, tick_rate: Duration) -> Result<(), TuiError> {
    let mut tui = Tui::new().map_err(TuiError::TerminalInit)?;

    let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handler = EventHandler::with_tick_rate(event_tx, shutdown_rx, tick_rate);
    let handler_task = tokio::spawn(handler.run());

    info!(tick_ms = tick_rate.as_millis() as u64, "Header UI started");

    let mut result = tui
        .draw(|frame| ui::render(frame, &app))
        .map_err(TuiError::Render);

    while result.is_ok() && !app.state.should_quit() {
        let Some(event) = event_rx.recv().await else {
            debug!("Event channel closed");
            break;
        };
        app.handle_event(event);
        app.drain_navigation();
        result = tui
            .draw(|frame| ui::render(frame, &app))
            .map_err(TuiError::Render);
    }

    let _ = shutdown_tx.send(());
    drop(event_rx);
    let handler_result = handler_task
        .await
        .map_err(|e| TuiError::Event(e.to_string()))
        .and_then(|r| r.map_err(|e| TuiError::Event(e.to_string())));

    tui.restore().map_err(TuiError::Render)?;
    info!("Header UI stopped");
    result.and(handler_result)
}
