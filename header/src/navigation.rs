//! Navigation commands and the sink that executes them.
//!
//! The header never navigates itself. It describes what should happen as a
//! [`NavigationCommand`] and hands it to a [`NavigationSink`] supplied by the
//! host. The terminal front-end uses an unbounded `tokio` channel as its sink.
//!
//! Opening the scanner carries a [`ScanCallback`]: a one-shot continuation
//! that the scanner either delivers a payload to or drops.

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::deeplink::ResolvedAction;
use crate::types::AccountId;

/// A navigation request issued by the header.
pub enum NavigationCommand {
    /// Open the settings screen of the given account.
    OpenSettings(AccountId),
    /// Open the account selector.
    OpenAccountSelector,
    /// Open the QR scanner with a continuation for its result.
    OpenScanner(ScanCallback),
    /// Perform a resolved scan action.
    Dispatch(ResolvedAction),
}

impl NavigationCommand {
    /// Short name of the command for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenSettings(_) => "open_settings",
            Self::OpenAccountSelector => "open_account_selector",
            Self::OpenScanner(_) => "open_scanner",
            Self::Dispatch(_) => "dispatch",
        }
    }
}

impl fmt::Debug for NavigationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenSettings(id) => f.debug_tuple("OpenSettings").field(id).finish(),
            Self::OpenAccountSelector => f.write_str("OpenAccountSelector"),
            Self::OpenScanner(callback) => f.debug_tuple("OpenScanner").field(callback).finish(),
            Self::Dispatch(action) => f.debug_tuple("Dispatch").field(action).finish(),
        }
    }
}

/// Something that can carry out navigation commands.
pub trait NavigationSink: Send + Sync {
    /// Executes or enqueues a command. Must not block.
    fn navigate(&self, command: NavigationCommand);
}

impl NavigationSink for mpsc::UnboundedSender<NavigationCommand> {
    fn navigate(&self, command: NavigationCommand) {
        let name = command.name();
        if self.send(command).is_err() {
            warn!(command = name, "Navigation channel closed, dropping command");
        }
    }
}

type Continuation = Box<dyn FnOnce(String) + Send>;

/// One-shot continuation for a scanner result.
///
/// [`deliver`](Self::deliver) and [`cancel`](Self::cancel) both consume the
/// callback, so a payload can be delivered at most once. Dropping an
/// undelivered callback is the same as cancelling it.
pub struct ScanCallback {
    inner: Option<Continuation>,
}

impl ScanCallback {
    /// Wraps a continuation.
    pub fn new<F>(on_payload: F) -> Self
    where
        F: FnOnce(String) + Send + 'static,
    {
        Self {
            inner: Some(Box::new(on_payload)),
        }
    }

    /// Delivers a scanned payload.
    pub fn deliver(mut self, payload: impl Into<String>) {
        if let Some(continuation) = self.inner.take() {
            continuation(payload.into());
        }
    }

    /// Dismisses the scanner without a result.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScanCallback {
    fn drop(&mut self) {
        if self.inner.is_some() {
            debug!("Scanner dismissed without a payload");
        }
    }
}

impl fmt::Debug for ScanCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanCallback")
            .field("pending", &self.inner.is_some())
            .finish()
    }
}
