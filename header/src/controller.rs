//! The header controller.
//!
//! [`HeaderController`] ties the stores, the colour resolver, the
//! connectivity classifier and the deep-link resolver to a navigation sink.
//! It holds no view state of its own: [`view_state`](HeaderController::view_state)
//! re-reads the stores and re-derives everything on every call.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use tokio::sync::mpsc;
//! use wallet_header::avatar::AVATAR_COLORS;
//! use wallet_header::connectivity::{ConnectivitySignal, ConnectivityState};
//! use wallet_header::controller::HeaderController;
//! use wallet_header::store::MemoryStore;
//! use wallet_header::types::NetworkMode;
//!
//! let store = Arc::new(MemoryStore::new("EQabc", NetworkMode::Mainnet));
//! let (tx, _rx) = mpsc::unbounded_channel();
//! let controller = HeaderController::new(store.clone(), store, Arc::new(tx), AVATAR_COLORS);
//!
//! let view = controller.view_state(&ConnectivitySignal::SETTLED);
//! assert_eq!(view.label, "Wallet 1");
//! assert_eq!(view.connectivity, ConnectivityState::Online);
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::avatar::{resolve_color, Rgb};
use crate::connectivity::{classify, ConnectivitySignal, ConnectivityState};
use crate::deeplink;
use crate::navigation::{NavigationCommand, NavigationSink, ScanCallback};
use crate::store::{AccountStore, SettingsStore};
use crate::types::AccountId;

/// Prefix added to synthesized labels in test mode.
pub const TEST_LABEL_PREFIX: &str = "[test] ";

/// Everything the header needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderViewState {
    pub label: String,
    pub color_index: usize,
    /// Resolved colour, absent only for an empty palette.
    pub color: Option<Rgb>,
    pub avatar_id: AccountId,
    pub avatar_variant: Option<u32>,
    pub connectivity: ConnectivityState,
    pub test_mode: bool,
}

/// Orchestrates the wallet header.
#[derive(Clone)]
pub struct HeaderController {
    accounts: Arc<dyn AccountStore>,
    settings: Arc<dyn SettingsStore>,
    sink: Arc<dyn NavigationSink>,
    palette: &'static [Rgb],
}

impl HeaderController {
    /// Creates a controller from its collaborators.
    #[must_use]
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        settings: Arc<dyn SettingsStore>,
        sink: Arc<dyn NavigationSink>,
        palette: &'static [Rgb],
    ) -> Self {
        Self {
            accounts,
            settings,
            sink,
            palette,
        }
    }

    /// Derives the view state for the current account and `signal`.
    #[must_use]
    pub fn view_state(&self, signal: &ConnectivitySignal) -> HeaderViewState {
        let account = self.accounts.current_account();
        let settings = self.settings.read(&account.id);
        let test_mode = account.network.is_test();

        let label = match settings.display_name() {
            Some(name) => name.to_string(),
            None if test_mode => format!("{TEST_LABEL_PREFIX}Wallet {}", account.index + 1),
            None => format!("Wallet {}", account.index + 1),
        };

        let color_index = resolve_color(account.id.as_str(), self.palette.len(), settings.color);

        HeaderViewState {
            label,
            color_index,
            color: self.palette.get(color_index).copied(),
            avatar_id: account.id,
            avatar_variant: settings.avatar,
            connectivity: classify(signal),
            test_mode,
        }
    }

    /// Opens the settings of the current account.
    pub fn open_settings(&self) {
        let account = self.accounts.current_account();
        info!(account = %account.id, "Opening wallet settings");
        self.sink.navigate(NavigationCommand::OpenSettings(account.id));
    }

    /// Opens the account selector.
    pub fn open_account_selector(&self) {
        info!("Opening account selector");
        self.sink.navigate(NavigationCommand::OpenAccountSelector);
    }

    /// Opens the scanner. A payload delivered to its callback is resolved
    /// and dispatched as by [`handle_scan`](Self::handle_scan).
    pub fn open_scanner(&self) {
        let controller = self.clone();
        let callback = ScanCallback::new(move |payload| {
            controller.handle_scan(&payload);
        });
        info!("Opening scanner");
        self.sink.navigate(NavigationCommand::OpenScanner(callback));
    }

    /// Resolves a scanned payload against the current network mode and
    /// dispatches the resulting action.
    ///
    /// Returns `true` if an action was dispatched. Unresolvable payloads are
    /// dropped without any navigation.
    pub fn handle_scan(&self, payload: &str) -> bool {
        let test_mode = self.accounts.current_account().network.is_test();
        match deeplink::resolve(payload, test_mode) {
            Ok(action) => {
                info!(action = action.kind(), "Dispatching scanned action");
                self.sink.navigate(NavigationCommand::Dispatch(action));
                true
            }
            Err(reason) => {
                debug!(%reason, "Ignoring unresolvable scan");
                false
            }
        }
    }
}
