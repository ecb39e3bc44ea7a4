//! Account and settings stores.
//!
//! The header reads two things from the wallet: the current account and that
//! account's display settings. Both reads are infallible by contract; a
//! missing settings record is the all-absent default.
//!
//! Two implementations are provided:
//!
//! | Store | Backing | Used by |
//! |-------|---------|---------|
//! | [`MemoryStore`] | in-process state | tests, embedding |
//! | [`FileStore`] | JSON state file | the terminal front-end |
//!
//! Account identifiers are network-scoped. Addresses listed in the state are
//! re-rendered with the active network's test flag, so the same key yields a
//! different [`AccountId`] on mainnet and testnet. Settings records are
//! matched by the underlying address, whichever rendering they were saved
//! under.
//!
//! # State file
//!
//! ```json
//! {
//!   "network": "mainnet",
//!   "selected": 0,
//!   "accounts": ["EQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp6_0t"],
//!   "settings": {
//!     "EQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp6_0t": { "name": "Savings", "color": 3 }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::address::FriendlyAddress;
use crate::types::{AccountId, CurrentAccount, NetworkMode, WalletDisplaySettings};

/// Errors raised while loading or updating wallet state.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The state lists no accounts.
    #[error("state file lists no accounts")]
    NoAccounts,

    /// An account index outside the account list was selected.
    #[error("account index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The state file could not be read or written.
    #[error("failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file is not valid JSON for the expected shape.
    #[error("invalid state file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read access to per-account display settings.
pub trait SettingsStore: Send + Sync {
    /// Returns the settings for `account`, or the default when none exist.
    fn read(&self, account: &AccountId) -> WalletDisplaySettings;
}

/// Read access to the current account.
pub trait AccountStore: Send + Sync {
    /// Returns the account currently selected.
    fn current_account(&self) -> CurrentAccount;
}

/// A store the front-end can browse and switch accounts in.
pub trait WalletStore: AccountStore + SettingsStore {
    /// Returns the account list rendered for the active network.
    fn accounts(&self) -> Vec<AccountId>;

    /// Selects the account at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range index or when the selection
    /// cannot be persisted.
    fn select(&self, index: usize) -> Result<(), StoreError>;
}

/// Serialized wallet state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletState {
    #[serde(default)]
    pub network: NetworkMode,

    /// Zero-based index of the selected account.
    #[serde(default)]
    pub selected: usize,

    /// Ordered account list.
    pub accounts: Vec<AccountId>,

    #[serde(default)]
    pub settings: BTreeMap<AccountId, WalletDisplaySettings>,
}

impl WalletState {
    /// Checks the account list and clamps the selection into range.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoAccounts`] when the account list is empty.
    pub fn validate(mut self) -> Result<Self, StoreError> {
        let Some(last) = self.accounts.len().checked_sub(1) else {
            return Err(StoreError::NoAccounts);
        };
        if self.selected > last {
            debug!(selected = self.selected, last, "Clamping selected account");
            self.selected = last;
        }
        Ok(self)
    }

    fn current_account(&self) -> CurrentAccount {
        let index = self.selected.min(self.accounts.len().saturating_sub(1));
        let id = self
            .accounts
            .get(index)
            .map(|stored| scoped_id(stored, self.network))
            .unwrap_or_else(|| AccountId::new(""));
        CurrentAccount {
            id,
            network: self.network,
            index,
        }
    }

    fn settings_for(&self, account: &AccountId) -> WalletDisplaySettings {
        if let Some(settings) = self.settings.get(account) {
            return settings.clone();
        }
        self.settings
            .iter()
            .find(|(key, _)| same_account(key, account))
            .map(|(_, settings)| settings.clone())
            .unwrap_or_default()
    }

    fn account_ids(&self) -> Vec<AccountId> {
        self.accounts
            .iter()
            .map(|stored| scoped_id(stored, self.network))
            .collect()
    }
}

/// Renders a stored address for the given network, always in the bounceable
/// URL-safe form.
///
/// Identifiers that are not addresses are returned unchanged.
#[must_use]
pub fn scoped_id(stored: &AccountId, network: NetworkMode) -> AccountId {
    match FriendlyAddress::parse_any(stored.as_str(), network.is_test()) {
        Ok(mut address) => {
            address.test_only = network.is_test();
            address.bounceable = true;
            AccountId::new(address.to_string())
        }
        Err(_) => stored.clone(),
    }
}

fn same_account(a: &AccountId, b: &AccountId) -> bool {
    let parse = |id: &AccountId| FriendlyAddress::parse_any(id.as_str(), false).ok();
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => a.address == b.address,
        _ => a == b,
    }
}

/// In-memory store.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<WalletState>,
}

impl MemoryStore {
    /// Creates a store holding a single account.
    pub fn new(account: impl Into<AccountId>, network: NetworkMode) -> Self {
        Self {
            state: RwLock::new(WalletState {
                network,
                selected: 0,
                accounts: vec![account.into()],
                settings: BTreeMap::new(),
            }),
        }
    }

    /// Creates a store from a full state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoAccounts`] when the account list is empty.
    pub fn from_state(state: WalletState) -> Result<Self, StoreError> {
        Ok(Self {
            state: RwLock::new(state.validate()?),
        })
    }

    /// Adds a settings record.
    #[must_use]
    pub fn with_settings(self, account: impl Into<AccountId>, settings: WalletDisplaySettings) -> Self {
        self.set_settings(account, settings);
        self
    }

    /// Replaces the settings record for `account`.
    pub fn set_settings(&self, account: impl Into<AccountId>, settings: WalletDisplaySettings) {
        self.write().settings.insert(account.into(), settings);
    }

    /// Switches the active network mode.
    pub fn set_network(&self, network: NetworkMode) {
        self.write().network = network;
    }

    /// Selects the account at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] for an index past the list.
    pub fn select(&self, index: usize) -> Result<(), StoreError> {
        let mut state = self.write();
        let len = state.accounts.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        state.selected = index;
        Ok(())
    }

    /// Returns the account list rendered for the active network.
    #[must_use]
    pub fn accounts(&self) -> Vec<AccountId> {
        self.read_state().account_ids()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> WalletState {
        self.read_state().clone()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, WalletState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, WalletState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AccountStore for MemoryStore {
    fn current_account(&self) -> CurrentAccount {
        self.read_state().current_account()
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self, account: &AccountId) -> WalletDisplaySettings {
        self.read_state().settings_for(account)
    }
}

impl WalletStore for MemoryStore {
    fn accounts(&self) -> Vec<AccountId> {
        MemoryStore::accounts(self)
    }

    fn select(&self, index: usize) -> Result<(), StoreError> {
        MemoryStore::select(self, index)
    }
}

/// Store backed by a JSON state file.
///
/// The file is read once at load time. Account selection is written back;
/// a network override is not.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Network mode as loaded, written back in place of any override.
    saved_network: NetworkMode,
    inner: MemoryStore,
}

impl FileStore {
    /// Loads the state file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// lists no accounts.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let state: WalletState = serde_json::from_str(&contents)?;
        let saved_network = state.network;
        let inner = MemoryStore::from_state(state)?;

        info!(
            path = %path.display(),
            accounts = inner.read_state().accounts.len(),
            "Loaded wallet state"
        );
        Ok(Self {
            path,
            saved_network,
            inner,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overrides the network mode for this session.
    pub fn set_network(&self, network: NetworkMode) {
        self.inner.set_network(network);
    }

    /// Selects the account at `index` and persists the selection.
    ///
    /// The in-memory selection only changes once the file is written.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range index or a failed write.
    pub fn select(&self, index: usize) -> Result<(), StoreError> {
        let mut state = self.inner.snapshot();
        let len = state.accounts.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        state.selected = index;
        // The network override is session-only.
        state.network = self.saved_network;

        self.save(&state)?;
        self.inner.select(index)
    }

    /// Returns the account list rendered for the active network.
    #[must_use]
    pub fn accounts(&self) -> Vec<AccountId> {
        self.inner.accounts()
    }

    fn save(&self, state: &WalletState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), selected = state.selected, "Saved wallet state");
        Ok(())
    }
}

impl AccountStore for FileStore {
    fn current_account(&self) -> CurrentAccount {
        self.inner.current_account()
    }
}

impl SettingsStore for FileStore {
    fn read(&self, account: &AccountId) -> WalletDisplaySettings {
        self.inner.read(account)
    }
}

impl WalletStore for FileStore {
    fn accounts(&self) -> Vec<AccountId> {
        FileStore::accounts(self)
    }

    fn select(&self, index: usize) -> Result<(), StoreError> {
        FileStore::select(self, index)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::avatar::{avatar_hash, AVATAR_COLORS};

    const MAIN: &str = "EQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp6_0t";
    const TEST: &str = "kQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp60an";
    const MAIN_STD: &str = "EQD4FPq+PRDieyQKkizFTRtSDyucUIqrj0v/zXJmqaDp6/0t";
    const MAIN_NON_BOUNCEABLE: &str = "UQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp66Do";

    fn write_state(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    // ==========================================================================
    // MemoryStore
    // ==========================================================================

    #[test]
    fn missing_settings_read_as_default() {
        let store = MemoryStore::new(MAIN, NetworkMode::Mainnet);
        let account = store.current_account();
        assert_eq!(account.id.as_str(), MAIN);
        assert_eq!(account.index, 0);
        assert_eq!(store.read(&account.id), WalletDisplaySettings::default());
    }

    #[test]
    fn settings_are_matched_by_address() {
        let settings = WalletDisplaySettings {
            name: Some("Savings".to_string()),
            ..Default::default()
        };
        let store = MemoryStore::new(MAIN, NetworkMode::Mainnet).with_settings(MAIN_STD, settings.clone());
        assert_eq!(store.read(&AccountId::new(MAIN)), settings);
    }

    #[test]
    fn account_id_is_network_scoped() {
        let store = MemoryStore::new(MAIN, NetworkMode::Mainnet);
        assert_eq!(store.current_account().id.as_str(), MAIN);

        store.set_network(NetworkMode::Testnet);
        let account = store.current_account();
        assert_eq!(account.id.as_str(), TEST);
        assert_eq!(account.network, NetworkMode::Testnet);
    }

    #[test]
    fn account_id_ignores_stored_bounceable_flag() {
        let bounceable = MemoryStore::new(MAIN, NetworkMode::Mainnet).current_account();
        let non_bounceable = MemoryStore::new(MAIN_NON_BOUNCEABLE, NetworkMode::Mainnet).current_account();
        assert_eq!(non_bounceable.id.as_str(), MAIN);
        assert_eq!(non_bounceable.id, bounceable.id);
        assert_eq!(
            avatar_hash(non_bounceable.id.as_str(), AVATAR_COLORS.len()),
            avatar_hash(bounceable.id.as_str(), AVATAR_COLORS.len())
        );

        let store = MemoryStore::new(MAIN_NON_BOUNCEABLE, NetworkMode::Testnet);
        assert_eq!(store.current_account().id.as_str(), TEST);
    }

    #[test]
    fn non_address_ids_pass_through() {
        let store = MemoryStore::new("local-account", NetworkMode::Testnet);
        assert_eq!(store.current_account().id.as_str(), "local-account");
    }

    #[test]
    fn select_switches_account() {
        let state = WalletState {
            accounts: vec![AccountId::new("a"), AccountId::new("b")],
            ..Default::default()
        };
        let store = MemoryStore::from_state(state).unwrap();
        store.select(1).unwrap();
        assert_eq!(store.current_account().id.as_str(), "b");
        assert_eq!(store.current_account().index, 1);

        assert!(matches!(
            store.select(2),
            Err(StoreError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn empty_state_is_rejected() {
        assert!(matches!(
            MemoryStore::from_state(WalletState::default()),
            Err(StoreError::NoAccounts)
        ));
    }

    // ==========================================================================
    // FileStore
    // ==========================================================================

    #[test]
    fn loads_state_file() {
        let file = write_state(&format!(
            r#"{{
                "network": "mainnet",
                "selected": 0,
                "accounts": ["{MAIN}"],
                "settings": {{ "{MAIN}": {{ "name": "Savings", "color": 3, "avatar": 12 }} }}
            }}"#
        ));

        let store = FileStore::load(file.path()).unwrap();
        let account = store.current_account();
        let settings = store.read(&account.id);
        assert_eq!(settings.name.as_deref(), Some("Savings"));
        assert_eq!(settings.color, Some(3));
        assert_eq!(settings.avatar, Some(12));
    }

    #[test]
    fn minimal_state_uses_defaults() {
        let file = write_state(r#"{ "accounts": ["a", "b"] }"#);
        let store = FileStore::load(file.path()).unwrap();
        let account = store.current_account();
        assert_eq!(account.network, NetworkMode::Mainnet);
        assert_eq!(account.index, 0);
        assert_eq!(store.accounts().len(), 2);
    }

    #[test]
    fn out_of_range_selection_is_clamped() {
        let file = write_state(r#"{ "selected": 9, "accounts": ["a", "b"] }"#);
        let store = FileStore::load(file.path()).unwrap();
        assert_eq!(store.current_account().index, 1);
        assert_eq!(store.current_account().id.as_str(), "b");
    }

    #[test]
    fn empty_account_list_fails_to_load() {
        let file = write_state(r#"{ "accounts": [] }"#);
        let err = FileStore::load(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::NoAccounts));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = FileStore::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn malformed_file_fails_to_load() {
        let file = write_state("{ not json");
        assert!(matches!(
            FileStore::load(file.path()).unwrap_err(),
            StoreError::Json(_)
        ));
    }

    #[test]
    fn selection_is_persisted_but_network_override_is_not() {
        let file = write_state(r#"{ "network": "mainnet", "accounts": ["a", "b"] }"#);
        let store = FileStore::load(file.path()).unwrap();
        store.set_network(NetworkMode::Testnet);
        store.select(1).unwrap();

        let reloaded = FileStore::load(file.path()).unwrap();
        let account = reloaded.current_account();
        assert_eq!(account.index, 1);
        assert_eq!(account.network, NetworkMode::Mainnet);
    }

    #[test]
    fn failed_write_leaves_selection_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{ "accounts": ["a", "b"] }"#).unwrap();
        let store = FileStore::load(&path).unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let err = store.select(1).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.current_account().index, 0);
        assert_eq!(store.current_account().id.as_str(), "a");
    }

    #[test]
    fn out_of_range_select_does_not_write() {
        let file = write_state(r#"{ "accounts": ["a", "b"] }"#);
        let store = FileStore::load(file.path()).unwrap();
        assert!(matches!(
            store.select(5),
            Err(StoreError::IndexOutOfRange { index: 5, len: 2 })
        ));
        let on_disk = fs::read_to_string(file.path()).unwrap();
        assert_eq!(on_disk, r#"{ "accounts": ["a", "b"] }"#);
    }
}
