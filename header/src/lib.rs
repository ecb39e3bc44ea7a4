//! Wallet Header - account identity, connectivity and QR scan status bar.
//!
//! This crate implements the strip shown at the top of a wallet's home
//! screen: which account is active (label and avatar colour), whether the
//! wallet is connected and in sync, and a scan affordance whose QR payloads
//! are resolved into wallet actions.
//!
//! # Overview
//!
//! The core is pure and synchronous. [`HeaderController`] reads the current
//! account and its display settings from injected stores, derives a
//! [`HeaderViewState`], and turns user intents into [`NavigationCommand`]s for
//! a host-supplied [`NavigationSink`]. Scanned payloads that do not resolve are
//! dropped without any navigation.
//!
//! The [`tui`] module is a terminal host for the header, built on `ratatui`.
//!
//! # Modules
//!
//! - [`types`]: Account identifiers, network mode and display settings
//! - [`avatar`]: Avatar colour palette and deterministic colour hash
//! - [`connectivity`]: Projection of sync signals onto four display states
//! - [`address`]: TON friendly and raw address parsing
//! - [`deeplink`]: Scanned payload resolution into wallet actions
//! - [`navigation`]: Navigation commands, sinks and the scan callback
//! - [`store`]: Account and settings stores, in memory and file backed
//! - [`controller`]: The header controller
//! - [`config`]: Configuration from environment variables
//! - [`error`]: Error types
//! - [`tui`]: Terminal front-end

pub mod address;
pub mod avatar;
pub mod config;
pub mod connectivity;
pub mod controller;
pub mod deeplink;
pub mod error;
pub mod navigation;
pub mod store;
pub mod tui;
pub mod types;

pub use address::{AddressError, FriendlyAddress};
pub use avatar::{avatar_color, avatar_hash, resolve_color, Rgb, AVATAR_COLORS};
pub use config::Config;
pub use connectivity::{classify, ConnectivitySignal, ConnectivityState};
pub use controller::{HeaderController, HeaderViewState};
pub use deeplink::{resolve, ResolvedAction};
pub use error::{HeaderError, Result, TuiError, UnresolvableScan};
pub use navigation::{NavigationCommand, NavigationSink, ScanCallback};
pub use store::{AccountStore, FileStore, MemoryStore, SettingsStore, StoreError, WalletStore};
pub use types::{AccountId, CurrentAccount, NetworkMode, WalletDisplaySettings};
