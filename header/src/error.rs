//! Error types for the wallet header.
//!
//! The core has a single recoverable error, [`UnresolvableScan`], which the
//! header controller swallows. The remaining types cover the ambient shell:
//! configuration, the state file, and the terminal front-end.

use thiserror::Error;

use crate::address::AddressError;
use crate::config::ConfigError;
use crate::store::StoreError;

/// Errors that can occur in the wallet header crate.
///
/// # Examples
///
/// ```ignore
/// use wallet_header::error::HeaderError;
///
/// fn load() -> Result<(), HeaderError> {
///     let config = Config::from_env()?;
///     let store = FileStore::load(&config.state_path)?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum HeaderError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// State file error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TUI-related error.
    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Errors that can occur during TUI operation.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal initialization failed.
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] std::io::Error),

    /// Terminal rendering failed.
    #[error("render error: {0}")]
    Render(#[source] std::io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(String),
}

/// A scanned payload that does not resolve to any action.
///
/// Every variant is recovered locally: the header performs no navigation and
/// shows nothing to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnresolvableScan {
    /// The payload is empty or whitespace.
    #[error("empty payload")]
    EmptyPayload,

    /// The payload uses a scheme the wallet does not handle.
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// The payload is a web link to a host the wallet does not handle.
    #[error("unsupported host: {0}")]
    UnsupportedHost(String),

    /// The payload looks like a URL but does not parse as one.
    #[error("malformed link: {0}")]
    MalformedUrl(#[from] url::ParseError),

    /// The payload names no action or target.
    #[error("payload has no action target")]
    MissingTarget,

    /// The target address is malformed or truncated.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// The payload belongs to the other network.
    #[error("payload is for {expected} but the wallet is on {actual}")]
    NetworkMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// The amount parameter is not a non-negative integer.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A parameter has a malformed escape or base64 body.
    #[error("invalid encoding in '{field}' parameter")]
    InvalidEncoding { field: &'static str },

    /// A connection request is missing or has malformed parameters.
    #[error("invalid connection request: {0}")]
    InvalidConnectRequest(&'static str),
}

/// A specialized `Result` type for wallet header operations.
pub type Result<T> = std::result::Result<T, HeaderError>;
