//! Core data model for the wallet header.
//!
//! These types describe what the header reads from its collaborators: the
//! active account, its display settings, and the network mode it runs in. All
//! types serialize to camelCase JSON so they can be shared with the state file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a wallet account.
///
/// The identifier is network-scoped: the mainnet and testnet renderings of the
/// same key are different identifiers. It is never mutated once derived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Wraps an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Network the wallet is operating on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkMode {
    #[default]
    Mainnet,
    Testnet,
}

impl NetworkMode {
    /// Builds the mode from a test-mode flag.
    #[must_use]
    pub fn from_test_flag(is_test: bool) -> Self {
        if is_test {
            Self::Testnet
        } else {
            Self::Mainnet
        }
    }

    /// Returns `true` for [`NetworkMode::Testnet`].
    #[must_use]
    pub fn is_test(self) -> bool {
        matches!(self, Self::Testnet)
    }

    /// Lowercase name used in configuration and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-account, user-overridable display preferences.
///
/// Every field is independently optional. An absent field makes the header
/// derive a default (synthesized label, hash-derived colour).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDisplaySettings {
    /// User-chosen wallet name, shown verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Explicit palette index. Values outside the palette are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<i64>,

    /// Avatar variant hash passed through to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<u32>,
}

impl WalletDisplaySettings {
    /// Returns the name if it is set and not blank.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// The account currently selected in the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAccount {
    /// Identifier of the account in the active network mode.
    pub id: AccountId,
    /// Active network mode.
    pub network: NetworkMode,
    /// Zero-based position in the user's ordered account list.
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_serializes_transparently() {
        let id = AccountId::new("EQabc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"EQabc\"");

        let parsed: AccountId = serde_json::from_str("\"EQabc\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn network_mode_round_trips_lowercase() {
        assert_eq!(
            serde_json::to_string(&NetworkMode::Testnet).unwrap(),
            "\"testnet\""
        );
        let parsed: NetworkMode = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(parsed, NetworkMode::Mainnet);
    }

    #[test]
    fn network_mode_from_test_flag() {
        assert_eq!(NetworkMode::from_test_flag(true), NetworkMode::Testnet);
        assert_eq!(NetworkMode::from_test_flag(false), NetworkMode::Mainnet);
        assert!(NetworkMode::Testnet.is_test());
        assert!(!NetworkMode::Mainnet.is_test());
    }

    #[test]
    fn settings_default_is_all_absent() {
        let settings = WalletDisplaySettings::default();
        assert!(settings.name.is_none());
        assert!(settings.color.is_none());
        assert!(settings.avatar.is_none());
    }

    #[test]
    fn settings_deserialize_partial_record() {
        let settings: WalletDisplaySettings =
            serde_json::from_str(r#"{ "name": "Savings" }"#).unwrap();
        assert_eq!(settings.name.as_deref(), Some("Savings"));
        assert!(settings.color.is_none());

        let empty: WalletDisplaySettings = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, WalletDisplaySettings::default());
    }

    #[test]
    fn blank_name_is_not_a_display_name() {
        let settings = WalletDisplaySettings {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(settings.display_name().is_none());
    }
}
