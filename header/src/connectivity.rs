//! Connectivity classification.
//!
//! The sync engine pushes a [`ConnectivitySignal`] whenever its transport or
//! session changes. [`classify`] projects that signal onto exactly one
//! [`ConnectivityState`], which the header renders as a single glyph.
//!
//! The classifier is a pure projection: it keeps no history, runs no timers
//! and does not debounce. Flicker suppression belongs to the signal producer.
//!
//! | Transport | Session   | State        |
//! |-----------|-----------|--------------|
//! | Down      | any       | `Offline`    |
//! | Up        | None      | `Connecting` |
//! | Up        | Syncing   | `Syncing`    |
//! | Up        | Settled   | `Online`     |

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether the network layer has any transport at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    #[default]
    Down,
    Up,
}

/// Progress of the session running over the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No usable session yet (handshake pending).
    #[default]
    None,
    /// Session established, actively reconciling state.
    Syncing,
    /// Session established and settled.
    Settled,
}

/// Raw connectivity signal as reported by the sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectivitySignal {
    pub transport: Transport,
    pub session: SessionPhase,
}

impl ConnectivitySignal {
    /// No transport at all.
    pub const NO_TRANSPORT: Self = Self {
        transport: Transport::Down,
        session: SessionPhase::None,
    };

    /// Transport present, handshake not complete.
    pub const HANDSHAKING: Self = Self {
        transport: Transport::Up,
        session: SessionPhase::None,
    };

    /// Session established and reconciling.
    pub const SYNCING: Self = Self {
        transport: Transport::Up,
        session: SessionPhase::Syncing,
    };

    /// Session established and settled.
    pub const SETTLED: Self = Self {
        transport: Transport::Up,
        session: SessionPhase::Settled,
    };
}

/// The four mutually exclusive display states of the connectivity glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    /// No transport.
    Offline,
    /// Transport present, no usable session yet.
    Connecting,
    /// Session established, reconciling state.
    Syncing,
    /// Session established and settled.
    Online,
}

impl ConnectivityState {
    /// All states, in precedence order.
    pub const ALL: [Self; 4] = [Self::Offline, Self::Connecting, Self::Syncing, Self::Online];

    /// Maps a sync-engine state tag onto a display state.
    ///
    /// Accepts `offline`, `connecting`, `updating` (alias `syncing`) and
    /// `online`, case-insensitively. Unknown tags render as `Connecting`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "offline" => Self::Offline,
            "connecting" => Self::Connecting,
            "updating" | "syncing" => Self::Syncing,
            "online" => Self::Online,
            other => {
                debug!(tag = other, "Unknown sync state tag, rendering as connecting");
                Self::Connecting
            }
        }
    }

    /// Stable tag for logs and serialization.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::Connecting => "connecting",
            Self::Syncing => "syncing",
            Self::Online => "online",
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ConnectivitySignal> for ConnectivityState {
    fn from(signal: ConnectivitySignal) -> Self {
        classify(&signal)
    }
}

/// Projects a connectivity signal onto its display state.
#[must_use]
pub fn classify(signal: &ConnectivitySignal) -> ConnectivityState {
    match (signal.transport, signal.session) {
        (Transport::Down, _) => ConnectivityState::Offline,
        (Transport::Up, SessionPhase::None) => ConnectivityState::Connecting,
        (Transport::Up, SessionPhase::Syncing) => ConnectivityState::Syncing,
        (Transport::Up, SessionPhase::Settled) => ConnectivityState::Online,
    }
}
