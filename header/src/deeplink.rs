//! Resolution of scanned QR payloads into navigable actions.
//!
//! [`resolve`] is a pure, best-effort parse. Recognised payloads become a
//! typed [`ResolvedAction`]; everything else fails with
//! [`UnresolvableScan`]. Dispatching the action is the caller's job.
//!
//! # Recognised payloads
//!
//! | Payload | Action |
//! |---------|--------|
//! | `ton://transfer/<addr>?amount=&text=&bin=&init=` | transfer |
//! | `ton-test://transfer/<addr>?…` (test mode only) | transfer |
//! | `https://tonhub.com/transfer/<addr>?…` (mainnet) | transfer |
//! | `https://test.tonhub.com/transfer/<addr>?…` (test mode) | transfer |
//! | `https://app.tonkeeper.com/transfer/<addr>?…` | transfer |
//! | `tonhub://connect/<session>?endpoint=` | connect |
//! | `ton://connect/<session>`, `https://tonhub.com/connect/<session>` | connect |
//! | `tc://?v=2&id=&r=&ret=`, `https://app.tonkeeper.com/ton-connect?…` | TON Connect |
//! | a bare address | transfer |
//!
//! # Network mode
//!
//! A friendly address carrying the test-only flag resolves only in test mode,
//! and one without it only on mainnet. Raw `workchain:hex` addresses carry no
//! flag and adopt the active mode, so they render differently per mode.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Serialize, Serializer};
use url::{ParseError, Url};

use crate::address::FriendlyAddress;
use crate::error::UnresolvableScan;

/// The only TON Connect protocol version the wallet speaks.
pub const TON_CONNECT_VERSION: u8 = 2;

/// Length in bytes of a TON Connect client public key.
const CLIENT_KEY_LEN: usize = 32;

const MAINNET_HOSTS: &[&str] = &["tonhub.com", "www.tonhub.com"];
const TESTNET_HOSTS: &[&str] = &["test.tonhub.com"];
const ANY_NETWORK_HOSTS: &[&str] = &["app.tonkeeper.com"];

/// A typed intent produced from a scanned payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedAction {
    /// Open the transfer confirmation screen.
    Transfer(TransferRequest),
    /// Open a wallet connection request.
    Connect(ConnectRequest),
    /// Open a TON Connect session request.
    TonConnect(TonConnectRequest),
}

impl ResolvedAction {
    /// Short name of the action for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transfer(_) => "transfer",
            Self::Connect(_) => "connect",
            Self::TonConnect(_) => "ton_connect",
        }
    }
}

/// Parameters of a transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Destination, rendered for the active network mode.
    pub target: FriendlyAddress,
    /// Amount in nano-units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    /// Text comment attached to the transfer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Raw message body.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_bytes"
    )]
    pub payload: Option<Vec<u8>>,
    /// Contract state init.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_bytes"
    )]
    pub state_init: Option<Vec<u8>>,
}

impl TransferRequest {
    fn to(target: FriendlyAddress) -> Self {
        Self {
            target,
            amount: None,
            comment: None,
            payload: None,
            state_init: None,
        }
    }
}

/// A request to connect the wallet to a remote session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub session: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// A TON Connect session request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TonConnectRequest {
    pub version: u8,
    /// Hex-encoded client public key.
    pub client_id: String,
    /// Decoded connect request body.
    pub request: serde_json::Value,
    /// Return strategy requested by the dApp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_strategy: Option<String>,
}

fn serialize_bytes<S: Serializer>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
    match bytes {
        Some(bytes) => serializer.serialize_str(&URL_SAFE.encode(bytes)),
        None => serializer.serialize_none(),
    }
}

/// Resolves a raw scanned payload.
///
/// # Errors
///
/// Returns [`UnresolvableScan`] for empty, malformed, truncated or
/// unsupported payloads, and for payloads that belong to the other network.
pub fn resolve(raw: &str, test_mode: bool) -> Result<ResolvedAction, UnresolvableScan> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UnresolvableScan::EmptyPayload);
    }

    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => {
            let target = parse_target(raw, test_mode)?;
            return Ok(ResolvedAction::Transfer(TransferRequest::to(target)));
        }
        Err(err) => return Err(UnresolvableScan::MalformedUrl(err)),
    };

    match url.scheme() {
        "ton" => resolve_route(&custom_route(&url), &url, test_mode),
        "ton-test" => {
            require_network(true, test_mode)?;
            resolve_route(&custom_route(&url), &url, test_mode)
        }
        "tonhub" => match custom_route(&url).as_slice() {
            route @ ["connect", ..] => resolve_route(route, &url, test_mode),
            _ => Err(UnresolvableScan::MissingTarget),
        },
        "tc" => resolve_ton_connect(&url),
        "https" => resolve_web(&url, test_mode),
        other => Err(UnresolvableScan::UnsupportedScheme(other.to_string())),
    }
}

fn resolve_web(url: &Url, test_mode: bool) -> Result<ResolvedAction, UnresolvableScan> {
    let host = url.host_str().unwrap_or_default();

    if MAINNET_HOSTS.contains(&host) {
        require_network(false, test_mode)?;
    } else if TESTNET_HOSTS.contains(&host) {
        require_network(true, test_mode)?;
    } else if !ANY_NETWORK_HOSTS.contains(&host) {
        return Err(UnresolvableScan::UnsupportedHost(host.to_string()));
    }

    resolve_route(&segments(url.path()), url, test_mode)
}

fn resolve_route(route: &[&str], url: &Url, test_mode: bool) -> Result<ResolvedAction, UnresolvableScan> {
    let Some((action, target)) = route.split_first() else {
        return Err(UnresolvableScan::MissingTarget);
    };
    // Standard base64 addresses may contain '/'.
    let target = target.join("/");

    match action.to_ascii_lowercase().as_str() {
        "transfer" if !target.is_empty() => resolve_transfer(&target, url, test_mode),
        "connect" if !target.is_empty() => resolve_connect(&target, url),
        "ton-connect" => resolve_ton_connect(url),
        _ => Err(UnresolvableScan::MissingTarget),
    }
}

fn resolve_transfer(target: &str, url: &Url, test_mode: bool) -> Result<ResolvedAction, UnresolvableScan> {
    let mut request = TransferRequest::to(parse_target(target, test_mode)?);

    if let Some(amount) = param(url, "amount") {
        let nano = amount
            .parse::<u64>()
            .map_err(|_| UnresolvableScan::InvalidAmount(amount.clone()))?;
        request.amount = Some(nano);
    }
    request.comment = param(url, "text");
    request.payload = bytes_param(url, "bin")?;
    request.state_init = bytes_param(url, "init")?;

    Ok(ResolvedAction::Transfer(request))
}

fn resolve_connect(session: &str, url: &Url) -> Result<ResolvedAction, UnresolvableScan> {
    let valid_session = session
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_session {
        return Err(UnresolvableScan::InvalidConnectRequest("malformed session id"));
    }

    let endpoint = param(url, "endpoint");
    if let Some(endpoint) = &endpoint {
        let secure = Url::parse(endpoint).is_ok_and(|endpoint| endpoint.scheme() == "https");
        if !secure {
            return Err(UnresolvableScan::InvalidConnectRequest("endpoint must use https"));
        }
    }

    Ok(ResolvedAction::Connect(ConnectRequest {
        session: session.to_string(),
        endpoint,
    }))
}

fn resolve_ton_connect(url: &Url) -> Result<ResolvedAction, UnresolvableScan> {
    let version = param(url, "v")
        .ok_or(UnresolvableScan::InvalidConnectRequest("missing protocol version"))?;
    if version.parse::<u8>().ok() != Some(TON_CONNECT_VERSION) {
        return Err(UnresolvableScan::InvalidConnectRequest("unsupported protocol version"));
    }

    let client_id = param(url, "id")
        .ok_or(UnresolvableScan::InvalidConnectRequest("missing client id"))?;
    let client_key = hex::decode(&client_id)
        .ok()
        .filter(|key| key.len() == CLIENT_KEY_LEN)
        .ok_or(UnresolvableScan::InvalidConnectRequest("malformed client id"))?;

    let body = param(url, "r")
        .ok_or(UnresolvableScan::InvalidConnectRequest("missing request body"))?;
    let request: serde_json::Value = serde_json::from_str(&body)
        .map_err(|_| UnresolvableScan::InvalidConnectRequest("request body is not JSON"))?;
    if !request.is_object() {
        return Err(UnresolvableScan::InvalidConnectRequest("request body is not an object"));
    }

    Ok(ResolvedAction::TonConnect(TonConnectRequest {
        version: TON_CONNECT_VERSION,
        client_id: hex::encode(client_key),
        request,
        return_strategy: param(url, "ret"),
    }))
}

fn parse_target(src: &str, test_mode: bool) -> Result<FriendlyAddress, UnresolvableScan> {
    let target = FriendlyAddress::parse_any(src, test_mode)?;
    require_network(target.test_only, test_mode)?;
    Ok(target)
}

fn require_network(payload_is_test: bool, test_mode: bool) -> Result<(), UnresolvableScan> {
    if payload_is_test == test_mode {
        return Ok(());
    }
    Err(UnresolvableScan::NetworkMismatch {
        expected: network_name(payload_is_test),
        actual: network_name(test_mode),
    })
}

fn network_name(test: bool) -> &'static str {
    if test {
        "testnet"
    } else {
        "mainnet"
    }
}

/// Action and target of a custom-scheme link. The action sits in the host
/// position (`ton://transfer/<addr>`) or, without `//`, at the start of the
/// path (`ton:transfer/<addr>`).
fn custom_route(url: &Url) -> Vec<&str> {
    url.host_str()
        .into_iter()
        .chain(url.path().split('/'))
        .filter(|s| !s.is_empty())
        .collect()
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Returns the first decoded value for `key`.
fn param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, value)| value.into_owned())
}

/// Returns the first value for `key` decoded from base64 or base64url.
fn bytes_param(url: &Url, key: &'static str) -> Result<Option<Vec<u8>>, UnresolvableScan> {
    let Some(value) = param(url, key) else {
        return Ok(None);
    };
    // Query decoding reads an unescaped '+' as a space.
    let value = value.replace(' ', "+");
    let trimmed = value.trim_end_matches('=');
    let engine = if trimmed.contains(['-', '_']) {
        &URL_SAFE_NO_PAD
    } else {
        &STANDARD_NO_PAD
    };
    engine
        .decode(trimmed)
        .map(Some)
        .map_err(|_| UnresolvableScan::InvalidEncoding { field: key })
}
