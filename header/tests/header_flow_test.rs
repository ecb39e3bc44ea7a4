//! End-to-end tests for the wallet header.
//!
//! These tests wire a real store, the controller and a channel sink together
//! and check what the header shows and which navigation commands reach the
//! host:
//!
//! 1. Unnamed account at index 2 shows "Wallet 3" with its hashed colour
//! 2. A named account shows its name verbatim in either network mode
//! 3. Connectivity goes from syncing straight to offline
//! 4. An unresolvable scan issues no navigation
//! 5. A well-formed transfer scan issues exactly one dispatch
//! 6. The same flows driven from a state file on disk

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;
use tokio::sync::mpsc;

use wallet_header::avatar::{avatar_hash, AVATAR_COLORS};
use wallet_header::connectivity::{ConnectivitySignal, ConnectivityState};
use wallet_header::controller::HeaderController;
use wallet_header::deeplink::ResolvedAction;
use wallet_header::navigation::NavigationCommand;
use wallet_header::store::{FileStore, MemoryStore, WalletState};
use wallet_header::types::{AccountId, NetworkMode, WalletDisplaySettings};

// =============================================================================
// Test Helpers
// =============================================================================

const MAIN: &str = "EQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp6_0t";
const TEST: &str = "kQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp60an";

type Commands = mpsc::UnboundedReceiver<NavigationCommand>;

fn header(store: MemoryStore) -> (HeaderController, Arc<MemoryStore>, Commands) {
    let store = Arc::new(store);
    let (tx, rx) = mpsc::unbounded_channel();
    let controller = HeaderController::new(store.clone(), store.clone(), Arc::new(tx), AVATAR_COLORS);
    (controller, store, rx)
}

fn drain(rx: &mut Commands) -> Vec<NavigationCommand> {
    let mut commands = Vec::new();
    while let Ok(command) = rx.try_recv() {
        commands.push(command);
    }
    commands
}

/// Opens the scanner and returns after delivering `payload` to it.
fn scan(controller: &HeaderController, rx: &mut Commands, payload: &str) {
    controller.open_scanner();
    let mut commands = drain(rx);
    assert_eq!(commands.len(), 1, "opening the scanner issues one command");
    let Some(NavigationCommand::OpenScanner(callback)) = commands.pop() else {
        panic!("expected OpenScanner");
    };
    callback.deliver(payload);
}

fn three_accounts(selected: usize, network: NetworkMode) -> WalletState {
    WalletState {
        network,
        selected,
        accounts: vec![
            AccountId::new("0:0000000000000000000000000000000000000000000000000000000000000001"),
            AccountId::new("0:0000000000000000000000000000000000000000000000000000000000000002"),
            AccountId::new(MAIN),
        ],
        ..Default::default()
    }
}

// =============================================================================
// Scenario 1: default label and hashed colour
// =============================================================================

#[test]
fn unnamed_account_at_index_two_is_wallet_three() {
    let store = MemoryStore::from_state(three_accounts(2, NetworkMode::Mainnet)).unwrap();
    let (controller, _, _rx) = header(store);

    let view = controller.view_state(&ConnectivitySignal::SETTLED);
    assert_eq!(view.label, "Wallet 3");
    assert!(!view.test_mode);

    let expected = avatar_hash(MAIN, AVATAR_COLORS.len());
    assert_eq!(view.color_index, expected);
    assert_eq!(view.color, Some(AVATAR_COLORS[expected]));
    assert_eq!(view.avatar_variant, None);
}

#[test]
fn explicit_colour_overrides_hash_and_out_of_range_is_ignored() {
    let store = MemoryStore::from_state(three_accounts(2, NetworkMode::Mainnet))
        .unwrap()
        .with_settings(
            MAIN,
            WalletDisplaySettings {
                color: Some(1),
                ..Default::default()
            },
        );
    let (controller, store, _rx) = header(store);
    assert_eq!(controller.view_state(&ConnectivitySignal::SETTLED).color_index, 1);

    store.set_settings(
        MAIN,
        WalletDisplaySettings {
            color: Some(AVATAR_COLORS.len() as i64),
            ..Default::default()
        },
    );
    assert_eq!(
        controller.view_state(&ConnectivitySignal::SETTLED).color_index,
        avatar_hash(MAIN, AVATAR_COLORS.len())
    );
}

// =============================================================================
// Scenario 2: user-chosen name
// =============================================================================

#[test]
fn named_account_shows_name_in_both_modes() {
    let settings = WalletDisplaySettings {
        name: Some("Savings".to_string()),
        ..Default::default()
    };
    let store = MemoryStore::from_state(three_accounts(2, NetworkMode::Mainnet))
        .unwrap()
        .with_settings(MAIN, settings);
    let (controller, store, _rx) = header(store);

    assert_eq!(controller.view_state(&ConnectivitySignal::SETTLED).label, "Savings");

    store.set_network(NetworkMode::Testnet);
    let view = controller.view_state(&ConnectivitySignal::SETTLED);
    assert_eq!(view.label, "Savings");
    assert!(view.test_mode);
}

// =============================================================================
// Scenario 3: connectivity transitions
// =============================================================================

#[test]
fn syncing_then_transport_lost_is_offline_without_intermediate_state() {
    let (controller, _, _rx) = header(MemoryStore::new(MAIN, NetworkMode::Mainnet));

    let observed: Vec<ConnectivityState> = [ConnectivitySignal::SYNCING, ConnectivitySignal::NO_TRANSPORT]
        .iter()
        .map(|signal| controller.view_state(signal).connectivity)
        .collect();

    assert_eq!(observed, vec![ConnectivityState::Syncing, ConnectivityState::Offline]);
    assert_eq!(observed[0].as_str(), "syncing");
    assert_eq!(observed[1].as_str(), "offline");
}

// =============================================================================
// Scenario 4: unresolvable scan
// =============================================================================

#[test]
fn unresolvable_scan_issues_no_navigation() {
    let (controller, _, mut rx) = header(MemoryStore::new(MAIN, NetworkMode::Mainnet));

    for payload in ["not-a-url", "", "ton://transfer/", "https://example.com/transfer/x"] {
        scan(&controller, &mut rx, payload);
        assert!(drain(&mut rx).is_empty(), "payload {payload:?} navigated");
    }
}

// =============================================================================
// Scenario 5: transfer scan
// =============================================================================

#[test]
fn transfer_scan_dispatches_once_with_parameters() {
    let (controller, _, mut rx) = header(MemoryStore::new(MAIN, NetworkMode::Mainnet));

    scan(
        &controller,
        &mut rx,
        &format!("ton://transfer/{MAIN}?amount=1500000000&text=Lunch%20money"),
    );

    let commands = drain(&mut rx);
    assert_eq!(commands.len(), 1);
    let NavigationCommand::Dispatch(ResolvedAction::Transfer(request)) = &commands[0] else {
        panic!("expected a transfer dispatch, got {:?}", commands[0]);
    };
    assert_eq!(request.target.to_string(), MAIN);
    assert_eq!(request.amount, Some(1_500_000_000));
    assert_eq!(request.comment.as_deref(), Some("Lunch money"));
}

#[test]
fn transfer_scan_for_other_network_is_dropped() {
    let (controller, _, mut rx) = header(MemoryStore::new(MAIN, NetworkMode::Testnet));

    scan(&controller, &mut rx, &format!("ton://transfer/{MAIN}"));
    assert!(drain(&mut rx).is_empty());

    scan(&controller, &mut rx, &format!("ton://transfer/{TEST}"));
    assert_eq!(drain(&mut rx).len(), 1);
}

// =============================================================================
// State file
// =============================================================================

#[test]
fn header_reads_state_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "network": "testnet",
            "selected": 1,
            "accounts": ["{MAIN}", "0:0000000000000000000000000000000000000000000000000000000000000002"]
        }}"#
    )
    .unwrap();
    file.flush().unwrap();

    let store = Arc::new(FileStore::load(file.path()).unwrap());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let controller = HeaderController::new(store.clone(), store.clone(), Arc::new(tx), AVATAR_COLORS);

    let view = controller.view_state(&ConnectivitySignal::HANDSHAKING);
    assert_eq!(view.label, "[test] Wallet 2");
    assert_eq!(view.connectivity, ConnectivityState::Connecting);

    controller.open_settings();
    match rx.try_recv().unwrap() {
        NavigationCommand::OpenSettings(id) => assert_eq!(id, view.avatar_id),
        other => panic!("unexpected command {other:?}"),
    }
}
