//! Application state and event management for the wallet header TUI.
//!
//! This module contains the application state, event types, and the glue that
//! connects terminal input to the [`HeaderController`]. The main types are:
//!
//! - [`App`]: Owns the state, the controller, the store and the navigation
//!   channel, and applies events and navigation commands
//! - [`AppState`]: Screen state machine, scanner input, account selector and
//!   activity log
//! - [`Screen`]: Current screen being displayed
//! - [`TuiEvent`]: Events that drive the TUI event loop
//! - [`EventHandler`]: Async event loop using `tokio::select!` to multiplex event sources
//! - [`Theme`] and [`Symbols`]: Styling and glyph sets
//!
//! # Architecture
//!
//! Key presses are turned into controller calls. The controller never touches
//! the screen: it sends [`NavigationCommand`]s down an unbounded channel, and
//! [`App::drain_navigation`] applies them to the state. The scanner screen
//! holds the [`ScanCallback`] it was opened with until the user delivers a
//! payload or dismisses it.
//!
//! ```text
//! key --> App::handle_event --> HeaderController --> NavigationSink (mpsc)
//!                                                          |
//!          AppState <-- App::drain_navigation <------------+
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tokio::sync::mpsc;
//! use wallet_header::tui::app::EventHandler;
//!
//! let (event_tx, mut event_rx) = mpsc::channel(100);
//! let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
//!
//! // Spawn the event handler
//! let handler = EventHandler::new(event_tx, shutdown_rx);
//! tokio::spawn(handler.run());
//!
//! // Process events in the main loop
//! while let Some(event) = event_rx.recv().await {
//!     app.handle_event(event);
//!     app.drain_navigation();
//! }
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::connectivity::ConnectivitySignal;
use crate::controller::{HeaderController, HeaderViewState};
use crate::deeplink::ResolvedAction;
use crate::navigation::{NavigationCommand, ScanCallback};
use crate::store::WalletStore;
use crate::types::{AccountId, WalletDisplaySettings};

/// Maximum number of entries kept in the activity log.
pub const ACTIVITY_CAPACITY: usize = 100;

// =============================================================================
// Screen and Application State Types
// =============================================================================

/// Current screen being displayed below the header.
///
/// The header itself is always visible. The screen decides what fills the
/// rest of the terminal and which keys are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Header with the activity log below it.
    #[default]
    Header,
    /// QR scanner, emulated as a text prompt.
    Scanner,
    /// Settings of the account the header was showing.
    Settings,
    /// List of accounts to switch between.
    AccountSelector,
}

/// Scanner screen state.
#[derive(Debug, Default)]
pub struct ScannerState {
    /// Payload typed so far.
    pub input: String,
    /// Continuation handed over by the controller.
    callback: Option<ScanCallback>,
}

impl ScannerState {
    fn open(callback: ScanCallback) -> Self {
        Self {
            input: String::new(),
            callback: Some(callback),
        }
    }

    /// Returns `true` while a scan result can still be delivered.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.callback.is_some()
    }
}

/// Account selector screen state.
#[derive(Debug, Clone, Default)]
pub struct SelectorState {
    /// Accounts in display order.
    pub accounts: Vec<AccountId>,
    /// Highlighted row.
    pub highlighted: usize,
}

impl SelectorState {
    fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if self.highlighted + 1 < self.accounts.len() {
            self.highlighted += 1;
        }
    }
}

/// Settings screen state.
#[derive(Debug, Clone, Default)]
pub struct SettingsView {
    pub account: AccountId,
    pub settings: WalletDisplaySettings,
}

/// Category of an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    /// A navigation command from the header.
    Command,
    /// A resolved scan action.
    Dispatch,
    /// A scan that resolved to nothing, or a dismissed scanner.
    Ignored,
    /// A change made by the front-end itself.
    Local,
}

/// One line of the activity log.
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub at: DateTime<Local>,
    pub kind: ActivityKind,
    pub text: String,
}

/// Application state machine for the wallet header TUI.
///
/// ```text
///            s             Enter / Esc
///   Header ------> Scanner ------------> Header
///     |  w                   Esc
///     +------> Settings ------------> Header
///     |  a                  Enter / Esc
///     +------> AccountSelector -----> Header
/// ```
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen being displayed.
    pub screen: Screen,

    /// Latest connectivity signal from the sync engine.
    pub signal: ConnectivitySignal,

    pub scanner: ScannerState,
    pub selector: SelectorState,
    pub settings: SettingsView,

    /// Recent navigation activity, oldest first.
    pub activity: VecDeque<ActivityEntry>,

    /// Flag indicating user requested exit.
    pub should_quit: bool,

    /// Theme configuration.
    pub theme: Theme,

    /// Symbol set (unicode or ASCII).
    pub symbols: Symbols,
}

impl AppState {
    /// Creates a new `AppState` on the header screen, handshaking.
    #[must_use]
    pub fn new() -> Self {
        Self {
            signal: ConnectivitySignal::HANDSHAKING,
            ..Self::default()
        }
    }

    /// Sets the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the symbol set.
    #[must_use]
    pub fn with_symbols(mut self, symbols: Symbols) -> Self {
        self.symbols = symbols;
        self
    }

    /// Returns whether the user has requested exit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Requests application exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Appends an entry to the activity log, evicting the oldest if full.
    pub fn log(&mut self, kind: ActivityKind, text: impl Into<String>) {
        if self.activity.len() == ACTIVITY_CAPACITY {
            self.activity.pop_front();
        }
        self.activity.push_back(ActivityEntry {
            at: Local::now(),
            kind,
            text: text.into(),
        });
    }

    /// Returns to the header screen.
    ///
    /// Leaving the scanner this way dismisses it.
    pub fn back_to_header(&mut self) {
        if let Some(callback) = self.scanner.callback.take() {
            callback.cancel();
            self.log(ActivityKind::Ignored, "Scanner dismissed");
        }
        self.scanner.input.clear();
        self.screen = Screen::Header;
    }
}

/// Builds a one-line description of a resolved action.
#[must_use]
pub fn describe_action(action: &ResolvedAction) -> String {
    match action {
        ResolvedAction::Transfer(request) => {
            let mut text = format!("Transfer to {}", request.target);
            if let Some(amount) = request.amount {
                text.push_str(&format!(" amount {amount}"));
            }
            if let Some(comment) = &request.comment {
                text.push_str(&format!(" \"{comment}\""));
            }
            text
        }
        ResolvedAction::Connect(request) => match &request.endpoint {
            Some(endpoint) => format!("Connect session {} via {endpoint}", request.session),
            None => format!("Connect session {}", request.session),
        },
        ResolvedAction::TonConnect(request) => {
            let manifest = request
                .request
                .get("manifestUrl")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown manifest");
            format!("TON Connect v{} from {manifest}", request.version)
        }
    }
}

// =============================================================================
// App
// =============================================================================

/// The running application: state plus the collaborators it drives.
pub struct App {
    pub state: AppState,
    controller: HeaderController,
    store: Arc<dyn WalletStore>,
    navigation_rx: mpsc::UnboundedReceiver<NavigationCommand>,
}

impl App {
    /// Creates an application around a controller whose sink feeds
    /// `navigation_rx`.
    #[must_use]
    pub fn new(
        state: AppState,
        controller: HeaderController,
        store: Arc<dyn WalletStore>,
        navigation_rx: mpsc::UnboundedReceiver<NavigationCommand>,
    ) -> Self {
        Self {
            state,
            controller,
            store,
            navigation_rx,
        }
    }

    /// Derives the header view state for the current signal.
    #[must_use]
    pub fn view_state(&self) -> HeaderViewState {
        self.controller.view_state(&self.state.signal)
    }

    /// Applies a single TUI event.
    pub fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::ConnectivityChange(signal) => {
                debug!(?signal, "Connectivity signal changed");
                self.state.signal = signal;
            }
            TuiEvent::Tick | TuiEvent::Render | TuiEvent::Resize(_, _) => {}
        }
    }

    /// Applies every navigation command queued so far.
    ///
    /// Returns the number of commands applied.
    pub fn drain_navigation(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.navigation_rx.try_recv() {
            self.apply_command(command);
            applied += 1;
        }
        applied
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state.quit();
            return;
        }

        match self.state.screen {
            Screen::Header => self.handle_header_key(key),
            Screen::Scanner => self.handle_scanner_key(key),
            Screen::Settings => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.state.back_to_header();
                }
            }
            Screen::AccountSelector => self.handle_selector_key(key),
        }
    }

    fn handle_header_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.state.quit(),
            KeyCode::Char('w') => self.controller.open_settings(),
            KeyCode::Char('a') => self.controller.open_account_selector(),
            KeyCode::Char('s') => self.controller.open_scanner(),
            KeyCode::Char(digit @ '1'..='4') => {
                let signal = match digit {
                    '1' => ConnectivitySignal::NO_TRANSPORT,
                    '2' => ConnectivitySignal::HANDSHAKING,
                    '3' => ConnectivitySignal::SYNCING,
                    _ => ConnectivitySignal::SETTLED,
                };
                self.handle_event(TuiEvent::ConnectivityChange(signal));
            }
            _ => {}
        }
    }

    fn handle_scanner_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.back_to_header(),
            KeyCode::Enter => {
                let payload = std::mem::take(&mut self.state.scanner.input);
                if let Some(callback) = self.state.scanner.callback.take() {
                    callback.deliver(payload.clone());
                }
                self.state.screen = Screen::Header;
                // A successful scan queues a dispatch; anything else is dropped.
                if self.drain_navigation() == 0 {
                    self.state
                        .log(ActivityKind::Ignored, format!("Ignored scan \"{payload}\""));
                }
            }
            KeyCode::Backspace => {
                self.state.scanner.input.pop();
            }
            KeyCode::Char(c) => self.state.scanner.input.push(c),
            _ => {}
        }
    }

    fn handle_selector_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.back_to_header(),
            KeyCode::Up | KeyCode::Char('k') => self.state.selector.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.selector.move_down(),
            KeyCode::Enter => {
                let index = self.state.selector.highlighted;
                match self.store.select(index) {
                    Ok(()) => {
                        let label = self.view_state().label;
                        self.state
                            .log(ActivityKind::Local, format!("Switched to {label}"));
                    }
                    Err(err) => warn!(error = %err, index, "Failed to switch account"),
                }
                self.state.back_to_header();
            }
            _ => {}
        }
    }

    fn apply_command(&mut self, command: NavigationCommand) {
        match command {
            NavigationCommand::OpenSettings(account) => {
                self.state
                    .log(ActivityKind::Command, format!("Open settings for {account}"));
                self.state.settings = SettingsView {
                    settings: self.store.read(&account),
                    account,
                };
                self.state.screen = Screen::Settings;
            }
            NavigationCommand::OpenAccountSelector => {
                self.state.log(ActivityKind::Command, "Open account selector");
                self.state.selector = SelectorState {
                    accounts: self.store.accounts(),
                    highlighted: self.store.current_account().index,
                };
                self.state.screen = Screen::AccountSelector;
            }
            NavigationCommand::OpenScanner(callback) => {
                self.state.log(ActivityKind::Command, "Open scanner");
                self.state.scanner = ScannerState::open(callback);
                self.state.screen = Screen::Scanner;
            }
            NavigationCommand::Dispatch(action) => {
                self.state.log(ActivityKind::Dispatch, describe_action(&action));
                self.state.screen = Screen::Header;
            }
        }
    }
}

// =============================================================================
// Theme and Symbols
// =============================================================================

/// Color theme for the TUI.
///
/// Use [`Theme::from_env()`] to honour `NO_COLOR`.
#[derive(Debug, Clone)]
pub struct Theme {
    // Connectivity
    /// Style for the online state (default: green).
    pub status_online: Style,
    /// Style for the syncing state (default: cyan).
    pub status_syncing: Style,
    /// Style for the connecting state (default: yellow).
    pub status_connecting: Style,
    /// Style for the offline state (default: red).
    pub status_offline: Style,

    // Identity
    /// Style for the account label (default: white bold).
    pub label: Style,
    /// Style for the test-mode badge (default: magenta bold).
    pub test_badge: Style,
    /// Whether the avatar swatch is painted in its resolved colour.
    pub colored_avatar: bool,

    // Activity log
    /// Style for activity timestamps (default: dark gray).
    pub activity_timestamp: Style,
    /// Style for navigation commands (default: blue).
    pub activity_command: Style,
    /// Style for dispatched scan actions (default: green bold).
    pub activity_dispatch: Style,
    /// Style for ignored scans (default: dark gray italic).
    pub activity_ignored: Style,
    /// Style for front-end changes (default: yellow).
    pub activity_local: Style,

    // Input
    /// Style for the focused input field (default: cyan bold).
    pub input_focused: Style,
    /// Style for the highlighted list row (default: reversed).
    pub selection: Style,

    // Layout
    /// Style for borders (default: dark gray).
    pub border: Style,
    /// Style for focused borders (default: cyan).
    pub border_focused: Style,
    /// Style for titles (default: white bold).
    pub title: Style,
    /// Style for primary text.
    pub text_primary: Style,
    /// Style for secondary text (default: gray).
    pub text_secondary: Style,
    /// Style for muted text (default: dark gray).
    pub text_muted: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_online: Style::default().fg(Color::Green),
            status_syncing: Style::default().fg(Color::Cyan),
            status_connecting: Style::default().fg(Color::Yellow),
            status_offline: Style::default().fg(Color::Red),

            label: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            test_badge: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            colored_avatar: true,

            activity_timestamp: Style::default().fg(Color::DarkGray),
            activity_command: Style::default().fg(Color::Blue),
            activity_dispatch: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            activity_ignored: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            activity_local: Style::default().fg(Color::Yellow),

            input_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            selection: Style::default().add_modifier(Modifier::REVERSED),

            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().fg(Color::Gray),
            text_muted: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Creates a monochrome theme for `NO_COLOR` support.
    ///
    /// Only modifiers are used. The avatar swatch is drawn reversed instead of
    /// in its colour.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            status_online: Style::default().add_modifier(Modifier::BOLD),
            status_syncing: Style::default().add_modifier(Modifier::ITALIC),
            status_connecting: Style::default().add_modifier(Modifier::ITALIC),
            status_offline: Style::default().add_modifier(Modifier::DIM),

            label: Style::default().add_modifier(Modifier::BOLD),
            test_badge: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            colored_avatar: false,

            activity_timestamp: Style::default().add_modifier(Modifier::DIM),
            activity_command: Style::default(),
            activity_dispatch: Style::default().add_modifier(Modifier::BOLD),
            activity_ignored: Style::default().add_modifier(Modifier::DIM),
            activity_local: Style::default(),

            input_focused: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            selection: Style::default().add_modifier(Modifier::REVERSED),

            border: Style::default(),
            border_focused: Style::default().add_modifier(Modifier::BOLD),
            title: Style::default().add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().add_modifier(Modifier::DIM),
            text_muted: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Creates a theme based on the environment.
    ///
    /// Returns [`Theme::monochrome()`] if `NO_COLOR` is set (to any value),
    /// following the [NO_COLOR standard](https://no-color.org/).
    #[must_use]
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            Self::monochrome()
        } else {
            Self::default()
        }
    }
}

/// Symbol set for the TUI (unicode or ASCII).
#[derive(Debug, Clone, Copy)]
pub struct Symbols {
    /// Symbol for the online state.
    pub online: &'static str,
    /// Symbol for the syncing state.
    pub syncing: &'static str,
    /// Symbol for the connecting state.
    pub connecting: &'static str,
    /// Symbol for the offline state.
    pub offline: &'static str,
    /// Avatar swatch, two cells wide.
    pub avatar: &'static str,
    /// Scan affordance.
    pub scan: &'static str,
    /// Arrow symbol for navigation/direction.
    pub arrow: &'static str,
    /// Bullet point symbol for lists.
    pub bullet: &'static str,
}

/// Unicode symbol set for modern terminals.
///
/// | Symbol | Character |
/// |--------|-----------|
/// | `online` | ● |
/// | `syncing` | ◐ |
/// | `connecting` | ◔ |
/// | `offline` | ○ |
/// | `avatar` | ██ |
/// | `scan` | ⌗ |
pub const UNICODE_SYMBOLS: Symbols = Symbols {
    online: "●",
    syncing: "◐",
    connecting: "◔",
    offline: "○",
    avatar: "██",
    scan: "⌗",
    arrow: "→",
    bullet: "•",
};

/// ASCII symbol set for maximum compatibility.
pub const ASCII_SYMBOLS: Symbols = Symbols {
    online: "[*]",
    syncing: "[~]",
    connecting: "[.]",
    offline: "[ ]",
    avatar: "##",
    scan: "[#]",
    arrow: "->",
    bullet: "*",
};

impl Symbols {
    /// Detects the symbol set for the current terminal.
    ///
    /// Returns [`ASCII_SYMBOLS`] when `TERM` names a Linux console or a VT100
    /// emulator, [`UNICODE_SYMBOLS`] otherwise.
    #[must_use]
    pub fn detect() -> Self {
        if std::env::var("TERM")
            .map(|t| t.contains("linux") || t.contains("vt100"))
            .unwrap_or(false)
        {
            ASCII_SYMBOLS
        } else {
            UNICODE_SYMBOLS
        }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::detect()
    }
}

// =============================================================================
// Events
// =============================================================================

/// Events that drive the TUI event loop.
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Periodic tick.
    Tick,

    /// Trigger a render cycle.
    Render,

    /// Terminal key press.
    Key(KeyEvent),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// New connectivity signal from the sync engine.
    ConnectivityChange(ConnectivitySignal),
}

/// Default tick rate for the event handler (60ms = ~16 FPS).
pub const DEFAULT_TICK_RATE_MS: u64 = 60;

/// Poll timeout for checking terminal input.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 10;

/// Handles terminal input and generates periodic tick events.
///
/// The handler uses `tokio::select!` to multiplex three sources:
///
/// - **Shutdown signal**: A oneshot channel, checked first
/// - **Tick interval**: A tokio interval that fires at the configured tick rate
/// - **Terminal polling**: crossterm polling inside `spawn_blocking`
#[derive(Debug)]
pub struct EventHandler {
    /// Channel sender for dispatching events to the main application.
    event_tx: mpsc::Sender<TuiEvent>,
    /// Receiver for the shutdown signal.
    shutdown_rx: oneshot::Receiver<()>,
    /// Tick rate.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new `EventHandler` with the default tick rate.
    pub fn new(event_tx: mpsc::Sender<TuiEvent>, shutdown_rx: oneshot::Receiver<()>) -> Self {
        Self::with_tick_rate(
            event_tx,
            shutdown_rx,
            Duration::from_millis(DEFAULT_TICK_RATE_MS),
        )
    }

    /// Creates a new `EventHandler` with a custom tick rate.
    pub fn with_tick_rate(
        event_tx: mpsc::Sender<TuiEvent>,
        shutdown_rx: oneshot::Receiver<()>,
        tick_rate: Duration,
    ) -> Self {
        Self {
            event_tx,
            shutdown_rx,
            tick_rate,
        }
    }

    /// Returns the configured tick rate.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Runs the event loop until a shutdown signal is received or the event
    /// receiver is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal polling task panics.
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut tick_interval = tokio::time::interval(self.tick_rate);
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Burst);

        // The first tick completes immediately.
        tick_interval.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = &mut self.shutdown_rx => {
                    debug!("EventHandler received shutdown signal");
                    break;
                }

                _ = tick_interval.tick() => {
                    if self.event_tx.send(TuiEvent::Tick).await.is_err() {
                        debug!("Event receiver dropped, exiting event loop");
                        break;
                    }
                }

                result = async {
                    tokio::time::sleep(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS)).await;
                    tokio::task::spawn_blocking(|| {
                        Self::poll_terminal_event(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS))
                    }).await
                } => {
                    match result {
                        Ok(Some(event)) => {
                            if self.event_tx.send(event).await.is_err() {
                                debug!("Event receiver dropped, exiting event loop");
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(join_error) => {
                            tracing::error!("spawn_blocking task panicked: {}", join_error);
                            return Err(std::io::Error::other(
                                "Terminal polling task panicked",
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Polls for a terminal event. Polling failures (no terminal, as in CI)
    /// count as "no event".
    fn poll_terminal_event(timeout: Duration) -> Option<TuiEvent> {
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(crossterm_event) => Self::convert_crossterm_event(crossterm_event),
                Err(e) => {
                    tracing::trace!("Failed to read terminal event: {}", e);
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::trace!("Failed to poll terminal: {}", e);
                None
            }
        }
    }

    /// Converts a crossterm event. Mouse, focus and paste events are dropped.
    fn convert_crossterm_event(event: CrosstermEvent) -> Option<TuiEvent> {
        match event {
            CrosstermEvent::Key(key_event) => Some(TuiEvent::Key(key_event)),
            CrosstermEvent::Resize(cols, rows) => Some(TuiEvent::Resize(cols, rows)),
            CrosstermEvent::Mouse(_) => None,
            CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => None,
            CrosstermEvent::Paste(_) => None,
        }
    }
}
