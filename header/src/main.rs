//! Wallet Header - account identity, connectivity and QR scan status bar.
//!
//! # Commands
//!
//! - `wallet-header run`: Start the interactive header
//! - `wallet-header resolve <payload>`: Resolve a scanned payload and print it as JSON
//!
//! # Environment Variables
//!
//! See the [`config`](wallet_header::config) module for available configuration options.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wallet_header::avatar::AVATAR_COLORS;
use wallet_header::config::Config;
use wallet_header::controller::HeaderController;
use wallet_header::deeplink;
use wallet_header::store::FileStore;
use wallet_header::tui::{self, install_panic_hook, App, AppState, Symbols, Theme};
use wallet_header::types::NetworkMode;

/// Wallet Header - account identity, connectivity and QR scan status bar.
///
/// Shows the active wallet account with its avatar colour and connectivity
/// state, and resolves scanned QR payloads into wallet actions.
#[derive(Parser, Debug)]
#[command(name = "wallet-header")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    WALLET_HEADER_STATE_PATH   Wallet state file (default: ~/.wallet-header/state.json)
    WALLET_HEADER_NETWORK      mainnet or testnet (default: from state file)
    WALLET_HEADER_LOG_PATH     Log file for the interactive header (default: ~/.wallet-header/header.log)
    WALLET_HEADER_TICK_MS      UI tick rate in milliseconds (default: 60)
    NO_COLOR                   Disable colours

EXAMPLES:
    # Start the header on the default state file
    wallet-header run

    # Start on testnet with another state file
    wallet-header run --state ./state.json --testnet

    # Resolve a payload
    wallet-header resolve 'ton://transfer/EQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp6_0t?amount=1000'
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive header.
    Run {
        /// Wallet state file.
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Run in test mode regardless of the state file.
        #[arg(long)]
        testnet: bool,
    },

    /// Resolve a scanned payload and print the action as JSON.
    ///
    /// Exits with status 1 when the payload does not resolve.
    Resolve {
        /// The decoded QR payload.
        payload: String,

        /// Resolve in test mode.
        #[arg(long)]
        testnet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Resolve { payload, testnet } => run_resolve(&payload, testnet),
        Command::Run { state, testnet } => {
            let mut config = Config::from_env().context("Failed to load configuration")?;
            if let Some(path) = state {
                config = config.with_state_path(path);
            }
            if testnet {
                config = config.with_network(NetworkMode::Testnet);
            }

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to create tokio runtime")?;

            runtime.block_on(run_header(config))
        }
    }
}

/// Resolves one payload and prints the result.
fn run_resolve(payload: &str, testnet: bool) -> Result<()> {
    init_logging();

    match deeplink::resolve(payload, testnet) {
        Ok(action) => {
            info!(action = action.kind(), "Resolved payload");
            let json =
                serde_json::to_string_pretty(&action).context("Failed to serialize action")?;
            println!("{json}");
            Ok(())
        }
        Err(reason) => {
            eprintln!("Error: payload does not resolve: {reason}");
            std::process::exit(1);
        }
    }
}

/// Runs the interactive header.
async fn run_header(config: Config) -> Result<()> {
    init_file_logging(&config.log_path)?;

    let store = Arc::new(FileStore::load(&config.state_path).with_context(|| {
        format!(
            "Failed to load wallet state from {}",
            config.state_path.display()
        )
    })?);
    if let Some(network) = config.network {
        store.set_network(network);
    }

    info!(
        state = %store.path().display(),
        network = ?config.network,
        "Starting wallet header"
    );

    let (navigation_tx, navigation_rx) = mpsc::unbounded_channel();
    let controller = HeaderController::new(
        store.clone(),
        store.clone(),
        Arc::new(navigation_tx),
        AVATAR_COLORS,
    );
    let state = AppState::new()
        .with_theme(Theme::from_env())
        .with_symbols(Symbols::detect());
    let app = App::new(state, controller, store, navigation_rx);

    install_panic_hook();
    tui::run(app, config.tick_rate)
        .await
        .context("Header UI failed")?;

    Ok(())
}

/// Initializes the tracing subscriber on stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

/// Initializes the tracing subscriber on a log file, since the terminal
/// belongs to the UI.
fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .init();

    Ok(())
}
