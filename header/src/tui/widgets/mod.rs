//! Widgets for the wallet header front-end.
//!
//! - [`header`]: the header bar itself, with avatar, label and connectivity
//! - [`scanner`]: the text prompt standing in for the QR camera
//! - [`activity`]: log of navigation commands and dispatched scans
//!
//! Widgets are stateless. They borrow what they draw from the
//! [`App`](crate::tui::app::App) together with the [`Theme`](crate::tui::app::Theme)
//! and [`Symbols`](crate::tui::app::Symbols).

pub mod activity;
pub mod header;
pub mod scanner;

pub use activity::ActivityWidget;
pub use header::{ConnectivityWidget, HeaderWidget, HEADER_HEIGHT};
pub use scanner::ScannerWidget;
