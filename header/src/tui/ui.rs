//! Frame composition.
//!
//! Every frame has the same three bands:
//!
//! ```text
//! +----------------------------------+
//! | header (avatar, label, status)   |  HEADER_HEIGHT rows
//! +----------------------------------+
//! | body, chosen by Screen           |
//! +----------------------------------+
//! | key hints                        |  1 row
//! +----------------------------------+
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::{App, Screen};
use crate::tui::widgets::{ActivityWidget, HeaderWidget, ScannerWidget, HEADER_HEIGHT};

/// Renders the whole application into `frame`.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let state = &app.state;
    let view = app.view_state();
    frame.render_widget(HeaderWidget::new(&view, &state.theme, &state.symbols), chunks[0]);

    match state.screen {
        Screen::Header => render_activity(frame, app, chunks[1]),
        Screen::Scanner => frame.render_widget(
            ScannerWidget::new(&state.scanner, &state.theme, &state.symbols),
            chunks[1],
        ),
        Screen::Settings => render_settings(frame, app, chunks[1]),
        Screen::AccountSelector => render_selector(frame, app, chunks[1]),
    }

    render_key_hints(frame, app, chunks[2]);
}

fn titled_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(app.state.theme.title)
        .borders(Borders::ALL)
        .border_style(app.state.theme.border)
}

fn render_activity(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.state;
    let block = titled_block(app, " Activity ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        ActivityWidget::new(&state.activity, &state.theme, &state.symbols),
        inner,
    );
}

fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.state.theme;
    let view = &app.state.settings;
    let unset = || Span::styled("(default)", theme.text_muted);

    let row = |name: &'static str, value: Span<'static>| {
        Line::from(vec![Span::styled(format!("{name:<10}"), theme.text_secondary), value])
    };

    let lines = vec![
        row("Account", Span::styled(view.account.to_string(), theme.text_primary)),
        row(
            "Name",
            view.settings
                .name
                .clone()
                .map_or_else(unset, |name| Span::styled(name, theme.text_primary)),
        ),
        row(
            "Colour",
            view.settings
                .color
                .map_or_else(unset, |color| Span::styled(color.to_string(), theme.text_primary)),
        ),
        row(
            "Avatar",
            view.settings
                .avatar
                .map_or_else(unset, |avatar| Span::styled(avatar.to_string(), theme.text_primary)),
        ),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(titled_block(app, " Wallet settings ")),
        area,
    );
}

fn render_selector(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.state;
    let current = app.view_state().avatar_id;

    let lines: Vec<Line> = state
        .selector
        .accounts
        .iter()
        .enumerate()
        .map(|(index, account)| {
            let marker = if *account == current {
                state.symbols.bullet
            } else {
                " "
            };
            let text = format!("{marker} Wallet {}  {account}", index + 1);
            if index == state.selector.highlighted {
                Line::styled(text, state.theme.selection)
            } else {
                Line::styled(text, state.theme.text_primary)
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(titled_block(app, " Accounts ")),
        area,
    );
}

fn render_key_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.state.screen {
        Screen::Header => &[
            ("s", "scan"),
            ("a", "accounts"),
            ("w", "settings"),
            ("1-4", "connectivity"),
            ("q", "quit"),
        ],
        Screen::Scanner => &[("Enter", "deliver"), ("Esc", "dismiss")],
        Screen::Settings => &[("Esc", "back")],
        Screen::AccountSelector => &[("↑/↓", "move"), ("Enter", "switch"), ("Esc", "back")],
    };

    let theme = &app.state.theme;
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, action) in hints {
        spans.push(Span::styled(*key, theme.title));
        spans.push(Span::styled(format!(" {action}"), theme.text_secondary));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    use super::*;
    use crate::avatar::AVATAR_COLORS;
    use crate::controller::HeaderController;
    use crate::store::{MemoryStore, WalletState};
    use crate::tui::app::{AppState, TuiEvent, ASCII_SYMBOLS};
    use crate::types::{AccountId, WalletDisplaySettings};

    fn test_app() -> App {
        let store = Arc::new(
            MemoryStore::from_state(WalletState {
                accounts: vec![AccountId::new("alpha"), AccountId::new("beta")],
                ..Default::default()
            })
            .unwrap()
            .with_settings(
                "alpha",
                WalletDisplaySettings {
                    name: Some("Savings".to_string()),
                    ..Default::default()
                },
            ),
        );
        let (tx, rx) = mpsc::unbounded_channel();
        let controller =
            HeaderController::new(store.clone(), store.clone(), Arc::new(tx), AVATAR_COLORS);
        let state = AppState::new().with_symbols(ASCII_SYMBOLS);
        App::new(state, controller, store, rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(TuiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        app.drain_navigation();
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn header_screen_shows_label_and_activity() {
        let app = test_app();
        let content = draw(&app, 80, 24);
        assert!(content.contains("Savings"));
        assert!(content.contains("Connecting..."));
        assert!(content.contains(" Activity "));
        assert!(content.contains("No activity yet"));
        assert!(content.contains("quit"));
    }

    #[test]
    fn scanner_screen_shows_prompt() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('s'));
        let content = draw(&app, 80, 24);
        assert!(content.contains(" Scan "));
        assert!(content.contains("dismiss"));
    }

    #[test]
    fn settings_screen_shows_stored_values() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('w'));
        let content = draw(&app, 80, 24);
        assert!(content.contains(" Wallet settings "));
        assert!(content.contains("Savings"));
        assert!(content.contains("(default)"));
    }

    #[test]
    fn selector_screen_lists_accounts() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        let content = draw(&app, 80, 24);
        assert!(content.contains(" Accounts "));
        assert!(content.contains("* Wallet 1  alpha"));
        assert!(content.contains("  Wallet 2  beta"));
    }

    #[test]
    fn activity_is_rendered_after_commands() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('w'));
        press(&mut app, KeyCode::Esc);
        let content = draw(&app, 80, 24);
        assert!(content.contains("Open settings for alpha"));
    }

    #[test]
    fn render_survives_small_and_large_terminals() {
        let app = test_app();
        for (w, h) in [(1, 1), (20, 5), (40, 12), (200, 60)] {
            draw(&app, w, h);
        }
    }
}
