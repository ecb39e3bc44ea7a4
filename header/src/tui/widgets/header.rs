//! Header bar widgets.
//!
//! The header is one bordered row:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │██ Wallet 1                    testnet ⌗ scan ● Online│
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The avatar swatch on the left is painted in the account's resolved colour.
//! The connectivity indicator pairs a glyph with a word, so the four states
//! stay distinguishable without colour.
//!
//! # Example
//!
//! ```ignore
//! use wallet_header::tui::widgets::HeaderWidget;
//!
//! let view = app.view_state();
//! frame.render_widget(HeaderWidget::new(&view, &theme, &symbols), header_area);
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::connectivity::ConnectivityState;
use crate::controller::HeaderViewState;
use crate::tui::app::{Symbols, Theme};

/// Rows taken by the header, borders included.
pub const HEADER_HEIGHT: u16 = 3;

/// Below this inner width the scan hint and network badge are dropped.
const COMPACT_THRESHOLD: u16 = 48;

/// Writes spans left to right from `x`, truncating by display width at the
/// right edge of `area`. Returns the column after the last written cell.
fn put_spans(buf: &mut Buffer, area: Rect, mut x: u16, spans: &[Span<'_>]) -> u16 {
    let right = area.x + area.width;
    for span in spans {
        let remaining = right.saturating_sub(x) as usize;
        if remaining == 0 {
            break;
        }
        let (next_x, _) = buf.set_stringn(x, area.y, &span.content, remaining, span.style);
        x = next_x;
    }
    x
}

fn spans_width(spans: &[Span<'_>]) -> u16 {
    spans.iter().map(|span| span.width() as u16).sum()
}

/// Connectivity indicator: glyph and word, right-aligned.
///
/// | State | Symbol | Text |
/// |-------|--------|------|
/// | Online | ● or [*] | "Online" |
/// | Syncing | ◐ or [~] | "Updating..." |
/// | Connecting | ◔ or [.] | "Connecting..." |
/// | Offline | ○ or [ ] | "Offline" |
#[derive(Debug)]
pub struct ConnectivityWidget<'a> {
    state: ConnectivityState,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> ConnectivityWidget<'a> {
    #[must_use]
    pub fn new(state: ConnectivityState, theme: &'a Theme, symbols: &'a Symbols) -> Self {
        Self {
            state,
            theme,
            symbols,
        }
    }

    fn symbol(&self) -> &'static str {
        match self.state {
            ConnectivityState::Online => self.symbols.online,
            ConnectivityState::Syncing => self.symbols.syncing,
            ConnectivityState::Connecting => self.symbols.connecting,
            ConnectivityState::Offline => self.symbols.offline,
        }
    }

    fn text(&self) -> &'static str {
        match self.state {
            ConnectivityState::Online => "Online",
            ConnectivityState::Syncing => "Updating...",
            ConnectivityState::Connecting => "Connecting...",
            ConnectivityState::Offline => "Offline",
        }
    }

    fn style(&self) -> Style {
        match self.state {
            ConnectivityState::Online => self.theme.status_online,
            ConnectivityState::Syncing => self.theme.status_syncing,
            ConnectivityState::Connecting => self.theme.status_connecting,
            ConnectivityState::Offline => self.theme.status_offline,
        }
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let style = self.style();
        vec![
            Span::styled(self.symbol(), style),
            Span::raw(" "),
            Span::styled(self.text(), style),
        ]
    }

    /// Width of the indicator in cells.
    #[must_use]
    pub fn display_width(&self) -> u16 {
        spans_width(&self.spans())
    }
}

impl Widget for ConnectivityWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = self.display_width();
        let x = area.x + area.width.saturating_sub(width);
        put_spans(buf, area, x, &self.spans());
    }
}

/// The full header bar for one [`HeaderViewState`].
#[derive(Debug)]
pub struct HeaderWidget<'a> {
    view: &'a HeaderViewState,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> HeaderWidget<'a> {
    #[must_use]
    pub fn new(view: &'a HeaderViewState, theme: &'a Theme, symbols: &'a Symbols) -> Self {
        Self {
            view,
            theme,
            symbols,
        }
    }

    fn avatar_style(&self) -> Style {
        match self.view.color {
            Some(rgb) if self.theme.colored_avatar => {
                Style::default().fg(Color::Rgb(rgb.r, rgb.g, rgb.b))
            }
            _ => Style::default().add_modifier(Modifier::DIM),
        }
    }

    fn identity_spans(&self) -> Vec<Span<'a>> {
        vec![
            Span::styled(self.symbols.avatar, self.avatar_style()),
            Span::raw(" "),
            Span::styled(self.view.label.as_str(), self.theme.label),
        ]
    }

    fn hint_spans(&self) -> Vec<Span<'a>> {
        let mut spans = Vec::new();
        if self.view.test_mode {
            spans.push(Span::styled("testnet", self.theme.test_badge));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(self.symbols.scan, self.theme.text_secondary));
        spans.push(Span::styled(" scan ", self.theme.text_secondary));
        spans
    }
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let status = ConnectivityWidget::new(self.view.connectivity, self.theme, self.symbols);
        let hints = if inner.width >= COMPACT_THRESHOLD {
            self.hint_spans()
        } else {
            Vec::new()
        };
        let right_width = (status.display_width() + spans_width(&hints)).min(inner.width / 2);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(right_width)])
            .split(inner);

        let row = |rect: Rect| Rect::new(rect.x, rect.y + rect.height / 2, rect.width, 1);

        put_spans(buf, row(chunks[0]), chunks[0].x, &self.identity_spans());

        let right = row(chunks[1]);
        let hint_width = spans_width(&hints).min(right.width);
        put_spans(buf, right, right.x, &hints);
        let status_area = Rect::new(right.x + hint_width, right.y, right.width - hint_width, 1);
        status.render(status_area, buf);
    }
}
