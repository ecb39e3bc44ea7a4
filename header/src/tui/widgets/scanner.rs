//! Scanner prompt.
//!
//! Stands in for the camera: the user pastes or types the decoded QR payload
//! and presses Enter to deliver it.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::tui::app::{ScannerState, Symbols, Theme};

/// Renders the scanner input box with a short help line.
#[derive(Debug)]
pub struct ScannerWidget<'a> {
    state: &'a ScannerState,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> ScannerWidget<'a> {
    #[must_use]
    pub fn new(state: &'a ScannerState, theme: &'a Theme, symbols: &'a Symbols) -> Self {
        Self {
            state,
            theme,
            symbols,
        }
    }
}

impl Widget for ScannerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        let help = Line::from(vec![
            Span::styled(self.symbols.scan, self.theme.title),
            Span::styled(
                " Paste a ton://, tonhub:// or tc:// link, or a web link",
                self.theme.text_secondary,
            ),
        ]);
        Paragraph::new(help).render(chunks[0], buf);

        let block = Block::default()
            .title(" Scan ")
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_focused);

        let input = Line::from(vec![
            Span::styled(self.state.input.as_str(), self.theme.input_focused),
            Span::styled("_", self.theme.text_muted),
        ]);
        Paragraph::new(input)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(chunks[1], buf);
    }
}
