//! Activity log widget.
//!
//! Shows what the header has asked the host to do, newest at the bottom:
//!
//! ```text
//! [12:04:31] → Open scanner
//! [12:04:40] • Transfer to EQD4…_0t amount 5
//! [12:04:52] - Ignored scan "hello"
//! ```
//!
//! When the log is longer than the area, the oldest visible rows are dropped.

use std::collections::VecDeque;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::Widget,
};

use crate::tui::app::{ActivityEntry, ActivityKind, Symbols, Theme};

/// Renders the tail of the activity log.
#[derive(Debug)]
pub struct ActivityWidget<'a> {
    entries: &'a VecDeque<ActivityEntry>,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> ActivityWidget<'a> {
    #[must_use]
    pub fn new(entries: &'a VecDeque<ActivityEntry>, theme: &'a Theme, symbols: &'a Symbols) -> Self {
        Self {
            entries,
            theme,
            symbols,
        }
    }

    fn marker(&self, kind: ActivityKind) -> (&'static str, Style) {
        match kind {
            ActivityKind::Command => (self.symbols.arrow, self.theme.activity_command),
            ActivityKind::Dispatch => (self.symbols.bullet, self.theme.activity_dispatch),
            ActivityKind::Ignored => ("-", self.theme.activity_ignored),
            ActivityKind::Local => (self.symbols.bullet, self.theme.activity_local),
        }
    }

    fn entry_spans(&self, entry: &ActivityEntry, max_width: usize) -> Vec<Span<'static>> {
        let (marker, marker_style) = self.marker(entry.kind);
        let timestamp = format!("[{}] ", entry.at.format("%H:%M:%S"));
        let prefix_width = timestamp.chars().count() + marker.chars().count() + 1;
        let text_style = match entry.kind {
            ActivityKind::Ignored => self.theme.activity_ignored,
            _ => self.theme.text_primary,
        };

        vec![
            Span::styled(timestamp, self.theme.activity_timestamp),
            Span::styled(marker, marker_style),
            Span::raw(" "),
            Span::styled(
                truncate_to_width(&entry.text, max_width.saturating_sub(prefix_width)),
                text_style,
            ),
        ]
    }
}

impl Widget for ActivityWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.entries.is_empty() {
            let message = "No activity yet. Press s to scan.";
            let x = area.x + area.width.saturating_sub(message.len() as u16) / 2;
            let y = area.y + area.height / 2;
            buf.set_stringn(x, y, message, area.width as usize, self.theme.text_muted);
            return;
        }

        let visible = area.height as usize;
        let skip = self.entries.len().saturating_sub(visible);

        for (row, entry) in self.entries.iter().skip(skip).enumerate() {
            let y = area.y + row as u16;
            let mut x = area.x;
            for span in self.entry_spans(entry, area.width as usize) {
                let remaining = (area.x + area.width).saturating_sub(x) as usize;
                if remaining == 0 {
                    break;
                }
                let (next_x, _) = buf.set_stringn(x, y, &span.content, remaining, span.style);
                x = next_x;
            }
        }
    }
}

/// Truncates to `max_width` characters, ending in "..." when cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    if max_width < 4 {
        return s.chars().take(max_width).collect();
    }
    let truncated: String = s.chars().take(max_width - 3).collect();
    format!("{truncated}...")
}
