//! Bottom bar: cursor position in the list and the keys that act right now.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::adapter::{FooterState, ListAdapter};
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    /// One-based cursor row, `None` while the list is empty.
    cursor: Option<usize>,
    loaded: usize,
    total: Option<u32>,
    load: FooterState,
    popup_open: bool,
}

impl StatusBar {
    pub fn new(adapter: &ListAdapter, popup_open: bool) -> Self {
        let loaded = adapter.item_count();
        Self {
            cursor: (loaded > 0).then(|| adapter.selected_index() + 1),
            loaded,
            total: adapter.total(),
            load: adapter.footer(),
            popup_open,
        }
    }

    /// `12/40`, or `12/40 of 1302` while more remain on the server.
    fn position(&self) -> String {
        let Some(cursor) = self.cursor else {
            return "empty".to_string();
        };
        match self.total {
            Some(total) if (total as usize) > self.loaded => {
                format!("{cursor}/{} of {total}", self.loaded)
            }
            _ => format!("{cursor}/{}", self.loaded),
        }
    }

    fn hints(&self) -> Vec<Span<'static>> {
        let muted = Style::default().fg(MUTED_TEXT);
        if self.popup_open {
            return vec![Span::styled(" Esc: Close │ r: Retry failed load", muted)];
        }
        match &self.load {
            FooterState::Error(_) => vec![
                Span::styled(
                    " r: Retry",
                    Style::default().fg(STATUS_ERROR).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" │ ↑/↓: Move │ q: Quit", muted),
            ],
            _ => vec![Span::styled(" ↑/↓: Move │ Enter: Details │ q: Quit", muted)],
        }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER))
            .title(
                Line::from(Span::styled(
                    format!(" {} ", self.position()),
                    Style::default().fg(HEADER_TEXT),
                ))
                .right_aligned(),
            );
        Paragraph::new(Line::from(self.hints())).block(block)
    }
}
