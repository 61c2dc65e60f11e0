//! Display adapter binding a paged item sequence to the list view.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::CatalogItem;
use crate::paging::{CombinedLoadStates, LoadState, Pager};

/// What the row below the last item shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterState {
    Hidden,
    Loading,
    /// Load failed; the retry action re-runs it.
    Error(String),
    EndOfList,
}

impl From<&CombinedLoadStates> for FooterState {
    fn from(states: &CombinedLoadStates) -> Self {
        match states.footer_state() {
            LoadState::Loading => FooterState::Loading,
            LoadState::Error(reason) => FooterState::Error(reason.clone()),
            LoadState::Idle { end_of_list: true } => FooterState::EndOfList,
            LoadState::Idle { end_of_list: false } => FooterState::Hidden,
        }
    }
}

/// Holds the submitted item sequence, the selection cursor and the scroll
/// offset, and re-publishes the sequence's load states.
///
/// Submitting a new sequence abandons load-state forwarding for the old one.
pub struct ListAdapter {
    items: Option<Pager>,
    selected: usize,
    offset: usize,
    viewport_rows: usize,
    load_states: Arc<watch::Sender<CombinedLoadStates>>,
    forwarder: Option<JoinHandle<()>>,
}

impl Default for ListAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ListAdapter {
    pub fn new() -> Self {
        let (load_states, _) = watch::channel(CombinedLoadStates::default());
        Self {
            items: None,
            selected: 0,
            offset: 0,
            viewport_rows: 1,
            load_states: Arc::new(load_states),
            forwarder: None,
        }
    }

    /// Stream of load states for whichever sequence is currently submitted.
    pub fn load_state_flow(&self) -> watch::Receiver<CombinedLoadStates> {
        self.load_states.subscribe()
    }

    pub fn load_states(&self) -> CombinedLoadStates {
        self.load_states.borrow().clone()
    }

    /// Replace the displayed sequence and start loading it.
    pub fn submit(&mut self, items: Pager) {
        if self.items.as_ref() == Some(&items) {
            return;
        }
        if let Some(forwarder) = self.forwarder.take() {
            forwarder.abort();
        }

        let mut source = items.load_states();
        self.load_states
            .send_replace(source.borrow_and_update().clone());
        let sink = Arc::clone(&self.load_states);
        self.forwarder = Some(tokio::spawn(async move {
            while source.changed().await.is_ok() {
                let states = source.borrow_and_update().clone();
                sink.send_replace(states);
            }
        }));

        tracing::debug!(pager = items.id(), "Submitting item sequence");
        items.start();
        self.items = Some(items);
        self.selected = 0;
        self.offset = 0;
    }

    pub fn items(&self) -> Option<&Pager> {
        self.items.as_ref()
    }

    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Pager::len)
    }

    pub fn total(&self) -> Option<u32> {
        self.items.as_ref().and_then(Pager::total)
    }

    /// Snapshot of every loaded item.
    pub fn snapshot(&self) -> Vec<CatalogItem> {
        self.items.as_ref().map(Pager::items).unwrap_or_default()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<CatalogItem> {
        self.items.as_ref()?.peek(self.selected)
    }

    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.scroll_to_selection();
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    /// Move the cursor by `delta` rows, clamped to the loaded items.
    /// Landing near the end loads the next page.
    pub fn move_selection(&mut self, delta: isize) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        let target = self.selected.saturating_add_signed(delta);
        self.selected = target.min(count - 1);
        self.scroll_to_selection();
        if let Some(items) = &self.items {
            items.access(self.selected);
        }
    }

    pub fn select_first(&mut self) {
        self.move_selection(isize::MIN);
    }

    pub fn select_last(&mut self) {
        self.move_selection(isize::MAX);
    }

    pub fn page_up(&mut self) {
        self.move_selection(-(self.viewport_rows as isize));
    }

    pub fn page_down(&mut self) {
        self.move_selection(self.viewport_rows as isize);
    }

    /// Items currently scrolled into view, with their indices. Touching the
    /// window also triggers prefetch for its last row.
    pub fn visible_window(&self) -> Vec<(usize, CatalogItem)> {
        let Some(items) = &self.items else {
            return Vec::new();
        };
        let window = items.window(self.offset, self.offset + self.viewport_rows);
        if let Some(last) = window.len().checked_sub(1) {
            items.access(self.offset + last);
        }
        window
            .into_iter()
            .enumerate()
            .map(|(i, item)| (self.offset + i, item))
            .collect()
    }

    pub fn footer(&self) -> FooterState {
        FooterState::from(&*self.load_states.borrow())
    }

    /// Footer retry action.
    pub fn retry(&self) {
        if let Some(items) = &self.items {
            items.retry();
        }
    }

    fn scroll_to_selection(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.viewport_rows {
            self.offset = self.selected + 1 - self.viewport_rows;
        }
    }
}

impl Drop for ListAdapter {
    fn drop(&mut self) {
        if let Some(forwarder) = self.forwarder.take() {
            forwarder.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_follows_load_states() {
        let loading = CombinedLoadStates {
            refresh: LoadState::Loading,
            append: LoadState::default(),
        };
        assert_eq!(FooterState::from(&loading), FooterState::Loading);

        let failed_append = CombinedLoadStates {
            refresh: LoadState::default(),
            append: LoadState::Error("timeout".into()),
        };
        assert_eq!(
            FooterState::from(&failed_append),
            FooterState::Error("timeout".into())
        );

        let done = CombinedLoadStates {
            refresh: LoadState::default(),
            append: LoadState::Idle { end_of_list: true },
        };
        assert_eq!(FooterState::from(&done), FooterState::EndOfList);
    }

    #[test]
    fn empty_adapter_has_no_selection() {
        let mut adapter = ListAdapter::new();
        adapter.move_selection(3);
        assert_eq!(adapter.selected_index(), 0);
        assert!(adapter.selected_item().is_none());
        assert!(adapter.visible_window().is_empty());
        assert_eq!(adapter.footer(), FooterState::Hidden);
    }
}
