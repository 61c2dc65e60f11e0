//! Load states reported by the pager.

/// Status of one paging operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing in flight. `end_of_list` is set once the last page has loaded.
    Idle { end_of_list: bool },
    Loading,
    Error(String),
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Idle { end_of_list: false }
    }
}

impl LoadState {
    pub fn is_error(&self) -> bool {
        matches!(self, LoadState::Error(_))
    }
}

/// Load states for the initial load (`refresh`) and for subsequent pages
/// (`append`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CombinedLoadStates {
    pub refresh: LoadState,
    pub append: LoadState,
}

impl CombinedLoadStates {
    /// The state the list footer should show: refresh while the first page
    /// is outstanding, append afterwards.
    pub fn footer_state(&self) -> &LoadState {
        match &self.refresh {
            LoadState::Idle { .. } => &self.append,
            other => other,
        }
    }
}
