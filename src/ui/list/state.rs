use crate::paging::Pager;
use crate::ui::mvi::UiState;

/// What the list screen renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListState {
    #[default]
    Loading,

    /// Items are available as a lazily paged sequence.
    ListReady(Pager),
}

impl UiState for ListState {}
