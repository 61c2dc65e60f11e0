use crate::paging::Pager;
use crate::ui::mvi::Intent;

/// Intents handled by the list view model.
#[derive(Debug, Clone)]
pub enum ListIntent {
    /// Load the catalog list. Sent once when the screen becomes ready.
    FetchList,

    /// The lazy item sequence has been built.
    ListLoaded(Pager),
}

impl Intent for ListIntent {}
