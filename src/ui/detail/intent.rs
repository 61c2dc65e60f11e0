use crate::catalog::{CatalogItem, ItemDetail};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum DetailIntent {
    /// Show the popup for `item` and start loading its detail.
    Open { item: CatalogItem },

    /// Animation tick (for spinner updates).
    AnimationTick,

    /// Detail fetched for the item with `id`.
    Loaded { id: u32, detail: ItemDetail },

    LoadFailed { message: String },

    /// User asked to retry a failed load.
    RetryClicked,

    Close,
}

impl Intent for DetailIntent {}
