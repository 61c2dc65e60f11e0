use crate::catalog::{CatalogItem, ItemDetail};
use crate::ui::mvi::UiState;

/// State of the detail popup.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailDialogState {
    #[default]
    Hidden,

    /// Detail for `item` is being fetched.
    Loading {
        item: CatalogItem,
        /// Animation tick for spinner.
        animation_tick: u8,
    },

    Ready {
        item: CatalogItem,
        detail: ItemDetail,
    },

    Failed {
        item: CatalogItem,
        error: String,
    },
}

impl UiState for DetailDialogState {}

impl DetailDialogState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn item(&self) -> Option<&CatalogItem> {
        match self {
            Self::Hidden => None,
            Self::Loading { item, .. } | Self::Ready { item, .. } | Self::Failed { item, .. } => {
                Some(item)
            }
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
