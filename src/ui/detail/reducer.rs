use crate::ui::mvi::Reducer;

use super::intent::DetailIntent;
use super::state::DetailDialogState;

pub struct DetailReducer;

impl Reducer for DetailReducer {
    type State = DetailDialogState;
    type Intent = DetailIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DetailIntent::Open { item } => DetailDialogState::Loading {
                item,
                animation_tick: 0,
            },

            DetailIntent::AnimationTick => match state {
                DetailDialogState::Loading {
                    item,
                    animation_tick,
                } => DetailDialogState::Loading {
                    item,
                    animation_tick: animation_tick.wrapping_add(1),
                },
                other => other,
            },

            // Results for an item that is no longer shown are dropped.
            DetailIntent::Loaded { id, detail } => match state {
                DetailDialogState::Loading { item, .. } if item.id == id => {
                    if detail.id == id {
                        DetailDialogState::Ready { item, detail }
                    } else {
                        DetailDialogState::Failed {
                            item,
                            error: "unexpected response".to_string(),
                        }
                    }
                }
                other => other,
            },

            DetailIntent::LoadFailed { message } => match state {
                DetailDialogState::Loading { item, .. } => DetailDialogState::Failed {
                    item,
                    error: message,
                },
                other => other,
            },

            DetailIntent::RetryClicked => match state {
                DetailDialogState::Failed { item, .. } => DetailDialogState::Loading {
                    item,
                    animation_tick: 0,
                },
                other => other,
            },

            DetailIntent::Close => DetailDialogState::Hidden,
        }
    }
}
