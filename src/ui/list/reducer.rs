use crate::ui::mvi::Reducer;

use super::intent::ListIntent;
use super::state::ListState;

pub struct ListReducer;

impl Reducer for ListReducer {
    type State = ListState;
    type Intent = ListIntent;

    fn reduce(_state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ListIntent::FetchList => ListState::Loading,
            ListIntent::ListLoaded(items) => ListState::ListReady(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_is_default() {
        assert_eq!(ListState::default(), ListState::Loading);
    }

    #[test]
    fn fetch_list_transitions_to_loading() {
        let state = ListReducer::reduce(ListState::default(), ListIntent::FetchList);
        assert_eq!(state, ListState::Loading);
    }
}
