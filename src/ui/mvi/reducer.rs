use super::intent::Intent;
use super::state::UiState;

/// The only place where state transitions happen.
///
/// Side effects (fetching, spawning) belong to whoever dispatches; `reduce`
/// stays pure so transitions can be tested without a runtime.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
