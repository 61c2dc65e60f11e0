//! List screen feature module.
//!
//! - `state.rs` - `Loading` / `ListReady`
//! - `intent.rs` - `FetchList` and its result
//! - `reducer.rs` - state transitions
//! - `view_model.rs` - runs intents on the runtime and publishes state

mod intent;
mod reducer;
mod state;
mod view_model;

pub use intent::ListIntent;
pub use reducer::ListReducer;
pub use state::ListState;
pub use view_model::ListViewModel;
