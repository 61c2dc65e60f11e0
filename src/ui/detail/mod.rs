//! Detail popup feature module.
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - dialog state enum
//! - `intent.rs` - user actions and load results
//! - `reducer.rs` - state transitions
//! - `presenter.rs` - `DetailPresenter` capability and the dialog driving it
//! - `dialog.rs` - rendering

mod dialog;
mod intent;
mod presenter;
mod reducer;
mod state;

pub use dialog::render_detail_dialog;
pub use intent::DetailIntent;
pub use presenter::{DetailDialog, DetailPresenter};
pub use reducer::DetailReducer;
pub use state::DetailDialogState;
