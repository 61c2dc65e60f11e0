//! Paging coordinator: turns page fetches into one growing list and reports
//! load states for the initial and follow-up loads.

mod load_state;
mod pager;

pub use load_state::{CombinedLoadStates, LoadState};
pub use pager::{Pager, PagerConfig};
