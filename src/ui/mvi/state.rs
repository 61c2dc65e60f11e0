/// Marker trait for UI state.
///
/// `Default` is the state before any intent; `PartialEq` lets observers skip
/// renders when nothing changed.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
