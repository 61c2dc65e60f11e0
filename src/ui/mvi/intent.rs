/// Marker trait for intents.
///
/// Intents are either user actions (select, retry, close) or results of
/// background work (a page sequence is ready, a detail failed to load).
/// They may cross task boundaries, hence `Send`.
pub trait Intent: Send + 'static {}
