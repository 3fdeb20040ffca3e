//! Base trait for intents (user actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent discrete user-triggered requests (load, refresh,
/// remove an item). They are never reduced directly: the store derives
/// changes from them first.
pub trait Intent: Clone + std::fmt::Debug + Send + Sync + 'static {}
