//! Base trait for partial changes in MVI architecture.

/// Marker trait for partial change objects.
///
/// A change is ephemeral: it is produced by the async side of the store,
/// consumed once by the reducer (and possibly mapped to an event), and
/// never stored.
pub trait Change: std::fmt::Debug + Send + 'static {}
