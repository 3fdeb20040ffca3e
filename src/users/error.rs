use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

/// Unexpected failures caught at the store boundary.
///
/// These are logged and kept for diagnostics; they never stop the store
/// from publishing its last good state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Branch '{branch}' panicked: {message}")]
    BranchPanicked {
        branch: &'static str,
        message: String,
    },

    #[error("Operation in branch '{branch}' panicked: {message}")]
    OperationPanicked {
        branch: &'static str,
        message: String,
    },

    #[error("Reducer panicked: {message}")]
    ReducerPanicked { message: String },
}

/// Shared slot for the most recent [`PipelineError`].
#[derive(Debug, Clone, Default)]
pub struct PipelineErrors {
    last: Arc<Mutex<Option<PipelineError>>>,
}

impl PipelineErrors {
    /// Log `error` and keep it as the most recent one.
    pub fn record(&self, error: PipelineError) {
        tracing::error!(error = %error, "Pipeline error suppressed, keeping last state");
        *self.last.lock() = Some(error);
    }

    pub fn last(&self) -> Option<PipelineError> {
        self.last.lock().clone()
    }
}

/// Misuse of the store lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Store already started")]
    AlreadyStarted,

    #[error("Store has been disposed")]
    Disposed,

    #[error("No tokio runtime available to start the store")]
    NoRuntime,
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
