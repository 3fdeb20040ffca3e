use serde::{Deserialize, Serialize};

use crate::bus::DEFAULT_INTENT_BUFFER;

/// Buffer sizes for the store pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Intents buffered per branch before new ones are dropped (default: 64).
    #[serde(default = "default_intent_buffer")]
    pub intent_buffer: usize,
    /// Single events buffered before the pipeline waits for a consumer (default: 64).
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    /// Partial changes buffered between branches and the reducer (default: 64).
    #[serde(default = "default_change_buffer")]
    pub change_buffer: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            intent_buffer: default_intent_buffer(),
            event_buffer: default_event_buffer(),
            change_buffer: default_change_buffer(),
        }
    }
}

fn default_intent_buffer() -> usize {
    DEFAULT_INTENT_BUFFER
}

fn default_event_buffer() -> usize {
    64
}

fn default_change_buffer() -> usize {
    64
}
