//! Progress events emitted during batch execution
//!
//! The executor reports per-call lifecycle transitions through an optional
//! callback so hosts can render progress without owning the execution loop.
//! Callbacks run inline on the executing task; expensive sinks should
//! forward events to a channel instead of doing work in the callback.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// A progress update for one submitted batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A dependency level began executing
    BatchStarted { index: usize, size: usize },

    /// A tool call acquired a permit and started running
    ToolStart { tool: String, id: String },

    /// A tool call finished successfully
    ToolComplete {
        tool: String,
        id: String,
        #[serde(with = "humantime_serde")]
        time: Duration,
    },

    /// A tool call finished with an error
    ToolFailed {
        tool: String,
        id: String,
        error: String,
        #[serde(with = "humantime_serde")]
        time: Duration,
    },

    /// A tool call was cancelled before it started
    ToolCancelled { tool: String, id: String },
}

/// Callback invoked for every progress event of one `execute_batch` call
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;
