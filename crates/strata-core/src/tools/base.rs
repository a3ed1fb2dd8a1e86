//! Base trait and types for tools

use crate::tools::types::{ToolCall, ToolSchema};
use async_trait::async_trait;

/// Error type for tool operations
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Invalid arguments provided to the tool
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Tool execution failed
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// How the executor dispatches a tool
///
/// Suspending tools await cooperatively on the runtime. Blocking tools hold
/// their thread for the duration of the call (synchronous IO, CPU-bound
/// work) and are routed through `spawn_blocking` so they cannot starve the
/// async worker threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Tool suspends at await points; runs directly on the async runtime
    #[default]
    Suspending,

    /// Tool blocks its thread; runs on the blocking worker pool
    Blocking,
}

/// Base trait for all tools
///
/// Tools return their raw output value; the executor wraps it into a
/// `ToolResult` together with status and timing. A tool never constructs
/// result records itself.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's unique name
    ///
    /// Tool names must be unique within a registry and should follow
    /// the pattern: lowercase with underscores (e.g., "read_file").
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description is included in the system prompt to help the
    /// LLM understand when to use this tool.
    fn description(&self) -> &str;

    /// Get the tool's JSON schema for input parameters
    fn schema(&self) -> ToolSchema;

    /// How the executor should dispatch this tool
    fn dispatch_mode(&self) -> DispatchMode {
        DispatchMode::Suspending
    }

    /// Execute the tool with the given arguments
    ///
    /// Blocking tools typically implement this as a delegation to
    /// `execute_blocking` and are never called here by the executor.
    async fn execute(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError>;

    /// Execute the tool synchronously
    ///
    /// Called by the executor on the blocking worker pool when
    /// `dispatch_mode` is `Blocking`. The default fails so a tool tagged
    /// blocking without an implementation surfaces as a failed call
    /// instead of a hang.
    fn execute_blocking(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        let _ = call;
        Err(ToolError::ExecutionFailed(format!(
            "Tool '{}' does not implement blocking execution",
            self.name()
        )))
    }

    /// Validate the tool call arguments
    ///
    /// Default implementation does nothing. Override for custom validation.
    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let _ = call;
        Ok(())
    }
}
