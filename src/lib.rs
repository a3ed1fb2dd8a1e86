//! Strata
//!
//! Dependency-aware parallel tool execution for LLM agents. One
//! conversation turn can request many tool calls at once; Strata resolves
//! the order they must run in (explicit dependencies plus inferred
//! resource conflicts), executes independent calls concurrently under a
//! bounded ceiling, isolates failures, and reports progress and
//! statistics.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use strata::{ParallelToolExecutor, ToolCall, ToolRegistry};
//! # use strata::{Tool, ToolError, ToolSchema};
//! # struct EchoTool;
//! # #[async_trait::async_trait]
//! # impl Tool for EchoTool {
//! #     fn name(&self) -> &str { "echo" }
//! #     fn description(&self) -> &str { "Echo arguments back" }
//! #     fn schema(&self) -> ToolSchema { ToolSchema::new("echo", "Echo arguments back", vec![]) }
//! #     async fn execute(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
//! #         Ok(serde_json::json!(call.arguments))
//! #     }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> strata::StrataResult<()> {
//!     let registry = Arc::new(ToolRegistry::new());
//!     registry.register(Arc::new(EchoTool));
//!
//!     let executor = ParallelToolExecutor::new(registry);
//!     let calls = vec![ToolCall::new("1", "echo", HashMap::new())];
//!     let results = executor.execute_batch(&calls, true, None).await?;
//!     assert!(results[0].is_success());
//!     Ok(())
//! }
//! ```

pub use strata_core::error;
pub use strata_core::tools;

// Re-export commonly used types from core
pub use strata_core::{
    DependencyResolver, DispatchMode, ExecutorBuilder, ExecutorConfig, ExecutorStats,
    ParallelToolExecutor, ProgressCallback, ProgressEvent, StrataError, StrataResult, Tool,
    ToolCall, ToolError, ToolParameter, ToolRegistry, ToolResult, ToolSchema, ToolStatus,
};
