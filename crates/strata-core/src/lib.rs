//! Strata Core Library
//!
//! This crate provides the execution engine behind Strata: dependency
//! resolution for batches of LLM tool calls, bounded parallel execution,
//! cooperative cancellation, progress reporting, and execution statistics.

pub mod error;
pub mod tools;

// Re-export commonly used types
pub use error::{StrataError, StrataResult};
pub use tools::{
    DependencyResolver, DispatchMode, ExecutorBuilder, ExecutorConfig, ExecutorStats,
    ParallelToolExecutor, ProgressCallback, ProgressEvent, Tool, ToolCall, ToolError,
    ToolParameter, ToolRegistry, ToolResult, ToolSchema, ToolStatus,
};
