//! Tool system for the Strata engine

pub mod base;
pub mod executor;
pub mod names;
pub mod progress;
pub mod registry;
pub mod resolver;
pub mod types;


pub use base::{DispatchMode, Tool, ToolError};
pub use executor::{
    CANCELLED_MESSAGE, DEFAULT_MAX_CONCURRENT, ExecutorBuilder, ExecutorConfig, ExecutorStats,
    ParallelToolExecutor,
};
pub use progress::{ProgressCallback, ProgressEvent};
pub use registry::ToolRegistry;
pub use resolver::DependencyResolver;
pub use types::{ToolCall, ToolParameter, ToolResult, ToolSchema, ToolStatus};
