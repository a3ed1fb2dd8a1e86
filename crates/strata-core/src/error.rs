//! Error types for the Strata engine

use thiserror::Error;

/// Result type alias for Strata operations
pub type StrataResult<T> = Result<T, StrataError>;

/// Main error type for the Strata engine
#[derive(Error, Debug, Clone)]
pub enum StrataError {
    /// A dependency cycle prevents any execution order
    #[error("Circular dependency detected among tool calls: {}", stuck.join(", "))]
    CircularDependency { stuck: Vec<String> },

    /// A call references a dependency id that is not part of the submitted set
    #[error("Call '{call_id}' depends on unknown call '{dependency_id}'")]
    UnknownDependency {
        call_id: String,
        dependency_id: String,
    },

    /// Two calls in the same submission share an id
    #[error("Duplicate tool call id: '{id}'")]
    DuplicateCallId { id: String },

    /// Tool execution errors
    #[error("Tool error: {tool_name}: {message}")]
    Tool { tool_name: String, message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

impl StrataError {
    /// Create a new tool error
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Create a new circular dependency error from the unschedulable call ids
    pub fn circular(stuck: Vec<String>) -> Self {
        Self::CircularDependency { stuck }
    }

    /// Create a new unknown dependency error
    pub fn unknown_dependency(
        call_id: impl Into<String>,
        dependency_id: impl Into<String>,
    ) -> Self {
        Self::UnknownDependency {
            call_id: call_id.into(),
            dependency_id: dependency_id.into(),
        }
    }

    /// Create a new duplicate id error
    pub fn duplicate_call_id(id: impl Into<String>) -> Self {
        Self::DuplicateCallId { id: id.into() }
    }
}

impl From<anyhow::Error> for StrataError {
    fn from(error: anyhow::Error) -> Self {
        Self::Other(error.to_string())
    }
}

impl From<std::io::Error> for StrataError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for StrataError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}
