//! Tool-related type definitions

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// A tool call requested by the LLM
///
/// Calls are immutable once scheduling begins. `dependencies` holds the ids
/// of calls that must reach a terminal state before this one may start; it
/// is empty unless the caller set it or the heuristic detection pass added
/// inferred edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call within one submission
    pub id: String,
    /// Name of the tool to call
    pub name: String,
    /// Arguments to pass to the tool
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
    /// Ids of calls this one must wait for
    #[serde(default)]
    pub dependencies: HashSet<String>,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
            dependencies: HashSet::new(),
        }
    }

    /// Create a tool call with a generated UUID id
    pub fn generated(
        name: impl Into<String>,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), name, arguments)
    }

    /// Add a dependency on another call id
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.insert(id.into());
        self
    }

    /// Add dependencies on several call ids
    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Get a typed argument value
    pub fn get_argument<T>(&self, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.arguments
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_argument::<String>(key)
    }

    /// Get a string array argument
    pub fn get_strings(&self, key: &str) -> Option<Vec<String>> {
        self.get_argument::<Vec<String>>(key)
    }

    /// Get a boolean argument
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_argument::<bool>(key)
    }

    /// Get a number argument
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get_argument::<f64>(key)
    }
}

/// Lifecycle state of a tool call
///
/// `Pending -> Running -> Completed | Failed`, or `Pending -> Cancelled`
/// when the call never starts. Terminal states never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl ToolStatus {
    /// Whether this state is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// Outcome of one tool call
///
/// Results are constructed by the executor, never by tools: a tool returns
/// a raw `serde_json::Value` (or an error) and the engine wraps it together
/// with status and timing. `execution_time` is wall clock from immediately
/// before invocation to immediately after; cancelled calls never ran and
/// carry `Duration::ZERO`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool call id this result corresponds to
    pub call_id: String,
    /// Name of the tool that was requested
    pub tool_name: String,
    /// Final state of the call
    pub status: ToolStatus,
    /// Value returned by the tool (present when completed)
    pub output: Option<serde_json::Value>,
    /// Error message (present when failed or cancelled)
    pub error: Option<String>,
    /// Wall-clock execution time
    #[serde(with = "humantime_serde")]
    pub execution_time: Duration,
}

impl ToolResult {
    /// Create a completed result
    pub fn completed(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: serde_json::Value,
        execution_time: Duration,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            status: ToolStatus::Completed,
            output: Some(output),
            error: None,
            execution_time,
        }
    }

    /// Create a failed result
    pub fn failed(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        error: impl Into<String>,
        execution_time: Duration,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            status: ToolStatus::Failed,
            output: None,
            error: Some(error.into()),
            execution_time,
        }
    }

    /// Create a cancelled result for a call that never started
    pub fn cancelled(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            status: ToolStatus::Cancelled,
            output: None,
            error: Some(reason.into()),
            execution_time: Duration::ZERO,
        }
    }

    /// Whether the call completed successfully
    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Completed
    }
}

/// Parameter definition for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Parameter type (string, number, boolean, array)
    pub param_type: String,
    /// Element type for array parameters
    pub item_type: Option<String>,
    /// Whether this parameter is required
    pub required: bool,
    /// Default value (if any)
    pub default: Option<serde_json::Value>,
}

impl ToolParameter {
    fn typed(name: impl Into<String>, description: impl Into<String>, param_type: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            param_type: param_type.to_string(),
            item_type: None,
            required: true,
            default: None,
        }
    }

    /// Create a required string parameter
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::typed(name, description, "string")
    }

    /// Create an optional string parameter
    pub fn optional_string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::typed(name, description, "string").optional()
    }

    /// Create a boolean parameter
    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::typed(name, description, "boolean")
    }

    /// Create a number parameter
    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::typed(name, description, "number")
    }

    /// Create a required array-of-strings parameter
    pub fn string_array(name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut param = Self::typed(name, description, "array");
        param.item_type = Some("string".to_string());
        param
    }

    /// Make parameter optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set default value
    pub fn with_default<V: Into<serde_json::Value>>(mut self, default: V) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// JSON schema for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// Input parameters schema
    pub parameters: serde_json::Value,
}

impl ToolSchema {
    /// Create a new tool schema
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Vec<ToolParameter>,
    ) -> Self {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in parameters {
            if param.required {
                required.push(param.name.clone());
            }

            let mut param_schema = serde_json::Map::new();
            param_schema.insert("type".to_string(), param.param_type.into());
            param_schema.insert("description".to_string(), param.description.into());

            if let Some(item_type) = param.item_type {
                param_schema.insert(
                    "items".to_string(),
                    serde_json::json!({ "type": item_type }),
                );
            }

            if let Some(default) = param.default {
                param_schema.insert("default".to_string(), default);
            }

            properties.insert(param.name, param_schema.into());
        }

        let parameters_schema = serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required
        });

        Self {
            name: name.into(),
            description: description.into(),
            parameters: parameters_schema,
        }
    }
}
