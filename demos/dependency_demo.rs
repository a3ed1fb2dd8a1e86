//! Shows heuristic dependency detection: a write, a read of the same file
//! and a delete are submitted together and come out as three ordered
//! batches, executed over a real temp file.

use async_trait::async_trait;
use std::sync::Arc;
use strata_core::{
    DependencyResolver, DispatchMode, ParallelToolExecutor, Tool, ToolCall, ToolError,
    ToolRegistry, ToolSchema,
};

struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("write_file", "Write content to a file", vec![])
    }

    fn dispatch_mode(&self) -> DispatchMode {
        DispatchMode::Blocking
    }

    async fn execute(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        self.execute_blocking(call)
    }

    fn execute_blocking(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        let path = call
            .get_string("path")
            .ok_or_else(|| ToolError::InvalidArguments("missing 'path'".to_string()))?;
        let content = call.get_string("content").unwrap_or_default();
        std::fs::write(&path, &content)?;
        Ok(serde_json::json!({ "path": path, "bytes": content.len() }))
    }
}

struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read a file"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("read_file", "Read a file", vec![])
    }

    async fn execute(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        let path = call
            .get_string("path")
            .ok_or_else(|| ToolError::InvalidArguments("missing 'path'".to_string()))?;
        let text = tokio::fs::read_to_string(&path).await?;
        Ok(serde_json::json!({ "path": path, "content": text }))
    }
}

struct DeleteFileTool;

#[async_trait]
impl Tool for DeleteFileTool {
    fn name(&self) -> &str {
        "delete_file"
    }

    fn description(&self) -> &str {
        "Delete a file"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("delete_file", "Delete a file", vec![])
    }

    fn dispatch_mode(&self) -> DispatchMode {
        DispatchMode::Blocking
    }

    async fn execute(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        self.execute_blocking(call)
    }

    fn execute_blocking(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        let path = call
            .get_string("path")
            .ok_or_else(|| ToolError::InvalidArguments("missing 'path'".to_string()))?;
        std::fs::remove_file(&path)?;
        Ok(serde_json::json!({ "deleted": path }))
    }
}

fn args(value: serde_json::Value) -> std::collections::HashMap<String, serde_json::Value> {
    serde_json::from_value(value).expect("demo arguments are valid objects")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🚀 Dependency detection demo");
    println!("============================");

    let path = std::env::temp_dir()
        .join(format!("strata-demo-{}.txt", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .to_string();

    let mut calls = vec![
        ToolCall::new(
            "write",
            "write_file",
            args(serde_json::json!({ "path": path, "content": "hello from strata\n" })),
        ),
        ToolCall::new(
            "read",
            "read_file",
            args(serde_json::json!({ "path": path })),
        ),
        ToolCall::new(
            "cleanup",
            "delete_file",
            args(serde_json::json!({ "path": path })),
        ),
    ];

    let resolver = DependencyResolver::new();
    let added = resolver.auto_detect_dependencies(&mut calls);
    println!("\nInferred {added} dependency edge(s)");

    println!("\nExecution plan:");
    for (index, batch) in resolver.analyze_dependencies(&calls)?.iter().enumerate() {
        let ids: Vec<_> = batch.iter().map(|c| c.id.as_str()).collect();
        println!("  batch {index}: {}", ids.join(", "));
    }

    let registry = Arc::new(ToolRegistry::new());
    registry.register(Arc::new(WriteFileTool));
    registry.register(Arc::new(ReadFileTool));
    registry.register(Arc::new(DeleteFileTool));

    let executor = ParallelToolExecutor::new(registry);
    // dependencies are already in place, no second detection pass needed
    let results = executor.execute_batch(&calls, false, None).await?;

    println!("\nResults:");
    for result in &results {
        println!(
            "  {} [{}] -> {:?} in {:?}",
            result.tool_name, result.call_id, result.status, result.execution_time
        );
        if let Some(output) = &result.output {
            println!("    output: {output}");
        }
    }

    Ok(())
}
