//! End-to-end workflow tests against the public facade
//!
//! Exercises real file tools through the executor: heuristic dependency
//! detection over a temp directory, blocking dispatch, progress events,
//! and statistics.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use strata::{
    DispatchMode, ParallelToolExecutor, Tool, ToolCall, ToolError, ToolParameter, ToolRegistry,
    ToolSchema, ToolStatus,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

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
        ToolSchema::new(
            "write_file",
            "Write content to a file",
            vec![
                ToolParameter::string("path", "Target file path"),
                ToolParameter::string("content", "Content to write"),
            ],
        )
    }

    fn dispatch_mode(&self) -> DispatchMode {
        DispatchMode::Blocking
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        if call.get_string("path").is_none() {
            return Err(ToolError::InvalidArguments("missing 'path'".to_string()));
        }
        Ok(())
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

struct ReadFilesTool;

#[async_trait]
impl Tool for ReadFilesTool {
    fn name(&self) -> &str {
        "read_files"
    }

    fn description(&self) -> &str {
        "Read several files at once"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "read_files",
            "Read several files at once",
            vec![ToolParameter::string_array("paths", "File paths to read")],
        )
    }

    async fn execute(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        let paths = call
            .get_strings("paths")
            .ok_or_else(|| ToolError::InvalidArguments("missing 'paths'".to_string()))?;

        let mut contents = serde_json::Map::new();
        for path in paths {
            let text = tokio::fs::read_to_string(&path).await?;
            contents.insert(path, text.into());
        }
        Ok(contents.into())
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
        ToolSchema::new(
            "delete_file",
            "Delete a file",
            vec![ToolParameter::string("path", "File path to delete")],
        )
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

fn file_tools() -> Arc<ToolRegistry> {
    let registry = Arc::new(ToolRegistry::new());
    registry.register(Arc::new(WriteFileTool));
    registry.register(Arc::new(ReadFilesTool));
    registry.register(Arc::new(DeleteFileTool));
    registry
}

fn write_call(id: &str, path: &str, content: &str) -> ToolCall {
    ToolCall::new(
        id,
        "write_file",
        serde_json::from_value(serde_json::json!({ "path": path, "content": content })).unwrap(),
    )
}

fn read_call(id: &str, paths: &[&str]) -> ToolCall {
    ToolCall::new(
        id,
        "read_files",
        serde_json::from_value(serde_json::json!({ "paths": paths })).unwrap(),
    )
}

fn delete_call(id: &str, path: &str) -> ToolCall {
    ToolCall::new(
        id,
        "delete_file",
        serde_json::from_value(serde_json::json!({ "path": path })).unwrap(),
    )
}

#[tokio::test]
async fn test_write_then_read_with_inferred_dependency() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("module.py").to_string_lossy().to_string();
    let marker = uuid::Uuid::new_v4().to_string();

    let executor = ParallelToolExecutor::new(file_tools());
    let calls = vec![
        write_call("w", &path, &format!("# {marker}\n")),
        read_call("r", &[&path]),
    ];

    let results = executor.execute_batch(&calls, true, None).await.unwrap();

    assert_eq!(results[0].status, ToolStatus::Completed);
    assert_eq!(results[1].status, ToolStatus::Completed);

    let output = results[1].output.as_ref().unwrap();
    let content = output[path.as_str()].as_str().unwrap();
    assert!(content.contains(&marker));
}

#[tokio::test]
async fn test_delete_runs_after_everything_on_its_path() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scratch.txt").to_string_lossy().to_string();

    let executor = ParallelToolExecutor::new(file_tools());
    let calls = vec![
        write_call("w", &path, "scratch data"),
        read_call("r", &[&path]),
        delete_call("d", &path),
    ];

    let results = executor.execute_batch(&calls, true, None).await.unwrap();

    assert!(results.iter().all(|r| r.status == ToolStatus::Completed));
    assert!(!Path::new(&path).exists());
}

#[tokio::test]
async fn test_progress_events_track_the_batches() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.txt").to_string_lossy().to_string();

    let tags: Arc<std::sync::Mutex<Vec<String>>> = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = tags.clone();

    let executor = ParallelToolExecutor::new(file_tools());
    let calls = vec![write_call("w", &path, "x"), read_call("r", &[&path])];

    executor
        .execute_batch(
            &calls,
            true,
            Some(Arc::new(move |event| {
                let tag = serde_json::to_value(&event).unwrap()["type"]
                    .as_str()
                    .unwrap()
                    .to_string();
                sink.lock().unwrap().push(tag);
            })),
        )
        .await
        .unwrap();

    // one call per batch, so the stream is fully deterministic
    let tags = tags.lock().unwrap().clone();
    assert_eq!(
        tags,
        vec![
            "batch_started",
            "tool_start",
            "tool_complete",
            "batch_started",
            "tool_start",
            "tool_complete",
        ]
    );
}

#[tokio::test]
async fn test_stats_reflect_the_workflow() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.txt").to_string_lossy().to_string();

    let executor = ParallelToolExecutor::new(file_tools());
    let calls = vec![write_call("w", &path, "data"), read_call("r", &[&path])];

    executor.execute_batch(&calls, true, None).await.unwrap();

    let stats = executor.get_stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.cancelled, 0);
    assert_eq!(stats.completed + stats.failed, stats.total);
}
