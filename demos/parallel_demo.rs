//! Runs a handful of independent simulated tools concurrently and prints
//! the progress stream and final statistics.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strata_core::{
    ParallelToolExecutor, ProgressEvent, Tool, ToolCall, ToolError, ToolRegistry, ToolSchema,
};

struct SimulatedTool {
    name: String,
    delay: Duration,
}

#[async_trait]
impl Tool for SimulatedTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Simulated tool that sleeps and returns"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(self.name.clone(), "Simulated tool", vec![])
    }

    async fn execute(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        tokio::time::sleep(self.delay).await;
        Ok(serde_json::json!({ "tool": self.name, "call": call.id }))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🚀 Parallel execution demo");
    println!("==========================");

    let registry = Arc::new(ToolRegistry::new());
    for (name, millis) in [
        ("grep_search", 120),
        ("glob_search", 80),
        ("read_file", 60),
        ("list_directory", 40),
    ] {
        registry.register(Arc::new(SimulatedTool {
            name: name.to_string(),
            delay: Duration::from_millis(millis),
        }));
    }

    let executor = ParallelToolExecutor::new(registry);

    let calls: Vec<ToolCall> = ["grep_search", "glob_search", "read_file", "list_directory"]
        .iter()
        .enumerate()
        .map(|(i, name)| ToolCall::new(format!("call-{i}"), *name, HashMap::new()))
        .collect();

    println!("\nSubmitting {} independent calls...", calls.len());

    let progress = Arc::new(|event: ProgressEvent| match event {
        ProgressEvent::BatchStarted { index, size } => {
            println!("  ▶ batch {index} with {size} call(s)");
        }
        ProgressEvent::ToolStart { tool, id } => println!("    {tool} [{id}] started"),
        ProgressEvent::ToolComplete { tool, id, time } => {
            println!("    {tool} [{id}] completed in {time:?}");
        }
        ProgressEvent::ToolFailed { tool, id, error, .. } => {
            println!("    {tool} [{id}] failed: {error}");
        }
        ProgressEvent::ToolCancelled { tool, id } => println!("    {tool} [{id}] cancelled"),
    });

    let start = Instant::now();
    let results = executor.execute_batch(&calls, false, Some(progress)).await?;
    let elapsed = start.elapsed();

    println!("\nAll {} calls finished in {elapsed:?}", results.len());
    println!("(the slowest single tool alone needs 120ms)");

    let stats = executor.get_stats();
    println!(
        "\nStats: total={} completed={} failed={} cancelled={} avg={:?}",
        stats.total, stats.completed, stats.failed, stats.cancelled, stats.average_time
    );

    Ok(())
}
