//! Cancels a running submission mid-flight: the call that already started
//! finishes, everything still waiting is reported as cancelled.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use strata_core::{
    ExecutorConfig, ParallelToolExecutor, Tool, ToolCall, ToolError, ToolRegistry, ToolSchema,
};

struct SlowTool;

#[async_trait]
impl Tool for SlowTool {
    fn name(&self) -> &str {
        "slow_operation"
    }

    fn description(&self) -> &str {
        "Sleeps for a while"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("slow_operation", "Sleeps for a while", vec![])
    }

    async fn execute(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError> {
        tokio::time::sleep(Duration::from_millis(400)).await;
        Ok(serde_json::json!({ "finished": call.id }))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🚀 Cancellation demo");
    println!("====================");

    let registry = Arc::new(ToolRegistry::new());
    registry.register(Arc::new(SlowTool));

    // one permit, so the calls queue up behind each other
    let executor = Arc::new(ParallelToolExecutor::with_config(
        registry,
        ExecutorConfig { max_concurrent: 1 },
    ));

    let calls: Vec<ToolCall> = (0..4)
        .map(|i| ToolCall::new(format!("call-{i}"), "slow_operation", HashMap::new()))
        .collect();

    let cancel_handle = executor.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        println!("\n⚡ Cancelling mid-run...");
        cancel_handle.cancel();
    });

    println!("\nSubmitting {} calls, cancelling after 150ms...", calls.len());
    let results = executor.execute_batch(&calls, false, None).await?;

    println!("\nResults:");
    for result in &results {
        match &result.error {
            Some(error) => println!("  [{}] {:?}: {error}", result.call_id, result.status),
            None => println!(
                "  [{}] {:?} in {:?}",
                result.call_id, result.status, result.execution_time
            ),
        }
    }

    let stats = executor.get_stats();
    println!(
        "\nStats: total={} completed={} cancelled={}",
        stats.total, stats.completed, stats.cancelled
    );
    println!("(the in-flight call was allowed to finish; the waiting ones never started)");

    Ok(())
}
