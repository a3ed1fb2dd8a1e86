//! Parallel tool executor with dependency-aware batch scheduling
//!
//! This module provides the batch executor that:
//! - Resolves calls into dependency-ordered batches before anything runs
//! - Runs calls within a batch concurrently under a global semaphore
//! - Starts a batch only when every call of the previous one is terminal
//! - Supports cooperative cancellation via CancellationToken
//! - Routes blocking tools through the spawn_blocking worker pool

use crate::error::StrataResult;
use crate::tools::base::{DispatchMode, Tool, ToolError};
use crate::tools::progress::{ProgressCallback, ProgressEvent};
use crate::tools::registry::ToolRegistry;
use crate::tools::resolver::DependencyResolver;
use crate::tools::types::{ToolCall, ToolResult, ToolStatus};
use futures::future::join_all;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Default ceiling for concurrently running tool calls
pub const DEFAULT_MAX_CONCURRENT: usize = 10;

/// Error text for calls that never ran because the run was cancelled or a
/// dependency did not complete
pub const CANCELLED_MESSAGE: &str = "Execution cancelled or dependency failed";

/// Configuration for the parallel executor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Maximum number of tool calls that may run at the same time
    pub max_concurrent: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

/// Executor statistics, cumulative over the executor's lifetime
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExecutorStats {
    /// Calls submitted across all runs
    pub total: u64,
    /// Calls that completed successfully
    pub completed: u64,
    /// Calls that ran and failed
    pub failed: u64,
    /// Calls that never started
    pub cancelled: u64,
    /// Summed wall-clock execution time of attempted calls
    #[serde(with = "humantime_serde")]
    pub total_time: Duration,
    /// Mean execution time of attempted calls
    #[serde(with = "humantime_serde")]
    pub average_time: Duration,
}

/// Parallel tool executor
///
/// Drives one submission at a time through resolver-produced batches. The
/// per-run result table lives on the stack of `execute_batch`; only the
/// statistics persist across runs. Cancellation is cooperative and takes
/// effect at batch boundaries and permit waits; a call that already started
/// always runs to completion. The executor imposes no per-call timeout, so
/// a tool that never returns stalls its batch indefinitely.
pub struct ParallelToolExecutor {
    /// Registered tools
    registry: Arc<ToolRegistry>,
    /// Dependency resolution
    resolver: DependencyResolver,
    /// Global concurrency semaphore
    semaphore: Arc<Semaphore>,
    /// Cancellation token, one-shot for this executor instance
    cancellation_token: CancellationToken,
    /// Execution statistics
    stats: RwLock<ExecutorStats>,
}

impl ParallelToolExecutor {
    /// Create a new executor with the default configuration
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self::with_config(registry, ExecutorConfig::default())
    }

    /// Create a new executor with a custom configuration
    pub fn with_config(registry: Arc<ToolRegistry>, config: ExecutorConfig) -> Self {
        // a ceiling of zero could never grant a permit
        let permits = config.max_concurrent.max(1);

        Self {
            registry,
            resolver: DependencyResolver::new(),
            semaphore: Arc::new(Semaphore::new(permits)),
            cancellation_token: CancellationToken::new(),
            stats: RwLock::new(ExecutorStats::default()),
        }
    }

    /// Execute a set of tool calls, respecting dependencies
    ///
    /// When `auto_detect_deps` is set, implicit dependencies are inferred
    /// from resource conflicts before scheduling. Returns one result per
    /// input call, in input order; calls that never ran carry a cancelled
    /// result. Fails without executing anything when the call set is
    /// invalid (duplicate ids, unknown dependency ids, cycles). A call
    /// rejected before dispatch (unknown tool, skipped or cancelled)
    /// emits only its terminal progress event, never a `ToolStart`.
    pub async fn execute_batch(
        &self,
        calls: &[ToolCall],
        auto_detect_deps: bool,
        progress: Option<ProgressCallback>,
    ) -> StrataResult<Vec<ToolResult>> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        let mut working = calls.to_vec();
        if auto_detect_deps {
            let added = self.resolver.auto_detect_dependencies(&mut working);
            if added > 0 {
                tracing::debug!(edges = added, "augmented submission with inferred dependencies");
            }
        }

        let batches = self.resolver.analyze_dependencies(&working)?;
        tracing::debug!(
            calls = working.len(),
            batches = batches.len(),
            "executing tool call batches"
        );

        let mut outcomes: HashMap<String, ToolResult> = HashMap::with_capacity(working.len());

        for (index, batch) in batches.into_iter().enumerate() {
            if self.cancellation_token.is_cancelled() {
                break;
            }

            emit(
                &progress,
                ProgressEvent::BatchStarted {
                    index,
                    size: batch.len(),
                },
            );

            let mut runnable = Vec::with_capacity(batch.len());
            for call in batch {
                if self.has_unmet_dependency(&call, &outcomes) {
                    emit(
                        &progress,
                        ProgressEvent::ToolCancelled {
                            tool: call.name.clone(),
                            id: call.id.clone(),
                        },
                    );
                    outcomes.insert(
                        call.id.clone(),
                        ToolResult::cancelled(&call.id, &call.name, CANCELLED_MESSAGE),
                    );
                } else {
                    runnable.push(call);
                }
            }

            // barrier: the next batch starts only when all of these are done
            let futures: Vec<_> = runnable
                .into_iter()
                .map(|call| self.run_call(call, progress.clone()))
                .collect();
            for result in join_all(futures).await {
                outcomes.insert(result.call_id.clone(), result);
            }
        }

        let mut results = Vec::with_capacity(working.len());
        for call in &working {
            let result = match outcomes.remove(&call.id) {
                Some(result) => result,
                None => {
                    emit(
                        &progress,
                        ProgressEvent::ToolCancelled {
                            tool: call.name.clone(),
                            id: call.id.clone(),
                        },
                    );
                    ToolResult::cancelled(&call.id, &call.name, CANCELLED_MESSAGE)
                }
            };
            results.push(result);
        }

        self.record_outcomes(&results);
        Ok(results)
    }

    /// Cancel the current and any future submissions
    ///
    /// Takes effect before the next batch starts and at every permit wait;
    /// calls already running are never interrupted. The token is not
    /// reusable: build a fresh executor to run again after cancelling.
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    /// Whether this executor has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Get execution statistics
    pub fn get_stats(&self) -> ExecutorStats {
        self.stats.read().clone()
    }

    /// Reset statistics
    pub fn reset_stats(&self) {
        *self.stats.write() = ExecutorStats::default();
    }

    /// Whether any dependency of `call` finished in a non-completed state
    fn has_unmet_dependency(
        &self,
        call: &ToolCall,
        outcomes: &HashMap<String, ToolResult>,
    ) -> bool {
        call.dependencies.iter().any(|dep| {
            outcomes
                .get(dep)
                .is_some_and(|result| result.status != ToolStatus::Completed)
        })
    }

    /// Run one call: wait for a permit, dispatch, wrap the outcome
    async fn run_call(&self, call: ToolCall, progress: Option<ProgressCallback>) -> ToolResult {
        if self.cancellation_token.is_cancelled() {
            return self.cancelled_result(&call, &progress);
        }

        let permit = tokio::select! {
            _ = self.cancellation_token.cancelled() => None,
            permit = Arc::clone(&self.semaphore).acquire_owned() => permit.ok(),
        };
        let Some(_permit) = permit else {
            return self.cancelled_result(&call, &progress);
        };

        // cancellation may have raced the permit grant
        if self.cancellation_token.is_cancelled() {
            return self.cancelled_result(&call, &progress);
        }

        let Some(tool) = self.registry.get(&call.name) else {
            let error = format!("Unknown tool: {}", call.name);
            emit(
                &progress,
                ProgressEvent::ToolFailed {
                    tool: call.name.clone(),
                    id: call.id.clone(),
                    error: error.clone(),
                    time: Duration::ZERO,
                },
            );
            tracing::warn!(tool = %call.name, id = %call.id, "unknown tool requested");
            return ToolResult::failed(&call.id, &call.name, error, Duration::ZERO);
        };

        emit(
            &progress,
            ProgressEvent::ToolStart {
                tool: call.name.clone(),
                id: call.id.clone(),
            },
        );
        tracing::debug!(tool = %call.name, id = %call.id, "tool call started");

        let started = Instant::now();

        if let Err(err) = tool.validate(&call) {
            let time = started.elapsed();
            return self.failed_result(&call, err.to_string(), time, &progress);
        }

        let outcome = match tool.dispatch_mode() {
            DispatchMode::Suspending => tool.execute(&call).await,
            DispatchMode::Blocking => {
                let tool = Arc::clone(&tool);
                let blocking_call = call.clone();
                match tokio::task::spawn_blocking(move || tool.execute_blocking(&blocking_call))
                    .await
                {
                    Ok(result) => result,
                    Err(err) => Err(ToolError::ExecutionFailed(format!(
                        "blocking task panicked: {err}"
                    ))),
                }
            }
        };
        let time = started.elapsed();

        match outcome {
            Ok(output) => {
                emit(
                    &progress,
                    ProgressEvent::ToolComplete {
                        tool: call.name.clone(),
                        id: call.id.clone(),
                        time,
                    },
                );
                tracing::debug!(tool = %call.name, id = %call.id, ?time, "tool call completed");
                ToolResult::completed(&call.id, &call.name, output, time)
            }
            Err(err) => self.failed_result(&call, err.to_string(), time, &progress),
        }
    }

    fn cancelled_result(&self, call: &ToolCall, progress: &Option<ProgressCallback>) -> ToolResult {
        emit(
            progress,
            ProgressEvent::ToolCancelled {
                tool: call.name.clone(),
                id: call.id.clone(),
            },
        );
        ToolResult::cancelled(&call.id, &call.name, CANCELLED_MESSAGE)
    }

    fn failed_result(
        &self,
        call: &ToolCall,
        error: String,
        time: Duration,
        progress: &Option<ProgressCallback>,
    ) -> ToolResult {
        emit(
            progress,
            ProgressEvent::ToolFailed {
                tool: call.name.clone(),
                id: call.id.clone(),
                error: error.clone(),
                time,
            },
        );
        tracing::warn!(tool = %call.name, id = %call.id, error = %error, "tool call failed");
        ToolResult::failed(&call.id, &call.name, error, time)
    }

    /// Fold one submission's results into the lifetime statistics
    fn record_outcomes(&self, results: &[ToolResult]) {
        let mut stats = self.stats.write();

        for result in results {
            stats.total += 1;
            match result.status {
                ToolStatus::Completed => {
                    stats.completed += 1;
                    stats.total_time += result.execution_time;
                }
                ToolStatus::Failed => {
                    stats.failed += 1;
                    stats.total_time += result.execution_time;
                }
                ToolStatus::Cancelled => stats.cancelled += 1,
                ToolStatus::Pending | ToolStatus::Running => {}
            }
        }

        // the mean is over attempted calls; cancelled ones never ran
        let attempted = stats.completed + stats.failed;
        stats.average_time = if attempted > 0 {
            stats.total_time / attempted as u32
        } else {
            Duration::ZERO
        };
    }
}

fn emit(progress: &Option<ProgressCallback>, event: ProgressEvent) {
    if let Some(callback) = progress {
        callback(event);
    }
}

/// Builder for ParallelToolExecutor
pub struct ExecutorBuilder {
    config: ExecutorConfig,
    registry: Option<Arc<ToolRegistry>>,
    tools: Vec<Arc<dyn Tool>>,
}

impl ExecutorBuilder {
    pub fn new() -> Self {
        Self {
            config: ExecutorConfig::default(),
            registry: None,
            tools: Vec::new(),
        }
    }

    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.config.max_concurrent = max;
        self
    }

    pub fn with_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_tools(
        mut self,
        tools: impl IntoIterator<Item = Arc<dyn Tool>>,
    ) -> Self {
        self.tools.extend(tools);
        self
    }

    pub fn build(self) -> ParallelToolExecutor {
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(ToolRegistry::new()));
        registry.register_all(self.tools);
        ParallelToolExecutor::with_config(registry, self.config)
    }
}

impl Default for ExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
