//! Dependency resolution for tool call scheduling
//!
//! Turns a flat list of tool calls into ordered batches where every call's
//! dependencies live in an earlier batch, and optionally infers implicit
//! dependencies from resource conflicts (same-path write/read, deletes,
//! test runs after code changes). Batching is Kahn's algorithm over
//! in-degree counts with a reverse adjacency list, so resolution is
//! O(calls + edges).

use crate::error::{StrataError, StrataResult};
use crate::tools::names;
use crate::tools::types::ToolCall;
use std::collections::HashMap;

/// Resolves execution order for a set of tool calls
#[derive(Debug, Default)]
pub struct DependencyResolver;

impl DependencyResolver {
    /// Create a new resolver
    pub fn new() -> Self {
        Self
    }

    /// Group calls into dependency-ordered batches
    ///
    /// Calls within one batch are mutually independent and may run
    /// concurrently; batch `k` only depends on batches `0..k`. Submission
    /// order is preserved inside each batch. Fails before anything runs on
    /// duplicate ids, references to ids outside the set, or dependency
    /// cycles (the error lists the unschedulable call ids).
    pub fn analyze_dependencies(&self, calls: &[ToolCall]) -> StrataResult<Vec<Vec<ToolCall>>> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        let index_of = self.index_calls(calls)?;

        let mut in_degree = vec![0usize; calls.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); calls.len()];
        for (idx, call) in calls.iter().enumerate() {
            for dep in &call.dependencies {
                let Some(&dep_idx) = index_of.get(dep.as_str()) else {
                    return Err(StrataError::unknown_dependency(&call.id, dep));
                };
                in_degree[idx] += 1;
                dependents[dep_idx].push(idx);
            }
        }

        let mut frontier: Vec<usize> = (0..calls.len()).filter(|&i| in_degree[i] == 0).collect();
        let mut batches = Vec::new();
        let mut scheduled = 0usize;

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for &idx in &frontier {
                for &dependent in &dependents[idx] {
                    in_degree[dependent] -= 1;
                    if in_degree[dependent] == 0 {
                        next.push(dependent);
                    }
                }
            }

            scheduled += frontier.len();
            batches.push(frontier.iter().map(|&i| calls[i].clone()).collect());

            // index order is submission order
            next.sort_unstable();
            frontier = next;
        }

        if scheduled < calls.len() {
            let stuck: Vec<String> = (0..calls.len())
                .filter(|&i| in_degree[i] > 0)
                .map(|i| calls[i].id.clone())
                .collect();
            return Err(StrataError::circular(stuck));
        }

        tracing::debug!(
            calls = calls.len(),
            batches = batches.len(),
            "resolved tool call execution order"
        );

        Ok(batches)
    }

    /// Infer implicit dependencies from resource conflicts
    ///
    /// Only backward edges are added (a later call comes to depend on an
    /// earlier one), so inference cannot introduce a cycle. Three rules:
    /// a read after a write or edit of the same path waits for it, a
    /// delete waits for every earlier call touching its path, and a test
    /// run waits for every earlier code mutation. Path matching is exact
    /// string comparison over the conventional path arguments; calls that
    /// share a file through other means are not detected.
    ///
    /// Returns the number of edges added.
    pub fn auto_detect_dependencies(&self, calls: &mut [ToolCall]) -> usize {
        let mut added = 0;

        for later in 1..calls.len() {
            for earlier in 0..later {
                if !self.implies_dependency(&calls[earlier], &calls[later]) {
                    continue;
                }
                let dep_id = calls[earlier].id.clone();
                if calls[later].dependencies.insert(dep_id) {
                    tracing::debug!(
                        call = %calls[later].id,
                        depends_on = %calls[earlier].id,
                        tool = %calls[later].name,
                        "inferred tool call dependency"
                    );
                    added += 1;
                }
            }
        }

        added
    }

    /// Whether `later` must wait for `earlier`
    fn implies_dependency(&self, earlier: &ToolCall, later: &ToolCall) -> bool {
        // reads observe the latest write of their path
        if names::is_write_class(&earlier.name) && names::is_read_class(&later.name) {
            if paths_intersect(&argument_paths(earlier), &argument_paths(later)) {
                return true;
            }
        }

        // deletes run after everything else touching the path
        if names::is_delete_class(&later.name) {
            if paths_intersect(&argument_paths(earlier), &argument_paths(later)) {
                return true;
            }
        }

        // test runs observe the latest code state
        if names::is_code_mutating(&earlier.name) && names::is_test_class(&later.name) {
            return true;
        }

        false
    }

    /// Map each id to its submission index, rejecting duplicates
    fn index_calls<'a>(&self, calls: &'a [ToolCall]) -> StrataResult<HashMap<&'a str, usize>> {
        let mut index_of = HashMap::with_capacity(calls.len());
        for (idx, call) in calls.iter().enumerate() {
            if index_of.insert(call.id.as_str(), idx).is_some() {
                return Err(StrataError::duplicate_call_id(&call.id));
            }
        }
        Ok(index_of)
    }
}

/// Collect the path arguments a call targets
fn argument_paths(call: &ToolCall) -> Vec<String> {
    let mut paths = Vec::new();
    for key in ["path", "file_path", "file"] {
        if let Some(path) = call.get_string(key) {
            paths.push(path);
        }
    }
    for key in ["paths", "files"] {
        if let Some(list) = call.get_strings(key) {
            paths.extend(list);
        }
    }
    paths
}

fn paths_intersect(a: &[String], b: &[String]) -> bool {
    a.iter().any(|p| b.iter().any(|q| p == q))
}
