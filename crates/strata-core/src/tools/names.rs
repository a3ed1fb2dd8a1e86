//! Tool name constants and classifiers
//!
//! This module provides canonical tool names to avoid hardcoding strings
//! throughout the codebase, plus the name classifiers the dependency
//! resolver uses. Classification is by name pattern only: exact canonical
//! matches first, then conservative substring fallbacks so third-party
//! tools with descriptive names still schedule safely. A false positive
//! only costs parallelism, never correctness.

/// File operation tools
pub mod file_ops {
    /// Read a single file
    pub const READ: &str = "read_file";
    /// Read several files at once
    pub const READ_MANY: &str = "read_files";
    /// Write file contents
    pub const WRITE: &str = "write_file";
    /// Edit file with string replacement
    pub const EDIT: &str = "edit_file";
    /// Delete a file
    pub const DELETE: &str = "delete_file";
    /// List directory entries
    pub const LIST_DIR: &str = "list_directory";
}

/// Search tools
pub mod search {
    /// Search file contents
    pub const GREP: &str = "grep_search";
    /// Search for files by pattern
    pub const GLOB: &str = "glob_search";
}

/// Process/execution tools
pub mod process {
    /// Execute a shell command
    pub const RUN_COMMAND: &str = "run_command";
    /// Run the project test suite
    pub const RUN_TESTS: &str = "run_tests";
}

/// Check if a tool name reads file contents
#[inline]
pub fn is_read_class(name: &str) -> bool {
    matches!(
        name,
        file_ops::READ | file_ops::READ_MANY | file_ops::LIST_DIR | search::GREP | search::GLOB
    ) || name.contains("read")
}

/// Check if a tool name writes or edits files
#[inline]
pub fn is_write_class(name: &str) -> bool {
    matches!(name, file_ops::WRITE | file_ops::EDIT)
        || name.contains("write")
        || name.contains("edit")
}

/// Check if a tool name deletes files
#[inline]
pub fn is_delete_class(name: &str) -> bool {
    name == file_ops::DELETE || name.contains("delete") || name.contains("remove")
}

/// Check if a tool name executes tests
#[inline]
pub fn is_test_class(name: &str) -> bool {
    name == process::RUN_TESTS || name.contains("test")
}

/// Check if a tool name mutates code on disk
#[inline]
pub fn is_code_mutating(name: &str) -> bool {
    is_write_class(name) || is_delete_class(name)
}
