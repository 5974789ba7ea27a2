//! Shared test infrastructure for taskq integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use std::path::PathBuf;
use taskq::{StoreBuilderExt, StoreError, Task, TaskStore};
use tempfile::TempDir;

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub store: TaskStore,
}

impl TestEnv {
    /// Create a new test environment with an empty store.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = TaskStore::load(&temp_dir.path().join("tasks.json"));
        Self { temp_dir, store }
    }

    /// Path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.temp_dir.path().join("tasks.json")
    }

    /// Load a fresh store from the same snapshot file.
    pub fn reload(&self) -> TaskStore {
        TaskStore::load(&self.snapshot_path())
    }

    /// Add a task with default priority, a fixed due date and no dependencies.
    pub fn add_task(&mut self, name: &str) -> Task {
        self.add_full(name, 2, "2025-03-01", &[])
    }

    /// Add a task with specified priority.
    pub fn add_task_with_priority(&mut self, name: &str, priority: i64) -> Task {
        self.add_full(name, priority, "2025-03-01", &[])
    }

    /// Add a task depending on the given names.
    pub fn add_task_with_deps(&mut self, name: &str, deps: &[&str]) -> Task {
        self.add_full(name, 2, "2025-03-01", deps)
    }

    /// Add a task with every field given.
    pub fn add_full(&mut self, name: &str, priority: i64, due: &str, deps: &[&str]) -> Task {
        self.store
            .build(name)
            .priority(priority)
            .due(due)
            .dependencies(deps.iter().copied())
            .add()
            .expect("Failed to add task")
    }

    /// Complete a task.
    pub fn complete(&mut self, name: &str) -> Task {
        self.store.complete(name).expect("Failed to complete task")
    }

    /// Assert that a task is executable.
    pub fn assert_executable(&self, name: &str) {
        assert!(
            self.store.is_executable(name).expect("Failed to check task"),
            "Expected task '{}' to be executable, outstanding: {:?}",
            name,
            self.store.status(name).map(|p| p.outstanding).unwrap_or_default()
        );
    }

    /// Assert that a task is NOT executable.
    pub fn assert_not_executable(&self, name: &str) {
        assert!(
            !self.store.is_executable(name).expect("Failed to check task"),
            "Expected task '{}' to NOT be executable, but it was",
            name
        );
    }

    /// Names in listing order, empty if the store is empty.
    pub fn listed_names(&self) -> Vec<String> {
        self.store
            .list()
            .map(|tasks| tasks.into_iter().map(|p| p.task.name).collect())
            .unwrap_or_default()
    }

    /// Get pending task count.
    pub fn total_count(&self) -> usize {
        self.store.len()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the store error carried by a report.
pub fn store_error(err: &eyre::Report) -> &StoreError {
    err.downcast_ref::<StoreError>().expect("expected a StoreError")
}
