//! Builder pattern API for adding tasks from raw input.

use crate::store::{StoreError, TaskStore};
use crate::types::{Task, ValidationError, parse_dependencies, parse_due_date};
use eyre::Result;

/// Builder for adding tasks with a fluent API.
///
/// # Example
///
/// ```ignore
/// let task = store.build("Submit report")
///     .priority(1)
///     .due("2025-03-05")
///     .dependency("Write report")
///     .add()?;
/// ```
pub struct TaskBuilder<'a> {
    store: &'a mut TaskStore,
    name: String,
    priority: i64,
    due: Option<String>,
    dependencies: Vec<String>,
}

impl<'a> TaskBuilder<'a> {
    /// Create a new builder with the given name.
    pub fn new(store: &'a mut TaskStore, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
            priority: 0,
            due: None,
            dependencies: Vec::new(),
        }
    }

    /// Set the priority (lower = more urgent).
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date as `YYYY-MM-DD`.
    pub fn due(mut self, due: impl Into<String>) -> Self {
        self.due = Some(due.into());
        self
    }

    /// Add a dependency.
    pub fn dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    /// Add multiple dependencies.
    pub fn dependencies(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.dependencies.extend(names.into_iter().map(|n| n.into()));
        self
    }

    /// Add dependencies from a comma-separated list.
    pub fn dependencies_str(mut self, list: &str) -> Self {
        self.dependencies.extend(parse_dependencies(list));
        self
    }

    /// Parse the due date, add the task to the store and return it.
    pub fn add(self) -> Result<Task> {
        let due = self
            .due
            .as_deref()
            .ok_or(ValidationError::MissingDueDate)
            .and_then(parse_due_date)
            .map_err(|e| eyre::eyre!(StoreError::Validation(e)))?;

        let task = Task::new(&self.name, self.priority, due, self.dependencies);
        self.store.add(task.clone())?;
        Ok(task)
    }
}

/// Extension trait to add builder method to TaskStore.
pub trait StoreBuilderExt {
    /// Start building a new task with the given name.
    fn build(&mut self, name: impl Into<String>) -> TaskBuilder<'_>;
}

impl StoreBuilderExt for TaskStore {
    fn build(&mut self, name: impl Into<String>) -> TaskBuilder<'_> {
        TaskBuilder::new(self, name)
    }
}
