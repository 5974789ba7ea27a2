//! High-level store API for taskq.

use crate::storage::Snapshot;
use crate::types::{PendingTask, Task, ValidationError};
use eyre::{Context, Result};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::path::Path;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No task with this name.
    TaskNotFound(String),
    /// A pending task already uses this name.
    DuplicateName(String),
    /// The task still depends on pending tasks.
    Blocked { name: String, outstanding: Vec<String> },
    /// The store has no pending tasks.
    Empty,
    /// Validation error.
    Validation(ValidationError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::TaskNotFound(name) => write!(f, "task not found: {}", name),
            StoreError::DuplicateName(name) => write!(f, "a task named '{}' already exists", name),
            StoreError::Blocked { name, outstanding } => write!(
                f,
                "cannot complete '{}' until its dependencies are completed: {}",
                name,
                outstanding.join(", ")
            ),
            StoreError::Empty => write!(f, "no pending tasks"),
            StoreError::Validation(e) => write!(f, "validation error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// The pending tasks, kept as a min-heap on `(priority, due_date, name)`.
pub struct TaskStore {
    snapshot: Snapshot,
    heap: BinaryHeap<Reverse<Task>>,
}

impl TaskStore {
    /// Load the store from a snapshot file.
    ///
    /// A missing or unreadable file gives an empty store. When the file holds
    /// two tasks with the same name, the first one is kept.
    pub fn load(path: &Path) -> Self {
        let snapshot = Snapshot::new(path);
        let mut seen = HashSet::new();
        let mut heap = BinaryHeap::new();

        for task in snapshot.load() {
            if !seen.insert(task.name.clone()) {
                log::warn!("Ignoring duplicate task '{}' in {}", task.name, path.display());
                continue;
            }
            heap.push(Reverse(task));
        }

        log::info!("Opened task store at {} ({} pending)", path.display(), heap.len());
        Self { snapshot, heap }
    }

    /// Path of the backing snapshot file.
    pub fn path(&self) -> &Path {
        self.snapshot.path()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// First task with the given name, in heap order. The name is trimmed.
    pub fn get(&self, name: &str) -> Option<&Task> {
        let name = name.trim();
        self.tasks().find(|t| t.name == name)
    }

    /// Add a task and persist the store.
    pub fn add(&mut self, task: Task) -> Result<()> {
        // Validate before persisting
        task.validate().map_err(|e| eyre::eyre!(StoreError::Validation(e)))?;

        if self.get(&task.name).is_some() {
            return Err(eyre::eyre!(StoreError::DuplicateName(task.name)));
        }

        log::info!("Adding task '{}' (priority {})", task.name, task.priority);
        self.heap.push(Reverse(task));
        self.save().context("Failed to persist new task")
    }

    /// All tasks in priority order with their executability.
    pub fn list(&self) -> Result<Vec<PendingTask>> {
        if self.is_empty() {
            return Err(eyre::eyre!(StoreError::Empty));
        }

        let mut tasks: Vec<&Task> = self.tasks().collect();
        tasks.sort();
        Ok(tasks.into_iter().map(|t| self.pending(t)).collect())
    }

    /// Tasks whose dependencies are all completed, in priority order.
    pub fn ready(&self) -> Vec<PendingTask> {
        self.list()
            .map(|tasks| tasks.into_iter().filter(PendingTask::is_executable).collect())
            .unwrap_or_default()
    }

    /// The most urgent task, without removing it.
    pub fn peek(&self) -> Result<PendingTask> {
        self.heap
            .peek()
            .map(|Reverse(task)| self.pending(task))
            .ok_or_else(|| eyre::eyre!(StoreError::Empty))
    }

    /// Executability of the named task, with its outstanding dependencies.
    pub fn status(&self, name: &str) -> Result<PendingTask> {
        let name = name.trim();
        self.get(name)
            .map(|task| self.pending(task))
            .ok_or_else(|| eyre::eyre!(StoreError::TaskNotFound(name.to_string())))
    }

    /// Whether the named task can be completed now.
    pub fn is_executable(&self, name: &str) -> Result<bool> {
        Ok(self.status(name)?.is_executable())
    }

    /// Remove a task whose dependencies are all completed, then persist.
    pub fn complete(&mut self, name: &str) -> Result<Task> {
        let name = name.trim();
        let index = self
            .tasks()
            .position(|t| t.name == name)
            .ok_or_else(|| eyre::eyre!(StoreError::TaskNotFound(name.to_string())))?;

        let pending = self.status(name)?;
        if !pending.is_executable() {
            return Err(eyre::eyre!(StoreError::Blocked {
                name: name.to_string(),
                outstanding: pending.outstanding,
            }));
        }

        // BinaryHeap::iter walks the backing vec, so the index is valid there.
        let mut tasks = std::mem::take(&mut self.heap).into_vec();
        let Reverse(task) = tasks.remove(index);
        self.heap = BinaryHeap::from(tasks);

        log::info!("Completed task '{}'", task.name);
        self.save().context("Failed to persist completion")?;
        Ok(task)
    }

    /// Write every pending task to the snapshot file.
    pub fn save(&self) -> Result<()> {
        self.snapshot.save(self.tasks())
    }

    /// Tasks in heap-internal order.
    fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.heap.iter().map(|Reverse(task)| task)
    }

    fn pending(&self, task: &Task) -> PendingTask {
        let names: HashSet<&str> = self.tasks().map(|t| t.name.as_str()).collect();
        let outstanding = task
            .dependencies
            .iter()
            .filter(|dep| names.contains(dep.as_str()))
            .cloned()
            .collect();

        PendingTask {
            task: task.clone(),
            outstanding,
        }
    }
}
