//! taskq: a priority-ordered personal task queue with dependency tracking.
//!
//! Tasks carry a name, an integer priority (lower is more urgent), a due date
//! and the names of tasks they depend on. A task is executable once none of
//! its dependencies are still pending. The store is a min-heap persisted to a
//! JSON snapshot after every change.
//!
//! # Example
//!
//! ```no_run
//! use taskq::{StoreBuilderExt, TaskStore};
//! use std::path::Path;
//!
//! let mut store = TaskStore::load(Path::new("tasks.json"));
//!
//! store.build("Write report").priority(2).due("2025-03-01").add().unwrap();
//! store
//!     .build("Submit report")
//!     .priority(1)
//!     .due("2025-03-05")
//!     .dependency("Write report")
//!     .add()
//!     .unwrap();
//!
//! // Most urgent first, but it is waiting on "Write report"
//! let top = store.peek().unwrap();
//! assert_eq!(top.task.name, "Submit report");
//! assert!(!top.is_executable());
//!
//! store.complete("Write report").unwrap();
//! assert!(store.is_executable("Submit report").unwrap());
//! ```

mod builder;
mod storage;
mod store;
mod types;

pub mod shell;

// Re-export public API
pub use builder::{StoreBuilderExt, TaskBuilder};
pub use shell::Shell;
pub use storage::{SNAPSHOT_FILE, Snapshot};
pub use store::{StoreError, TaskStore};
pub use types::{
    DATE_FORMAT, PendingTask, Task, ValidationError, parse_dependencies, parse_due_date, parse_priority,
};
