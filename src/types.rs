//! Core data types for taskq.

use chrono::NaiveDate;
use std::fmt;

/// Date format used for input and the snapshot file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A pending unit of work.
///
/// Field order matters: the derived `Ord` sorts by priority, then due date,
/// then name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Task {
    /// Lower value = more urgent
    pub priority: i64,

    /// Day the task is due
    pub due_date: NaiveDate,

    /// Unique name, also the key other tasks depend on
    pub name: String,

    /// Names of tasks that must be completed first
    pub dependencies: Vec<String>,
}

impl Task {
    /// Build a task. The name and every dependency name are trimmed.
    pub fn new(name: &str, priority: i64, due_date: NaiveDate, dependencies: Vec<String>) -> Self {
        Self {
            priority,
            due_date,
            name: name.trim().to_string(),
            dependencies: dependencies.iter().map(|d| d.trim().to_string()).collect(),
        }
    }

    /// Validate the task's fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        // Name: required, 1-500 chars, no control characters
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.name.chars().count() > 500 {
            return Err(ValidationError::NameTooLong);
        }
        if self.name.chars().any(|c| c.is_control()) {
            return Err(ValidationError::InvalidCharacters);
        }

        for dep in &self.dependencies {
            if dep.trim().is_empty() || dep.chars().any(|c| c.is_control()) {
                return Err(ValidationError::InvalidDependency(dep.clone()));
            }
        }

        Ok(())
    }

    /// Due date rendered as `YYYY-MM-DD`.
    pub fn due_str(&self) -> String {
        self.due_date.format(DATE_FORMAT).to_string()
    }
}

/// A task together with its dependencies that are still pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTask {
    pub task: Task,

    /// Dependencies naming a task that is still in the store
    pub outstanding: Vec<String>,
}

impl PendingTask {
    /// True when no dependency is still pending.
    pub fn is_executable(&self) -> bool {
        self.outstanding.is_empty()
    }

    /// Human-readable status label.
    pub fn status_label(&self) -> &'static str {
        if self.is_executable() {
            "executable"
        } else {
            "not executable"
        }
    }
}

impl fmt::Display for PendingTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deps = if self.task.dependencies.is_empty() {
            "none".to_string()
        } else {
            self.task.dependencies.join(", ")
        };
        write!(
            f,
            "{} (priority: {}, due: {}, dependencies: {}, status: {})",
            self.task.name,
            self.task.priority,
            self.task.due_str(),
            deps,
            self.status_label()
        )
    }
}

/// Validation errors for task input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyName,
    NameTooLong,
    InvalidCharacters,
    InvalidDependency(String),
    InvalidPriority(String),
    InvalidDueDate(String),
    MissingDueDate,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "task name cannot be empty"),
            ValidationError::NameTooLong => write!(f, "task name exceeds 500 characters"),
            ValidationError::InvalidCharacters => write!(f, "task name contains control characters"),
            ValidationError::InvalidDependency(dep) => write!(f, "invalid dependency name '{}'", dep),
            ValidationError::InvalidPriority(input) => {
                write!(f, "invalid priority '{}': must be an integer", input)
            }
            ValidationError::InvalidDueDate(input) => {
                write!(f, "invalid due date '{}': expected YYYY-MM-DD", input)
            }
            ValidationError::MissingDueDate => write!(f, "a due date is required"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parse a priority typed by the user.
pub fn parse_priority(input: &str) -> Result<i64, ValidationError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidPriority(input.trim().to_string()))
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_due_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDueDate(input.trim().to_string()))
}

/// Split a comma-separated dependency list, dropping blank entries.
pub fn parse_dependencies(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
        .collect()
}
