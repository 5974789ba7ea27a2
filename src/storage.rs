//! Snapshot file for taskq: a JSON array of `[priority, due_date, name, dependencies]`.

use crate::types::{DATE_FORMAT, Task};
use chrono::NaiveDate;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default snapshot file name.
pub const SNAPSHOT_FILE: &str = "tasks.json";

/// One element of the snapshot array.
#[derive(Debug, Serialize, Deserialize)]
struct Record(i64, String, String, Vec<String>);

impl From<&Task> for Record {
    fn from(task: &Task) -> Self {
        Record(task.priority, task.due_str(), task.name.clone(), task.dependencies.clone())
    }
}

/// Handle on the snapshot file.
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every valid task from the snapshot.
    ///
    /// Never fails: a missing or unreadable file yields no tasks, and
    /// malformed records are skipped with a warning.
    pub fn load(&self) -> Vec<Task> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No snapshot at {}, starting empty", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                log::warn!("Failed to read snapshot {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        if contents.trim().is_empty() {
            return Vec::new();
        }

        let values: Vec<serde_json::Value> = match serde_json::from_str(&contents) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Snapshot {} is not a JSON array: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let mut tasks = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match parse_record(value) {
                Ok(task) => tasks.push(task),
                Err(e) => log::warn!("Skipping malformed record {}: {}", index, e),
            }
        }

        log::debug!("Loaded {} task(s) from {}", tasks.len(), self.path.display());
        tasks
    }

    /// Overwrite the snapshot with the given tasks.
    pub fn save<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Result<()> {
        let records: Vec<Record> = tasks.into_iter().map(Record::from).collect();
        let json = serde_json::to_string(&records).context("Failed to serialize tasks")?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).context("Failed to create snapshot directory")?;
        }

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write snapshot {}", self.path.display()))?;

        log::debug!("Saved {} task(s) to {}", records.len(), self.path.display());
        Ok(())
    }
}

fn parse_record(value: serde_json::Value) -> Result<Task> {
    let Record(priority, due, name, dependencies) =
        serde_json::from_value::<Record>(value).context("expected [priority, due_date, name, dependencies]")?;

    let due_date = NaiveDate::parse_from_str(&due, DATE_FORMAT)
        .with_context(|| format!("invalid due date '{}' for task '{}'", due, name))?;

    let task = Task::new(&name, priority, due_date, dependencies);
    task.validate()?;
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Snapshot) {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = Snapshot::new(temp_dir.path().join(SNAPSHOT_FILE));
        (temp_dir, snapshot)
    }

    fn task(name: &str, priority: i64, due: &str, deps: &[&str]) -> Task {
        Task::new(
            name,
            priority,
            NaiveDate::parse_from_str(due, DATE_FORMAT).unwrap(),
            deps.iter().map(|d| d.to_string()).collect(),
        )
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_temp_dir, snapshot) = setup();
        assert!(snapshot.load().is_empty());
    }

    #[test]
    fn test_save_writes_tuple_format() {
        let (_temp_dir, snapshot) = setup();
        snapshot
            .save(&[task("Submit report", 1, "2025-03-05", &["Write report"])])
            .unwrap();

        let raw = fs::read_to_string(snapshot.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([[1, "2025-03-05", "Submit report", ["Write report"]]])
        );
    }

    #[test]
    fn test_save_then_load() {
        let (_temp_dir, snapshot) = setup();
        let tasks = vec![
            task("a", 3, "2025-01-01", &[]),
            task("b", -1, "2024-12-31", &["a", "c"]),
        ];
        snapshot.save(&tasks).unwrap();
        assert_eq!(snapshot.load(), tasks);
    }

    #[test]
    fn test_save_overwrites() {
        let (_temp_dir, snapshot) = setup();
        snapshot.save(&[task("a", 1, "2025-01-01", &[])]).unwrap();
        snapshot.save(&[task("b", 2, "2025-01-02", &[])]).unwrap();

        let loaded = snapshot.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "b");
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = Snapshot::new(temp_dir.path().join("nested").join("dir").join(SNAPSHOT_FILE));
        snapshot.save(&[task("a", 1, "2025-01-01", &[])]).unwrap();
        assert_eq!(snapshot.load().len(), 1);
    }

    #[test]
    fn test_load_skips_malformed_records() {
        let (_temp_dir, snapshot) = setup();
        fs::write(
            snapshot.path(),
            r#"[
                [1, "2025-03-01", "good", []],
                [2, "not-a-date", "bad date", []],
                [3, "2025-03-01"],
                {"name": "object"},
                [4, "2025-02-30", "impossible day", []],
                [5, "2025-03-02", "", []],
                [6, "2025-03-03", "also good", ["good"]]
            ]"#,
        )
        .unwrap();

        let names: Vec<String> = snapshot.load().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["good", "also good"]);
    }

    #[test]
    fn test_load_garbage_is_empty() {
        let (_temp_dir, snapshot) = setup();
        fs::write(snapshot.path(), "this is not json").unwrap();
        assert!(snapshot.load().is_empty());

        fs::write(snapshot.path(), r#"{"tasks": []}"#).unwrap();
        assert!(snapshot.load().is_empty());

        fs::write(snapshot.path(), "").unwrap();
        assert!(snapshot.load().is_empty());
    }

    #[test]
    fn test_save_to_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = Snapshot::new(temp_dir.path());
        assert!(snapshot.save(&Vec::<Task>::new()).is_err());
    }
}
