//! Interactive numbered menu over the task store.
//!
//! Reads commands line by line from any `BufRead` and writes plain text to
//! any `Write`, so it runs the same against a terminal or a test buffer.
//! End of input behaves like choosing "Exit".

use crate::store::{StoreError, TaskStore};
use crate::types::{Task, parse_dependencies, parse_due_date, parse_priority};
use eyre::{Context, Result};
use std::io::{BufRead, Write};
use std::ops::ControlFlow;

const MENU: &str = "\nTask Queue
1. Add task
2. Show pending tasks
3. Complete task
4. Show highest priority task
5. Check if a task is executable
6. Exit";

type Step = ControlFlow<()>;

/// Interactive session bound to a store.
pub struct Shell<'a, R, W> {
    store: &'a mut TaskStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut TaskStore, input: R, output: W) -> Self {
        Self { store, input, output }
    }

    /// Run the menu loop until "Exit" or end of input, then save.
    pub fn run(mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let step = match self.select()? {
                Some(1) => self.add()?,
                Some(2) => self.list()?,
                Some(3) => self.complete()?,
                Some(4) => self.top()?,
                Some(5) => self.check()?,
                _ => ControlFlow::Break(()),
            };
            if step.is_break() {
                break;
            }
        }

        writeln!(self.output, "Exiting task queue.")?;
        self.store.save().context("Failed to save tasks on exit")
    }

    /// Read a menu choice, re-prompting until it is 1-6. `None` on end of input.
    fn select(&mut self) -> Result<Option<u8>> {
        loop {
            let Some(line) = self.prompt("Select an option: ")? else {
                return Ok(None);
            };
            let digits = !line.is_empty() && line.chars().all(|c| c.is_ascii_digit());
            match line.parse::<u8>() {
                Ok(n @ 1..=6) if digits => return Ok(Some(n)),
                _ => writeln!(self.output, "Please select a valid option between 1 and 6.")?,
            }
        }
    }

    fn add(&mut self) -> Result<Step> {
        let Some(name) = self.prompt_name("Task name: ")? else {
            return Ok(ControlFlow::Break(()));
        };

        let priority = loop {
            let Some(line) = self.prompt("Priority (lower number = higher priority): ")? else {
                return Ok(ControlFlow::Break(()));
            };
            match parse_priority(&line) {
                Ok(p) => break p,
                Err(_) => writeln!(self.output, "Please enter a valid integer.")?,
            }
        };

        let due_date = loop {
            let Some(line) = self.prompt("Due date (YYYY-MM-DD): ")? else {
                return Ok(ControlFlow::Break(()));
            };
            match parse_due_date(&line) {
                Ok(d) => break d,
                Err(_) => writeln!(self.output, "Please enter a valid date in YYYY-MM-DD format.")?,
            }
        };

        let Some(line) = self.prompt("Dependencies (comma-separated, empty for none): ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let dependencies = parse_dependencies(&line);

        let task = Task::new(&name, priority, due_date, dependencies);
        let summary = format!(
            "Task '{}' added with priority {}, due {} and dependencies: {}",
            task.name,
            task.priority,
            task.due_str(),
            if task.dependencies.is_empty() {
                "none".to_string()
            } else {
                task.dependencies.join(", ")
            }
        );

        match self.store.add(task) {
            Ok(()) => writeln!(self.output, "{}", summary)?,
            Err(e) => self.report(e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn list(&mut self) -> Result<Step> {
        match self.store.list() {
            Ok(tasks) => {
                writeln!(self.output, "\nPending tasks:")?;
                for pending in tasks {
                    writeln!(self.output, "- {}", pending)?;
                }
            }
            Err(e) => self.report(e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn complete(&mut self) -> Result<Step> {
        if self.store.is_empty() {
            writeln!(self.output, "No tasks to complete.")?;
            return Ok(ControlFlow::Continue(()));
        }

        let Some(name) = self.prompt_name("Name of the task to complete: ")? else {
            return Ok(ControlFlow::Break(()));
        };

        match self.store.complete(&name) {
            Ok(task) => writeln!(self.output, "Task completed: {}", task.name)?,
            Err(e) => self.report(e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn top(&mut self) -> Result<Step> {
        match self.store.peek() {
            Ok(pending) => writeln!(self.output, "Highest priority task: {}", pending)?,
            Err(e) => self.report(e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn check(&mut self) -> Result<Step> {
        let Some(name) = self.prompt_name("Name of the task to check: ")? else {
            return Ok(ControlFlow::Break(()));
        };

        match self.store.status(&name) {
            Ok(pending) => writeln!(self.output, "Task '{}' is: {}", name, pending.status_label())?,
            Err(e) => self.report(e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Show a store error to the user. Anything else is fatal.
    fn report(&mut self, err: eyre::Report) -> Result<()> {
        match err.downcast_ref::<StoreError>() {
            Some(StoreError::Empty) => writeln!(self.output, "No pending tasks.")?,
            Some(store_err) => writeln!(self.output, "{}", store_err)?,
            None => return Err(err),
        }
        Ok(())
    }

    fn prompt_name(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };
            if !line.is_empty() {
                return Ok(Some(line));
            }
            writeln!(self.output, "The task name cannot be empty.")?;
        }
    }

    /// Print a prompt and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
