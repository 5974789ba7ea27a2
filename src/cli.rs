//! CLI argument parsing for taskq.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tq",
    about = "A priority-ordered task queue with dependency tracking",
    version,
    after_help = "Logs are written to: ~/.local/share/taskq/logs/taskq.log"
)]
pub struct Cli {
    /// Path to the task snapshot file (default: ./tasks.json)
    #[arg(short = 'f', long, global = true, env = "TASKQ_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a new task
    Add {
        /// Task name
        name: String,

        /// Priority (lower number = higher priority)
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        priority: i64,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,

        /// Names of tasks this one depends on (comma-separated)
        #[arg(short = 'D', long, value_delimiter = ',')]
        depends: Option<Vec<String>>,
    },

    /// Show all pending tasks in priority order
    List,

    /// Show tasks whose dependencies are all completed
    Ready,

    /// Show the highest priority task
    Top,

    /// Check whether a task is executable
    Check {
        /// Task name
        name: String,
    },

    /// Complete (remove) a task
    Complete {
        /// Task name
        name: String,
    },

    /// Run the interactive menu
    Shell,
}
