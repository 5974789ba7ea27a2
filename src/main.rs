//! taskq CLI - a priority-ordered task queue with dependency tracking.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io;
use std::path::PathBuf;
use taskq::{PendingTask, SNAPSHOT_FILE, Shell, StoreBuilderExt, StoreError, TaskStore};

mod cli;

use cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskq")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("taskq.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn get_snapshot_path(cli: &Cli) -> PathBuf {
    cli.file.clone().unwrap_or_else(|| {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(SNAPSHOT_FILE)
    })
}

fn format_status(pending: &PendingTask) -> ColoredString {
    if pending.is_executable() {
        "executable".green()
    } else {
        "blocked".red()
    }
}

fn print_task(pending: &PendingTask) {
    let deps = if pending.task.dependencies.is_empty() {
        String::new()
    } else {
        format!(" [{}]", pending.task.dependencies.join(", "))
    };
    println!(
        "{} P{} {} {}{}",
        format_status(pending),
        pending.task.priority,
        pending.task.due_str().cyan(),
        pending.task.name,
        deps.dimmed()
    );
}

/// True when the error only means there is nothing to show.
fn is_empty_store(err: &eyre::Report) -> bool {
    matches!(err.downcast_ref::<StoreError>(), Some(StoreError::Empty))
}

fn run(cli: Cli) -> Result<()> {
    let path = get_snapshot_path(&cli);
    let mut store = TaskStore::load(&path);

    match cli.command {
        Command::Add {
            name,
            priority,
            due,
            depends,
        } => {
            let task = store
                .build(name)
                .priority(priority)
                .due(due)
                .dependencies(
                    depends
                        .unwrap_or_default()
                        .into_iter()
                        .filter(|d| !d.trim().is_empty()),
                )
                .add()?;

            println!(
                "{} Added: {} P{} due {}",
                "✓".green(),
                task.name,
                task.priority,
                task.due_str().cyan()
            );
        }

        Command::List => match store.list() {
            Ok(tasks) => tasks.iter().for_each(print_task),
            Err(e) if is_empty_store(&e) => println!("{}", "No pending tasks".dimmed()),
            Err(e) => return Err(e),
        },

        Command::Ready => {
            let tasks = store.ready();
            if tasks.is_empty() {
                println!("{}", "No ready tasks".dimmed());
            } else {
                println!("{} {} task(s) ready to work on:", "→".blue(), tasks.len());
                tasks.iter().for_each(print_task);
            }
        }

        Command::Top => match store.peek() {
            Ok(pending) => print_task(&pending),
            Err(e) if is_empty_store(&e) => println!("{}", "No pending tasks".dimmed()),
            Err(e) => return Err(e),
        },

        Command::Check { name } => {
            let pending = store.status(&name)?;
            println!("{} {}", pending.task.name, format_status(&pending));
            if !pending.is_executable() {
                println!("  waiting on: {}", pending.outstanding.join(", ").yellow());
            }
        }

        Command::Complete { name } => {
            let task = store.complete(&name)?;
            println!("{} Completed: {}", "✓".green(), task.name);
        }

        Command::Shell => {
            let stdin = io::stdin();
            Shell::new(&mut store, stdin.lock(), io::stdout()).run()?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
