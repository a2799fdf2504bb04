//! Task management commands for CLI.

use chrono::Utc;
use clap::Subcommand;

use super::{CliResult, Session};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,
    },
    /// List tasks, newest first
    List {
        /// Only show open tasks
        #[arg(long)]
        open: bool,
    },
    /// Mark a task done, or reopen it if it is done
    Toggle {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        TaskAction::Add { title } => {
            let events = session.tracker.add_task(&title, Utc::now())?;
            session.commit(&events)?;
            let task = &session.tracker.snapshot().tasks[0];
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(task)?);
        }
        TaskAction::List { open } => {
            let tasks: Vec<_> = session
                .tracker
                .snapshot()
                .tasks
                .iter()
                .filter(|task| !open || !task.is_completed())
                .collect();
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Toggle { id } => {
            let events = session.tracker.toggle_task(&id, Utc::now())?;
            session.commit(&events)?;
            let done = events.iter().any(|event| event.is_task_completion());
            println!("Task {}: {id}", if done { "completed" } else { "reopened" });
        }
    }
    Ok(())
}
