//! Habit management commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use daystreak_core::day::{format_day, parse_day};
use daystreak_core::Event;

use super::{CliResult, Session};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
    },
    /// List habits
    List,
    /// Check a habit off for a day, or clear it if already done
    Toggle {
        /// Habit ID
        id: String,
        /// Day to toggle as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: HabitAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        HabitAction::Add { name } => {
            let events = session.tracker.add_habit(&name, Utc::now())?;
            session.commit(&events)?;
            if let Some(habit) = session.tracker.snapshot().habits.last() {
                println!("Habit created: {}", habit.id);
                println!("{}", serde_json::to_string_pretty(habit)?);
            }
        }
        HabitAction::List => {
            println!("{}", serde_json::to_string_pretty(&session.tracker.snapshot().habits)?);
        }
        HabitAction::Toggle { id, date } => {
            let day = match date {
                Some(date) => parse_day(&date)?,
                None => session.today().date(),
            };
            let events = session.tracker.toggle_habit(&id, day)?;
            session.commit(&events)?;
            for event in &events {
                if let Event::HabitToggled { day, done, .. } = event {
                    println!(
                        "Habit {id} on {}: {}",
                        format_day(*day),
                        if *done { "done" } else { "cleared" }
                    );
                }
            }
        }
    }
    Ok(())
}
