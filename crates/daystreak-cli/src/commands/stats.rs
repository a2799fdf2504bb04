use clap::Subcommand;
use daystreak_core::stats::mood_sparkline;
use daystreak_core::{CoreError, DailyReport, HabitSummary};

use super::{CliResult, Session};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's counters, habit streaks and mood sparkline
    Today,
    /// Streak, completion and heat strip for one habit
    Habit {
        /// Habit ID
        id: String,
    },
    /// Mood sparkline
    Mood {
        /// Number of days (default: stats.sparkline_days)
        #[arg(long)]
        days: Option<u32>,
    },
}

pub fn run(action: StatsAction) -> CliResult {
    let session = Session::open()?;
    let today = session.today();
    let state = session.tracker.snapshot();
    let config = &session.config.stats;

    match action {
        StatsAction::Today => {
            let report = DailyReport::build(state, &today, config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StatsAction::Habit { id } => {
            let habit = session.tracker.find_habit(&id).ok_or_else(|| CoreError::NotFound {
                kind: "habit",
                id: id.clone(),
            })?;
            let summary = HabitSummary::build(&habit.id, &habit.name, state, &today, config)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Mood { days } => {
            let days = days.unwrap_or(config.sparkline_days);
            let series = mood_sparkline(&state.moods, days, &today)?;
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
    }
    Ok(())
}
