//! Mood check-in commands for CLI.

use clap::Subcommand;
use daystreak_core::day::{format_day, parse_day};
use daystreak_core::MoodScore;

use super::{CliResult, Session};

#[derive(Subcommand)]
pub enum MoodAction {
    /// Record the mood for a day (replaces an existing entry)
    Set {
        /// Score from 1 (worst) to 7 (best)
        #[arg(allow_negative_numbers = true)]
        score: i64,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List all mood entries
    List,
}

pub fn run(action: MoodAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        MoodAction::Set { score, note, date } => {
            let score = MoodScore::new(score)?;
            let day = match date {
                Some(date) => parse_day(&date)?,
                None => session.today().date(),
            };
            let events = session.tracker.save_mood(day, score, note);
            session.commit(&events)?;
            println!("Mood for {}: {score}", format_day(day));
        }
        MoodAction::List => {
            let mut moods = session.tracker.snapshot().moods.clone();
            moods.sort_by_key(|entry| entry.date);
            println!("{}", serde_json::to_string_pretty(&moods)?);
        }
    }
    Ok(())
}
