use clap::Subcommand;

use super::{CliResult, Session};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show stored preferences
    Show,
    /// Enable or disable confetti on task completion
    Confetti {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

pub fn run(action: PrefsAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        PrefsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&session.tracker.snapshot().prefs)?);
        }
        PrefsAction::Confetti { enabled } => {
            let events = session.tracker.set_confetti_enabled(enabled);
            session.commit(&events)?;
            println!("confetti {}", if enabled { "enabled" } else { "disabled" });
        }
    }
    Ok(())
}
