pub mod config;
pub mod habit;
pub mod mood;
pub mod prefs;
pub mod stats;
pub mod task;

use daystreak_core::feedback::{dispatch, Celebration, CelebrationSink};
use daystreak_core::{Config, Event, Store, Today, Tracker};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Loaded config, store and tracker state for one command invocation.
pub struct Session {
    pub config: Config,
    pub store: Store,
    pub tracker: Tracker,
}

impl Session {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let store = Store::open()?;
        let tracker = Tracker::load(&store)?;
        Ok(Self {
            config,
            store,
            tracker,
        })
    }

    pub fn today(&self) -> Today {
        Today::now(self.config.stats.day_arithmetic)
    }

    /// Persist the tracker and play any celebrations the events call for.
    pub fn commit(&self, events: &[Event]) -> CliResult {
        self.tracker.save(&self.store)?;
        tracing::debug!(events = events.len(), "state committed");
        let mut sink = TerminalSink;
        dispatch(
            events,
            &self.tracker.snapshot().prefs,
            self.config.feedback.reduced_motion,
            &mut sink,
        );
        Ok(())
    }
}

/// Rings the terminal bell in place of the haptic pulse and prints a short
/// banner in place of the confetti burst.
struct TerminalSink;

impl CelebrationSink for TerminalSink {
    fn celebrate(&mut self, celebration: &Celebration) {
        if celebration.haptic_ms > 0 {
            eprint!("\x07");
        }
        if let Some(confetti) = &celebration.confetti {
            println!("🎉 nice work! [{}]", confetti.palette.join(" "));
        }
    }
}
