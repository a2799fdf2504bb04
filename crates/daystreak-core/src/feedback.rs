//! Celebration feedback for completed tasks.
//!
//! The tracker only emits [`Event::TaskCompleted`]; this module turns it
//! into a haptic pulse plus, when the user allows motion, a confetti burst,
//! and hands the result to a [`CelebrationSink`]. Nothing flows back into
//! the state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::Event;
use crate::model::Prefs;

/// How long the confetti burst runs.
pub const CELEBRATION_DURATION_MS: u64 = 2500;

/// Length of the haptic pulse sent on every completion.
pub const HAPTIC_PULSE_MS: u64 = 10;

/// The visual part of a celebration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confetti {
    pub palette: Vec<String>,
    pub duration_ms: u64,
}

/// Feedback the effect layer should play for one completed task.
///
/// The haptic pulse is always present; `confetti` is `None` when confetti
/// is disabled or reduced motion is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    pub task_id: String,
    pub haptic_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confetti: Option<Confetti>,
}

/// Consumer of celebrations (confetti renderer, terminal banner, test recorder).
pub trait CelebrationSink {
    fn celebrate(&mut self, celebration: &Celebration);
}

/// Sink that remembers every celebration it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub received: Vec<Celebration>,
}

impl CelebrationSink for RecordingSink {
    fn celebrate(&mut self, celebration: &Celebration) {
        self.received.push(celebration.clone());
    }
}

/// The celebration for `event`, if any.
///
/// Only task completions qualify. Disabled confetti or reduced motion
/// drops the confetti burst but keeps the haptic pulse.
pub fn celebration_for(event: &Event, prefs: &Prefs, reduced_motion: bool) -> Option<Celebration> {
    let Event::TaskCompleted { task_id, .. } = event else {
        return None;
    };
    let confetti = if prefs.confetti.enabled && !reduced_motion {
        Some(Confetti {
            palette: prefs.confetti.palette.clone(),
            duration_ms: CELEBRATION_DURATION_MS,
        })
    } else {
        debug!(%task_id, reduced_motion, "confetti suppressed");
        None
    };
    Some(Celebration {
        task_id: task_id.clone(),
        haptic_ms: HAPTIC_PULSE_MS,
        confetti,
    })
}

/// Feed every task completion to `sink`. Returns how many celebrations fired.
pub fn dispatch<S: CelebrationSink + ?Sized>(
    events: &[Event],
    prefs: &Prefs,
    reduced_motion: bool,
    sink: &mut S,
) -> usize {
    let mut fired = 0;
    for celebration in events
        .iter()
        .filter_map(|event| celebration_for(event, prefs, reduced_motion))
    {
        sink.celebrate(&celebration);
        fired += 1;
    }
    fired
}
