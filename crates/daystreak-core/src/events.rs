use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::MoodScore;

/// Every state change in the tracker produces an Event.
/// The presentation layer renders from state; effect handlers consume events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TaskAdded {
        task_id: String,
        title: String,
        at: DateTime<Utc>,
    },
    /// A task went from open to completed.
    TaskCompleted {
        task_id: String,
        at: DateTime<Utc>,
    },
    /// A completed task was reopened.
    TaskReopened {
        task_id: String,
        at: DateTime<Utc>,
    },
    HabitAdded {
        habit_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    HabitToggled {
        habit_id: String,
        day: NaiveDate,
        done: bool,
    },
    MoodSaved {
        day: NaiveDate,
        score: MoodScore,
        /// True when an existing entry for the day was overwritten.
        replaced: bool,
    },
    PrefsChanged {
        confetti_enabled: bool,
    },
}

impl Event {
    /// Whether this event is the open→completed transition of a task.
    pub fn is_task_completion(&self) -> bool {
        matches!(self, Event::TaskCompleted { .. })
    }
}
