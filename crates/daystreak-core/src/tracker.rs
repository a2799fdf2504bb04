//! State container for habits, habit logs, moods, tasks and preferences.
//!
//! The presentation layer owns a [`Tracker`], dispatches user intents to it
//! and hands [`Tracker::snapshot`] to the aggregator. Mutations report what
//! changed as [`Event`]s; the tracker itself performs no I/O.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::model::{Habit, HabitLog, MoodEntry, MoodScore, Prefs, Task};
use crate::storage::{keys, Store};

/// Everything the tracker owns. Each field is persisted under its own key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub habit_logs: Vec<HabitLog>,
    #[serde(default)]
    pub moods: Vec<MoodEntry>,
    /// Newest first.
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub prefs: Prefs,
}

#[derive(Debug, Clone, Default)]
pub struct Tracker {
    state: TrackerState,
}

impl Tracker {
    pub fn new(state: TrackerState) -> Self {
        Self { state }
    }

    /// Immutable view for the aggregator and for rendering.
    pub fn snapshot(&self) -> &TrackerState {
        &self.state
    }

    pub fn into_state(self) -> TrackerState {
        self.state
    }

    /// Load every key from the store; missing or corrupt keys fall back to defaults.
    ///
    /// # Errors
    /// Returns an error only if the store itself cannot be queried.
    pub fn load(store: &Store) -> Result<Self> {
        let state = TrackerState {
            habits: store.load_or_default(keys::HABITS)?,
            habit_logs: store.load_or_default(keys::HABIT_LOGS)?,
            moods: store.load_or_default(keys::MOODS)?,
            tasks: store.load_or_default(keys::TASKS)?,
            prefs: store.load_or_default(keys::PREFS)?,
        };
        debug!(
            habits = state.habits.len(),
            habit_logs = state.habit_logs.len(),
            moods = state.moods.len(),
            tasks = state.tasks.len(),
            "tracker state loaded"
        );
        Ok(Self { state })
    }

    /// Write every key back to the store.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, store: &Store) -> Result<()> {
        store.save(keys::HABITS, &self.state.habits)?;
        store.save(keys::HABIT_LOGS, &self.state.habit_logs)?;
        store.save(keys::MOODS, &self.state.moods)?;
        store.save(keys::TASKS, &self.state.tasks)?;
        store.save(keys::PREFS, &self.state.prefs)?;
        Ok(())
    }

    /// Add an open task at the top of the list.
    ///
    /// # Errors
    /// Returns a validation error if the title is blank.
    pub fn add_task(&mut self, title: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let task = Task::new(title, now)?;
        let event = Event::TaskAdded {
            task_id: task.id.clone(),
            title: task.title.clone(),
            at: now,
        };
        debug!(task_id = %task.id, "task added");
        self.state.tasks.insert(0, task);
        Ok(vec![event])
    }

    /// Flip a task between open and completed.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if no task has this id.
    pub fn toggle_task(&mut self, task_id: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let task = self
            .state
            .tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| not_found("task", task_id))?;

        let was_completed = task.is_completed();
        task.completed_at = if was_completed { None } else { Some(now) };
        debug!(task_id, completed = !was_completed, "task toggled");

        let event = if was_completed {
            Event::TaskReopened {
                task_id: task_id.to_string(),
                at: now,
            }
        } else {
            Event::TaskCompleted {
                task_id: task_id.to_string(),
                at: now,
            }
        };
        Ok(vec![event])
    }

    /// Register a new habit.
    ///
    /// # Errors
    /// Returns a validation error if the name is blank.
    pub fn add_habit(&mut self, name: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let habit = Habit::new(name, now)?;
        let event = Event::HabitAdded {
            habit_id: habit.id.clone(),
            name: habit.name.clone(),
            at: now,
        };
        debug!(habit_id = %habit.id, "habit added");
        self.state.habits.push(habit);
        Ok(vec![event])
    }

    /// Check a habit off for `day`, or clear it if it is already done.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if no habit has this id.
    pub fn toggle_habit(&mut self, habit_id: &str, day: NaiveDate) -> Result<Vec<Event>> {
        if !self.state.habits.iter().any(|habit| habit.id == habit_id) {
            return Err(not_found("habit", habit_id));
        }

        let logs = &mut self.state.habit_logs;
        let done = if logs.iter().any(|log| log.marks_done(habit_id, day)) {
            logs.retain(|log| !(log.habit_id == habit_id && log.date == day));
            false
        } else {
            logs.push(HabitLog::done(habit_id, day));
            true
        };
        debug!(habit_id, %day, done, "habit toggled");

        Ok(vec![Event::HabitToggled {
            habit_id: habit_id.to_string(),
            day,
            done,
        }])
    }

    /// Record the mood for `day`, replacing any entry already stored for it.
    pub fn save_mood(&mut self, day: NaiveDate, score: MoodScore, note: Option<String>) -> Vec<Event> {
        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let replaced = match self.state.moods.iter_mut().find(|entry| entry.date == day) {
            Some(entry) => {
                entry.score = score;
                entry.note = note;
                true
            }
            None => {
                self.state.moods.push(MoodEntry::new(day, score, note));
                false
            }
        };
        debug!(%day, %score, replaced, "mood saved");
        vec![Event::MoodSaved { day, score, replaced }]
    }

    pub fn set_confetti_enabled(&mut self, enabled: bool) -> Vec<Event> {
        self.state.prefs.confetti.enabled = enabled;
        vec![Event::PrefsChanged {
            confetti_enabled: enabled,
        }]
    }

    pub fn find_habit(&self, habit_id: &str) -> Option<&Habit> {
        self.state.habits.iter().find(|habit| habit.id == habit_id)
    }
}

fn not_found(kind: &'static str, id: &str) -> CoreError {
    CoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}
