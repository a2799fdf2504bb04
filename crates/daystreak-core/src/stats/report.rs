//! Daily report: everything the dashboard renders, computed in one pass.

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::daily_series::{
    completion_pct, current_streak, habit_heat, habits_done_today, mood_sparkline,
    tasks_completed_today, DayPoint, HeatCell,
};
use crate::day::Today;
use crate::error::ValidationError;
use crate::model::MoodScore;
use crate::storage::StatsConfig;
use crate::tracker::TrackerState;

/// Derived statistics for one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub name: String,
    pub streak: u32,
    pub completion_pct: u8,
    pub heat: Vec<HeatCell>,
}

/// Snapshot of today's counters and per-habit/mood series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub tasks_done_today: usize,
    pub habits_done_today: usize,
    pub habits_total: usize,
    pub habits: Vec<HabitSummary>,
    pub mood: Vec<DayPoint<MoodScore>>,
}

impl HabitSummary {
    /// Statistics for the habit `habit_id` named `name`.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidWindow`] if a configured window is 0.
    pub fn build<Tz: TimeZone>(
        habit_id: &str,
        name: &str,
        state: &TrackerState,
        today: &Today<Tz>,
        config: &StatsConfig,
    ) -> Result<Self, ValidationError> {
        let logs = &state.habit_logs;
        Ok(Self {
            habit_id: habit_id.to_string(),
            name: name.to_string(),
            streak: current_streak(habit_id, logs, today),
            completion_pct: completion_pct(habit_id, logs, config.completion_window_days, today)?,
            heat: habit_heat(habit_id, logs, config.heat_window_days, today)?,
        })
    }
}

impl DailyReport {
    /// Build the report for `today` from a state snapshot.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidWindow`] if a configured window is 0.
    pub fn build<Tz: TimeZone>(
        state: &TrackerState,
        today: &Today<Tz>,
        config: &StatsConfig,
    ) -> Result<Self, ValidationError> {
        let habits = state
            .habits
            .iter()
            .map(|habit| HabitSummary::build(&habit.id, &habit.name, state, today, config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            date: today.date(),
            tasks_done_today: tasks_completed_today(&state.tasks, today),
            habits_done_today: habits_done_today(&state.habits, &state.habit_logs, today),
            habits_total: state.habits.len(),
            habits,
            mood: mood_sparkline(&state.moods, config.sparkline_days, today)?,
        })
    }
}
