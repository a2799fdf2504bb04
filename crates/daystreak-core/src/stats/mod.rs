//! Statistics module for daystreak
//!
//! This module provides the daily-series aggregator (streaks, rolling
//! completion percentages, day-aligned series for heat strips and mood
//! sparklines, same-day counters) and the daily report built on top of it.

mod daily_series;
mod report;

pub use daily_series::{
    completion_pct, current_streak, habit_heat, habits_done_today, is_done_on, mood_sparkline,
    series_for_window, tasks_completed_today, DayPoint, HeatCell, DEFAULT_COMPLETION_WINDOW,
    DEFAULT_HEAT_WINDOW, DEFAULT_SPARKLINE_WINDOW, MAX_STREAK_LOOKBACK,
};

pub use report::{DailyReport, HabitSummary};
