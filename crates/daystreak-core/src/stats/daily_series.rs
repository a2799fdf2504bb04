//! Daily-series aggregation over habit logs, mood entries and tasks.
//!
//! All functions are pure: they read an unordered slice of records plus a
//! reference [`Today`] and never mutate their input. Days are compared by
//! exact value; a record whose date was normalized differently upstream is
//! simply not counted.

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::day::Today;
use crate::error::ValidationError;
use crate::model::{Habit, HabitLog, MoodEntry, MoodScore, Task};

/// Streaks stop scanning after this many days.
pub const MAX_STREAK_LOOKBACK: u32 = 365;

/// Default rolling window for completion percentages.
pub const DEFAULT_COMPLETION_WINDOW: u32 = 30;

/// Default length of the habit heat strip.
pub const DEFAULT_HEAT_WINDOW: u32 = 30;

/// Default length of the mood sparkline.
pub const DEFAULT_SPARKLINE_WINDOW: u32 = 14;

/// One day of a day-aligned series. `value` is `None` when no record matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPoint<V> {
    pub day: NaiveDate,
    pub value: Option<V>,
}

/// One cell of a habit heat strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatCell {
    pub day: NaiveDate,
    pub done: bool,
}

fn check_window(window_days: u32) -> Result<(), ValidationError> {
    if window_days == 0 {
        Err(ValidationError::InvalidWindow { window_days })
    } else {
        Ok(())
    }
}

/// Whether any log marks `habit_id` done on `day`.
pub fn is_done_on(habit_id: &str, logs: &[HabitLog], day: NaiveDate) -> bool {
    logs.iter().any(|log| log.marks_done(habit_id, day))
}

/// Consecutive done-days ending at and including today.
///
/// Returns 0 when today has no done-log, whatever happened before. The scan
/// stops after [`MAX_STREAK_LOOKBACK`] days, so the result is capped there.
pub fn current_streak<Tz: TimeZone>(habit_id: &str, logs: &[HabitLog], today: &Today<Tz>) -> u32 {
    let mut streak = 0;
    for offset in 0..MAX_STREAK_LOOKBACK {
        let Some(day) = today.days_ago(offset) else {
            break;
        };
        if !is_done_on(habit_id, logs, day) {
            break;
        }
        streak += 1;
    }
    streak
}

/// Share of the last `window_days` days (today inclusive) with a done-log,
/// as an integer percentage rounded half away from zero.
///
/// # Errors
/// Returns [`ValidationError::InvalidWindow`] when `window_days` is 0.
pub fn completion_pct<Tz: TimeZone>(
    habit_id: &str,
    logs: &[HabitLog],
    window_days: u32,
    today: &Today<Tz>,
) -> Result<u8, ValidationError> {
    check_window(window_days)?;

    let matches = (0..window_days)
        .filter_map(|offset| today.days_ago(offset))
        .filter(|day| is_done_on(habit_id, logs, *day))
        .count() as u64;

    Ok(rounded_percentage(matches, u64::from(window_days)))
}

/// `round(part / whole * 100)` with halves rounded away from zero.
fn rounded_percentage(part: u64, whole: u64) -> u8 {
    // part <= whole, so the result is at most 100
    ((part * 200 + whole) / (whole * 2)) as u8
}

/// Project records onto the last `window_days` days, oldest first.
///
/// Each day takes the value of the first record (in slice order) dated that
/// day for which `value_of` returns `Some`; records mapped to `None` are
/// ignored. Always returns exactly `window_days` points unless the window
/// reaches past the representable date range.
///
/// # Errors
/// Returns [`ValidationError::InvalidWindow`] when `window_days` is 0.
pub fn series_for_window<T, V, Tz, D, F>(
    records: &[T],
    date_of: D,
    value_of: F,
    window_days: u32,
    today: &Today<Tz>,
) -> Result<Vec<DayPoint<V>>, ValidationError>
where
    Tz: TimeZone,
    D: Fn(&T) -> NaiveDate,
    F: Fn(&T) -> Option<V>,
{
    check_window(window_days)?;

    let series = (0..window_days)
        .rev()
        .filter_map(|offset| today.days_ago(offset))
        .map(|day| DayPoint {
            day,
            value: records
                .iter()
                .filter(|record| date_of(*record) == day)
                .find_map(&value_of),
        })
        .collect();

    Ok(series)
}

/// Done/not-done strip for one habit over the last `window_days` days.
///
/// # Errors
/// Returns [`ValidationError::InvalidWindow`] when `window_days` is 0.
pub fn habit_heat<Tz: TimeZone>(
    habit_id: &str,
    logs: &[HabitLog],
    window_days: u32,
    today: &Today<Tz>,
) -> Result<Vec<HeatCell>, ValidationError> {
    let series = series_for_window(
        logs,
        |log| log.date,
        |log| (log.habit_id == habit_id && log.is_done()).then_some(()),
        window_days,
        today,
    )?;

    Ok(series
        .into_iter()
        .map(|point| HeatCell {
            day: point.day,
            done: point.value.is_some(),
        })
        .collect())
}

/// Mood scores over the last `window_days` days; days without an entry are `None`.
///
/// # Errors
/// Returns [`ValidationError::InvalidWindow`] when `window_days` is 0.
pub fn mood_sparkline<Tz: TimeZone>(
    moods: &[MoodEntry],
    window_days: u32,
    today: &Today<Tz>,
) -> Result<Vec<DayPoint<MoodScore>>, ValidationError> {
    series_for_window(moods, |entry| entry.date, |entry| Some(entry.score), window_days, today)
}

/// Number of tasks completed on today's calendar day.
pub fn tasks_completed_today<Tz: TimeZone>(tasks: &[Task], today: &Today<Tz>) -> usize {
    tasks
        .iter()
        .filter_map(|task| task.completed_at.as_ref())
        .filter(|completed_at| today.contains(*completed_at))
        .count()
}

/// Number of habits with at least one done-log dated today.
pub fn habits_done_today<Tz: TimeZone>(habits: &[Habit], logs: &[HabitLog], today: &Today<Tz>) -> usize {
    let date = today.date();
    habits
        .iter()
        .filter(|habit| is_done_on(&habit.id, logs, date))
        .count()
}
