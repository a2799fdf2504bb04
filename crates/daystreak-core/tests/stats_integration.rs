//! Integration tests for the daily-series aggregator.
//!
//! Covers the concrete dashboard scenarios: two-day streaks, empty
//! histories, a fully populated mood sparkline, and day arithmetic across
//! daylight-saving transitions.

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use daystreak_core::stats::{completion_pct, current_streak, habit_heat, mood_sparkline};
use daystreak_core::{DayArithmetic, HabitLog, MoodEntry, MoodScore, Today};

fn reference_today() -> Today<Utc> {
    Today::at(
        Utc.with_ymd_and_hms(2024, 11, 5, 18, 45, 0).unwrap(),
        DayArithmetic::Calendar,
    )
}

#[test]
fn test_today_and_yesterday_done() {
    let today = reference_today();
    let logs = vec![
        HabitLog::done("h1", today.days_ago(0).unwrap()),
        HabitLog::done("h1", today.days_ago(1).unwrap()),
    ];

    assert_eq!(current_streak("h1", &logs, &today), 2);
    assert_eq!(completion_pct("h1", &logs, 30, &today).unwrap(), 7);
}

#[test]
fn test_empty_logs() {
    let today = reference_today();
    assert_eq!(current_streak("h1", &[], &today), 0);
    assert_eq!(completion_pct("h1", &[], 7, &today).unwrap(), 0);

    let heat = habit_heat("h1", &[], 30, &today).unwrap();
    assert_eq!(heat.len(), 30);
    assert!(heat.iter().all(|cell| !cell.done));
}

#[test]
fn test_fourteen_days_of_mood() {
    let today = reference_today();
    let four = MoodScore::new(4).unwrap();
    let moods: Vec<_> = (0..14)
        .map(|offset| MoodEntry::new(today.days_ago(offset).unwrap(), four, None))
        .collect();

    let series = mood_sparkline(&moods, 14, &today).unwrap();
    assert_eq!(series.len(), 14);
    assert!(series.iter().all(|point| point.value == Some(four)));
    assert!(series.windows(2).all(|pair| pair[0].day < pair[1].day));
    assert_eq!(series[0].day, today.days_ago(13).unwrap());
    assert_eq!(series[13].day, today.date());
}

#[test]
fn test_unordered_input_gives_same_result() {
    let today = reference_today();
    let mut logs: Vec<_> = (0..5)
        .map(|offset| HabitLog::done("h1", today.days_ago(offset).unwrap()))
        .collect();
    let forward_streak = current_streak("h1", &logs, &today);
    let forward_pct = completion_pct("h1", &logs, 10, &today).unwrap();

    logs.reverse();
    assert_eq!(current_streak("h1", &logs, &today), forward_streak);
    assert_eq!(completion_pct("h1", &logs, 10, &today).unwrap(), forward_pct);
    assert_eq!(forward_streak, 5);
    assert_eq!(forward_pct, 50);
}

#[test]
fn test_local_today_streak() {
    // The default reference uses the machine's local zone.
    let today = Today::now(DayArithmetic::Calendar);
    let logs = vec![HabitLog::done("h1", today.date())];
    assert_eq!(current_streak("h1", &logs, &today), 1);
}

fn new_york(y: i32, m: u32, d: u32, h: u32, min: u32, arithmetic: DayArithmetic) -> Today<Tz> {
    Today::at(
        New_York.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap(),
        arithmetic,
    )
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_fixed_offset_skips_day_after_spring_forward() {
    // 2024-03-10 has 23 hours in New York.
    let fixed = new_york(2024, 3, 11, 0, 30, DayArithmetic::FixedOffset);
    assert_eq!(fixed.days_ago(0), Some(day(2024, 3, 11)));
    assert_eq!(fixed.days_ago(1), Some(day(2024, 3, 9)));

    let calendar = new_york(2024, 3, 11, 0, 30, DayArithmetic::Calendar);
    assert_eq!(calendar.days_ago(1), Some(day(2024, 3, 10)));
    assert_eq!(calendar.days_ago(2), Some(day(2024, 3, 9)));

    // Fixed-offset never looks at 2024-03-10.
    let logs: Vec<_> = [day(2024, 3, 11), day(2024, 3, 10), day(2024, 3, 9)]
        .into_iter()
        .map(|date| HabitLog::done("h1", date))
        .collect();
    assert_eq!(current_streak("h1", &logs, &calendar), 3);
    assert_eq!(current_streak("h1", &logs, &fixed), 2);

    let gap = vec![HabitLog::done("h1", day(2024, 3, 11)), HabitLog::done("h1", day(2024, 3, 9))];
    assert_eq!(current_streak("h1", &gap, &calendar), 1);
    assert_eq!(current_streak("h1", &gap, &fixed), 2);
    let heat = habit_heat("h1", &logs, 3, &fixed).unwrap();
    assert_eq!(
        heat.iter().map(|cell| cell.day).collect::<Vec<_>>(),
        vec![day(2024, 3, 8), day(2024, 3, 9), day(2024, 3, 11)]
    );
}

#[test]
fn test_fixed_offset_repeats_day_after_fall_back() {
    // 2024-11-03 has 25 hours in New York.
    let fixed = new_york(2024, 11, 3, 23, 30, DayArithmetic::FixedOffset);
    assert_eq!(fixed.days_ago(0), Some(day(2024, 11, 3)));
    assert_eq!(fixed.days_ago(1), Some(day(2024, 11, 3)));
    assert_eq!(fixed.days_ago(2), Some(day(2024, 11, 2)));

    let calendar = new_york(2024, 11, 3, 23, 30, DayArithmetic::Calendar);
    assert_eq!(calendar.days_ago(1), Some(day(2024, 11, 2)));

    let logs = vec![HabitLog::done("h1", day(2024, 11, 3))];
    assert_eq!(current_streak("h1", &logs, &calendar), 1);
    assert_eq!(current_streak("h1", &logs, &fixed), 2);
    assert_eq!(completion_pct("h1", &logs, 2, &fixed).unwrap(), 100);
    assert_eq!(completion_pct("h1", &logs, 2, &calendar).unwrap(), 50);
}
