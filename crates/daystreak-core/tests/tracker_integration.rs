//! Integration tests for the tracker workflow.
//!
//! Tests the full path from user intents through the tracker, persistence
//! in an on-disk store, celebration dispatch and the daily report.

use chrono::{Duration, TimeZone, Utc};
use daystreak_core::feedback::{dispatch, RecordingSink, HAPTIC_PULSE_MS};
use daystreak_core::storage::keys;
use daystreak_core::{
    Config, DailyReport, DayArithmetic, Event, MoodScore, Store, Today, Tracker,
};

#[test]
fn test_full_tracker_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daystreak.db");
    let now = Utc.with_ymd_and_hms(2024, 9, 12, 10, 0, 0).unwrap();
    let today = Today::at(now, DayArithmetic::Calendar);

    let mut tracker = Tracker::default();
    tracker.add_habit("read", now).unwrap();
    tracker.add_task("write tests", now).unwrap();
    let habit_id = tracker.snapshot().habits[0].id.clone();
    let task_id = tracker.snapshot().tasks[0].id.clone();

    for offset in 0..3 {
        tracker.toggle_habit(&habit_id, today.days_ago(offset).unwrap()).unwrap();
    }
    tracker.save_mood(today.date(), MoodScore::new(6).unwrap(), Some("good day".into()));

    let events = tracker.toggle_task(&task_id, now + Duration::minutes(5)).unwrap();
    let mut sink = RecordingSink::default();
    let fired = dispatch(&events, &tracker.snapshot().prefs, false, &mut sink);
    assert_eq!(fired, 1);
    assert_eq!(sink.received[0].task_id, task_id);
    assert!(sink.received[0].confetti.is_some());

    {
        let store = Store::open_at(&path).unwrap();
        tracker.save(&store).unwrap();
    }

    let store = Store::open_at(&path).unwrap();
    let reloaded = Tracker::load(&store).unwrap();
    assert_eq!(reloaded.snapshot(), tracker.snapshot());

    let report = DailyReport::build(reloaded.snapshot(), &today, &Config::default().stats).unwrap();
    assert_eq!(report.tasks_done_today, 1);
    assert_eq!(report.habits_done_today, 1);
    assert_eq!(report.habits[0].streak, 3);
    assert_eq!(report.habits[0].completion_pct, 10);
    assert_eq!(
        report.mood.last().and_then(|point| point.value).map(MoodScore::get),
        Some(6)
    );
}

#[test]
fn test_reopen_does_not_celebrate() {
    let now = Utc::now();
    let mut tracker = Tracker::default();
    tracker.add_task("flip", now).unwrap();
    let id = tracker.snapshot().tasks[0].id.clone();

    let first = tracker.toggle_task(&id, now).unwrap();
    let second = tracker.toggle_task(&id, now).unwrap();
    assert!(matches!(first[0], Event::TaskCompleted { .. }));
    assert!(matches!(second[0], Event::TaskReopened { .. }));

    let mut sink = RecordingSink::default();
    assert_eq!(dispatch(&second, &tracker.snapshot().prefs, false, &mut sink), 0);
}

#[test]
fn test_reduced_motion_and_disabled_confetti_keep_pulse() {
    let now = Utc::now();
    let mut tracker = Tracker::default();
    tracker.add_task("quiet", now).unwrap();
    let id = tracker.snapshot().tasks[0].id.clone();
    let events = tracker.toggle_task(&id, now).unwrap();

    let mut sink = RecordingSink::default();
    assert_eq!(dispatch(&events, &tracker.snapshot().prefs, true, &mut sink), 1);

    tracker.set_confetti_enabled(false);
    assert_eq!(dispatch(&events, &tracker.snapshot().prefs, false, &mut sink), 1);

    assert_eq!(sink.received.len(), 2);
    for celebration in &sink.received {
        assert_eq!(celebration.haptic_ms, HAPTIC_PULSE_MS);
        assert!(celebration.confetti.is_none());
    }
}

#[test]
fn test_corrupt_key_falls_back_to_default() {
    let store = Store::open_memory().unwrap();
    let mut tracker = Tracker::default();
    tracker.add_task("survives", Utc::now()).unwrap();
    tracker.save(&store).unwrap();

    store.kv_set(keys::MOODS, "[{\"broken\":").unwrap();
    let reloaded = Tracker::load(&store).unwrap();
    assert!(reloaded.snapshot().moods.is_empty());
    assert_eq!(reloaded.snapshot().tasks.len(), 1);
}

#[test]
fn test_stored_shape_matches_local_storage_keys() {
    let store = Store::open_memory().unwrap();
    let mut tracker = Tracker::default();
    tracker.add_task("shape", Utc::now()).unwrap();
    tracker.save(&store).unwrap();

    let raw = store.kv_get(keys::TASKS).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["title"], "shape");
    assert!(json[0].get("completed_at").is_none());

    let prefs: serde_json::Value =
        serde_json::from_str(&store.kv_get(keys::PREFS).unwrap().unwrap()).unwrap();
    assert_eq!(prefs["confetti"]["enabled"], true);
}
