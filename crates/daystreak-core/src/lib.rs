//! # daystreak Core Library
//!
//! This library provides the core logic for daystreak, a personal tracker
//! for daily habits, mood check-ins and to-do tasks. All operations are
//! available via the standalone `daystreak` CLI, which is a thin
//! presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Statistics**: pure daily-series functions (streaks, rolling completion
//!   percentages, day-aligned heat strips and mood sparklines, same-day counters)
//! - **Day normalization**: a single [`Today`] reference that maps instants to
//!   local calendar days and computes "N days ago"
//! - **Tracker**: an explicit state container whose mutations emit [`Event`]s
//! - **Feedback**: turns task completions into celebrations, honoring reduced motion
//! - **Storage**: SQLite key-value store of JSON documents and TOML configuration
//!
//! ## Key Components
//!
//! - [`Tracker`]: State container for habits, logs, moods, tasks and prefs
//! - [`DailyReport`]: Everything the dashboard shows for one day
//! - [`Store`]: Persistence of tracker state
//! - [`Config`]: Application configuration management

pub mod day;
pub mod error;
pub mod events;
pub mod feedback;
pub mod model;
pub mod stats;
pub mod storage;
pub mod tracker;

pub use day::{DayArithmetic, Today};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use feedback::{Celebration, CelebrationSink, Confetti};
pub use model::{ConfettiPrefs, Habit, HabitLog, MoodEntry, MoodScore, Prefs, Task};
pub use stats::{DailyReport, DayPoint, HabitSummary, HeatCell};
pub use storage::{Config, Store};
pub use tracker::{Tracker, TrackerState};
