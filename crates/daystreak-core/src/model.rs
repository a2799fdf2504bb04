//! Records tracked by daystreak.
//!
//! Habit logs and mood entries are keyed by calendar day; tasks carry
//! instants and are bucketed into days only when counted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A habit the user checks off day by day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a habit with a fresh id. The name is trimmed and must not be empty.
    pub fn new(name: &str, created_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at,
        })
    }
}

/// One check-off of a habit on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitLog {
    pub id: String,
    pub habit_id: String,
    pub date: NaiveDate,
    /// 1 = done, 0 = not done
    pub value: u8,
}

impl HabitLog {
    pub const DONE: u8 = 1;
    pub const NOT_DONE: u8 = 0;

    /// A done-log for `habit_id` on `date`.
    pub fn done(habit_id: &str, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            habit_id: habit_id.to_string(),
            date,
            value: Self::DONE,
        }
    }

    pub fn is_done(&self) -> bool {
        self.value == Self::DONE
    }

    /// Whether this log marks `habit_id` done on `date`.
    pub fn marks_done(&self, habit_id: &str, date: NaiveDate) -> bool {
        self.is_done() && self.date == date && self.habit_id == habit_id
    }
}

/// Mood score on a 1..=7 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct MoodScore(u8);

impl MoodScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub fn new(score: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&score) {
            Ok(Self(score as u8))
        } else {
            Err(ValidationError::ScoreOutOfRange { score })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for MoodScore {
    type Error = ValidationError;

    fn try_from(score: i64) -> Result<Self, Self::Error> {
        Self::new(score)
    }
}

impl From<MoodScore> for u8 {
    fn from(score: MoodScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for MoodScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mood check-in for a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub date: NaiveDate,
    pub score: MoodScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MoodEntry {
    pub fn new(date: NaiveDate, score: MoodScore, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            score,
            note,
        }
    }
}

/// A to-do item. Completion is the presence of `completed_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create an open task. The title is trimmed and must not be empty.
    pub fn new(title: &str, created_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            created_at,
            completed_at: None,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Confetti preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfettiPrefs {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

/// User preferences persisted alongside the tracked records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub confetti: ConfettiPrefs,
}

fn default_true() -> bool {
    true
}

fn default_palette() -> Vec<String> {
    ["#ffd1dc", "#cde7ff", "#e3ffd6", "#fff1c1", "#e9d6ff"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ConfettiPrefs {
    fn default() -> Self {
        Self {
            enabled: true,
            palette: default_palette(),
        }
    }
}
