//! TOML-based application configuration.
//!
//! Stores settings that shape how statistics are computed and shown:
//! - Window lengths for the heat strip, completion percentage and mood sparkline
//! - How "N days ago" is derived (calendar-aware or fixed 24h offsets)
//! - Reduced motion, which suppresses celebrations entirely
//!
//! Configuration is stored at `~/.config/daystreak/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::data_dir;
use crate::day::DayArithmetic;
use crate::error::ConfigError;
use crate::stats::{DEFAULT_COMPLETION_WINDOW, DEFAULT_HEAT_WINDOW, DEFAULT_SPARKLINE_WINDOW};

/// Statistics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_heat_window")]
    pub heat_window_days: u32,
    #[serde(default = "default_completion_window")]
    pub completion_window_days: u32,
    #[serde(default = "default_sparkline_window")]
    pub sparkline_days: u32,
    #[serde(default)]
    pub day_arithmetic: DayArithmetic,
}

/// Feedback configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    #[serde(default)]
    pub reduced_motion: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/daystreak/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

fn default_heat_window() -> u32 {
    DEFAULT_HEAT_WINDOW
}
fn default_completion_window() -> u32 {
    DEFAULT_COMPLETION_WINDOW
}
fn default_sparkline_window() -> u32 {
    DEFAULT_SPARKLINE_WINDOW
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            heat_window_days: default_heat_window(),
            completion_window_days: default_completion_window(),
            sparkline_days: default_sparkline_window(),
            day_arithmetic: DayArithmetic::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot set a whole section".to_string()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.validate()?;
                debug!(path = %path.display(), "config loaded");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject window lengths of zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("stats.heat_window_days", self.stats.heat_window_days),
            ("stats.completion_window_days", self.stats.completion_window_days),
            ("stats.sparkline_days", self.stats.sparkline_days),
        ];
        for (key, days) in windows {
            if days == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "window length must be positive".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit it.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(toml_str.contains("day_arithmetic = \"calendar\""));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: Config = toml::from_str("[stats]\nsparkline_days = 7\n").unwrap();
        assert_eq!(parsed.stats.sparkline_days, 7);
        assert_eq!(parsed.stats.heat_window_days, 30);
        assert!(!parsed.feedback.reduced_motion);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("stats.heat_window_days").as_deref(), Some("30"));
        assert_eq!(cfg.get("stats.day_arithmetic").as_deref(), Some("calendar"));
        assert_eq!(cfg.get("feedback.reduced_motion").as_deref(), Some("false"));
        assert!(cfg.get("stats.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.apply("feedback.reduced_motion", "true").unwrap();
        cfg.apply("stats.sparkline_days", "21").unwrap();
        cfg.apply("stats.day_arithmetic", "fixed_offset").unwrap();
        assert!(cfg.feedback.reduced_motion);
        assert_eq!(cfg.stats.sparkline_days, 21);
        assert_eq!(cfg.stats.day_arithmetic, DayArithmetic::FixedOffset);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("stats.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.apply("", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn apply_rejects_invalid_values() {
        let mut cfg = Config::default();
        assert!(cfg.apply("feedback.reduced_motion", "maybe").is_err());
        assert!(cfg.apply("stats.heat_window_days", "-3").is_err());
        assert!(cfg.apply("stats.day_arithmetic", "lunar").is_err());
        assert!(cfg.apply("stats", "{}").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn apply_rejects_zero_window() {
        let mut cfg = Config::default();
        let err = cfg.apply("stats.completion_window_days", "0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "stats.completion_window_days"));
        assert_eq!(cfg.stats.completion_window_days, 30);
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.apply("feedback.reduced_motion", "true").unwrap();
        changed.save_to(&path).unwrap();
        assert!(Config::load_from(&path).unwrap().feedback.reduced_motion);
    }

    #[test]
    fn load_from_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[stats\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseFailed(_))));

        std::fs::write(&path, "[stats]\nheat_window_days = 0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::InvalidValue { .. })));
    }
}
