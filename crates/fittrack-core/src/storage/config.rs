//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The default user profile for the CLI
//! - Habit defaults and the first-run seed list
//! - The daily water goal
//! - The daily calorie target of the meal plan
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{data_dir, UserId};
use crate::error::ConfigError;
use crate::habit::{DEFAULT_GOAL_DAYS, DEFAULT_HABITS};
use crate::meal_plan::DEFAULT_DAILY_CALORIE_TARGET;
use crate::water::DEFAULT_DAILY_GOAL_ML;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user_id")]
    pub default_user_id: UserId,
}

/// Habit tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitsConfig {
    /// Goal used by `habit add` when `--goal` is omitted.
    #[serde(default = "default_goal_days")]
    pub default_goal_days: i64,
    /// Create `default_habits` when a user has none stored.
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
    #[serde(default = "default_habit_names")]
    pub default_habits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterConfig {
    #[serde(default = "default_daily_goal_ml")]
    pub daily_goal_ml: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealsConfig {
    #[serde(default = "default_calorie_target")]
    pub daily_calorie_target: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub habits: HabitsConfig,
    #[serde(default)]
    pub water: WaterConfig,
    #[serde(default)]
    pub meals: MealsConfig,
}

fn default_user_id() -> UserId {
    1
}
fn default_goal_days() -> i64 {
    DEFAULT_GOAL_DAYS
}
fn default_true() -> bool {
    true
}
fn default_habit_names() -> Vec<String> {
    DEFAULT_HABITS.iter().map(|s| s.to_string()).collect()
}
fn default_daily_goal_ml() -> u32 {
    DEFAULT_DAILY_GOAL_ML
}
fn default_calorie_target() -> u32 {
    DEFAULT_DAILY_CALORIE_TARGET
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            default_user_id: default_user_id(),
        }
    }
}

impl Default for HabitsConfig {
    fn default() -> Self {
        Self {
            default_goal_days: default_goal_days(),
            seed_defaults: true,
            default_habits: default_habit_names(),
        }
    }
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            daily_goal_ml: default_daily_goal_ml(),
        }
    }
}

impl Default for MealsConfig {
    fn default() -> Self {
        Self {
            daily_calorie_target: default_calorie_target(),
        }
    }
}

impl HabitsConfig {
    /// Names to seed on first load, or none when seeding is disabled.
    pub fn seed(&self) -> Vec<(String, i64)> {
        if !self.seed_defaults {
            return Vec::new();
        }
        self.default_habits
            .iter()
            .map(|name| (name.clone(), self.default_goal_days))
            .collect()
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
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(format!("cannot parse '{value}' as bool: {e}")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<i64>()
                            .map_err(|e| invalid(format!("cannot parse '{value}' as integer: {e}")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
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
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
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

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.habits.default_goal_days < 1 {
            return Err(ConfigError::InvalidValue {
                key: "habits.default_goal_days".into(),
                message: "must be at least 1".into(),
            });
        }
        if let Some(pos) = self
            .habits
            .default_habits
            .iter()
            .position(|name| name.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                key: "habits.default_habits".into(),
                message: format!("entry {pos} is empty; habit names must not be blank"),
            });
        }
        if self.water.daily_goal_ml == 0 {
            return Err(ConfigError::InvalidValue {
                key: "water.daily_goal_ml".into(),
                message: "must be greater than zero".into(),
            });
        }
        if self.meals.daily_calorie_target == 0 {
            return Err(ConfigError::InvalidValue {
                key: "meals.daily_calorie_target".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
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
        assert_eq!(parsed.habits.default_goal_days, 30);
        assert_eq!(parsed.water.daily_goal_ml, 2000);
        assert_eq!(parsed.habits.default_habits.len(), 4);
        assert_eq!(parsed.meals.daily_calorie_target, 2200);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: Config = toml::from_str("[water]\ndaily_goal_ml = 2500\n").unwrap();
        assert_eq!(parsed.water.daily_goal_ml, 2500);
        assert_eq!(parsed.user.default_user_id, 1);
        assert!(parsed.habits.seed_defaults);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("habits.seed_defaults").as_deref(), Some("true"));
        assert_eq!(cfg.get("water.daily_goal_ml").as_deref(), Some("2000"));
        assert!(cfg.get("water.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("habits.seed_defaults", "false").unwrap();
        cfg.set("water.daily_goal_ml", "2400").unwrap();
        cfg.set("habits.default_habits", r#"["Yoga"]"#).unwrap();
        assert!(!cfg.habits.seed_defaults);
        assert_eq!(cfg.water.daily_goal_ml, 2400);
        assert_eq!(cfg.habits.default_habits, vec!["Yoga".to_string()]);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("water.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_type_and_range() {
        let mut cfg = Config::default();
        assert!(cfg.set("habits.seed_defaults", "maybe").is_err());
        assert!(cfg.set("habits.default_goal_days", "0").is_err());
        assert!(cfg.set("water.daily_goal_ml", "-5").is_err());
        assert_eq!(cfg.habits.default_goal_days, 30);
    }

    #[test]
    fn set_rejects_blank_default_habit_names() {
        let mut cfg = Config::default();
        let err = cfg.set("habits.default_habits", r#"["Yoga", ""]"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "habits.default_habits"));
        assert_eq!(cfg.habits.default_habits.len(), 4);
        assert!(cfg.set("habits.default_habits", r#"["   "]"#).is_err());
    }

    #[test]
    fn seed_respects_toggle() {
        let mut cfg = Config::default();
        let seed = cfg.habits.seed();
        assert_eq!(seed[0], ("Morning Workout".to_string(), 30));
        cfg.habits.seed_defaults = false;
        assert!(cfg.habits.seed().is_empty());
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.water.daily_goal_ml, 2000);

        let mut changed = cfg.clone();
        changed.set("user.default_user_id", "7").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().user.default_user_id, 7);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "water = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
