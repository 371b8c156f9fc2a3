//! Persistence ports and their implementations.
//!
//! The adherence engine never touches storage. Callers load a snapshot through
//! [`HabitStore`], mutate it in memory, and save each changed habit back
//! explicitly.

mod config;
pub mod database;
pub mod memory;
pub mod migrations;

pub use config::{Config, HabitsConfig, MealsConfig, UserConfig, WaterConfig};
pub use database::Database;
pub use memory::MemoryStore;

use chrono::{NaiveDate, NaiveTime, Weekday};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::habit::{Habit, HabitId};
use crate::meal_plan::{Meal, MealPlan, PlannedExercise};
use crate::water::WaterIntake;
use crate::workout::{FitnessGoals, UserStats};

/// Identifier of the user owning a habit collection.
pub type UserId = i64;

/// Storage contract for habit collections.
///
/// Loaded habits carry no derived state; run the engine after loading.
pub trait HabitStore {
    /// All habits of `user_id`, ordered by id.
    fn load_habits(&self, user_id: UserId) -> Result<Vec<Habit>>;

    /// Insert or replace a habit, including its full completion set.
    fn save_habit(&self, user_id: UserId, habit: &Habit) -> Result<()>;

    /// Delete a habit and its completions. Returns `false` if it did not exist.
    fn delete_habit(&self, user_id: UserId, id: HabitId) -> Result<bool>;

    /// Id to issue next for `user_id`; never one that was issued before.
    fn next_habit_id(&self, user_id: UserId) -> Result<HabitId>;
}

impl<T: HabitStore + ?Sized> HabitStore for &T {
    fn load_habits(&self, user_id: UserId) -> Result<Vec<Habit>> {
        (**self).load_habits(user_id)
    }

    fn save_habit(&self, user_id: UserId, habit: &Habit) -> Result<()> {
        (**self).save_habit(user_id, habit)
    }

    fn delete_habit(&self, user_id: UserId, id: HabitId) -> Result<bool> {
        (**self).delete_habit(user_id, id)
    }

    fn next_habit_id(&self, user_id: UserId) -> Result<HabitId> {
        (**self).next_habit_id(user_id)
    }
}

/// Storage contract for daily water intake.
pub trait WaterStore {
    fn load_water(&self, user_id: UserId, date: NaiveDate) -> Result<Option<WaterIntake>>;

    fn save_water(&self, user_id: UserId, intake: &WaterIntake) -> Result<()>;
}

/// Storage contract for lifetime workout totals and goal progress.
///
/// Users with nothing stored load as all zeros.
pub trait UserStatsStore {
    fn load_stats(&self, user_id: UserId) -> Result<UserStats>;

    fn save_stats(&self, user_id: UserId, stats: &UserStats) -> Result<()>;

    fn load_goals(&self, user_id: UserId) -> Result<FitnessGoals>;

    fn save_goals(&self, user_id: UserId, goals: &FitnessGoals) -> Result<()>;
}

/// Storage contract for the weekly meal and exercise plan.
pub trait MealPlanStore {
    fn load_meal_plan(&self, user_id: UserId) -> Result<MealPlan>;

    /// Insert or update the meal in the same `(weekday, name, time)` slot,
    /// replacing its ingredient list.
    fn save_meal(&self, user_id: UserId, meal: &Meal) -> Result<()>;

    fn delete_meal(&self, user_id: UserId, weekday: Weekday, name: &str, time: NaiveTime)
        -> Result<bool>;

    /// Insert or update the exercise with the same `(weekday, name)`.
    fn save_planned_exercise(&self, user_id: UserId, exercise: &PlannedExercise) -> Result<()>;
}

/// Returns the data directory.
///
/// `FITTRACK_DATA_DIR` wins if set. Otherwise `~/.config/fittrack`, or
/// `~/.config/fittrack-dev` when `FITTRACK_ENV=dev`. The directory is created
/// if missing.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("FITTRACK_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FITTRACK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("fittrack-dev")
            } else {
                base_dir.join("fittrack")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// ISO `YYYY-MM-DD`, the on-disk date format.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// `HH:MM`, the on-disk meal time format.
pub(crate) const TIME_FORMAT: &str = "%H:%M";
