//! # FitTrack Core Library
//!
//! This library provides the core logic for the FitTrack fitness tracker.
//! Every operation is available through the standalone CLI binary; any
//! graphical front end is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Adherence engine**: pure streak and completion-rate computations over a
//!   habit snapshot and an explicit `today`
//! - **Tracker**: binds one user's habit collection to a persistence port
//! - **Water**: daily water intake against a goal
//! - **Workout**: clock-free set/rest sessions feeding lifetime stats and goals
//! - **Meal plan**: per-weekday meals and exercises with calorie totals
//! - **Storage**: SQLite persistence, an in-memory fake, and TOML configuration
//!
//! ## Key Components
//!
//! - [`HabitCollection`]: insertion-ordered habits with monotonic ids
//! - [`adherence`]: `recalculate_streaks`, `weekly_completion_rate`,
//!   `longest_streak`, `perfect_days`, `toggle_completion`
//! - [`HabitTracker`]: load/seed/mutate/save workflow
//! - [`WorkoutSession`]: start/pause/tick countdown over sets
//! - [`MealPlan`]: weekly plan with day and week summaries
//! - [`Database`]: SQLite persistence for every store port
//! - [`Config`]: application configuration management

pub mod error;
pub mod habit;
pub mod meal_plan;
pub mod storage;
pub mod tracker;
pub mod water;
pub mod workout;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use habit::adherence::{self, AdherenceSummary, DayCompletion, DayTier, GoalProgress, ProgressTier};
pub use habit::{Habit, HabitCollection, HabitId, DEFAULT_GOAL_DAYS, DEFAULT_HABITS};
pub use meal_plan::{
    DaySummary, Ingredient, Meal, MealPlan, PlannedExercise, WeekSummary,
    DEFAULT_DAILY_CALORIE_TARGET,
};
pub use storage::{
    Config, Database, HabitStore, MealPlanStore, MemoryStore, UserId, UserStatsStore, WaterStore,
};
pub use tracker::HabitTracker;
pub use water::{GlassSize, HydrationStatus, WaterIntake, DEFAULT_DAILY_GOAL_ML};
pub use workout::{
    Exercise, FitnessGoals, GoalArea, SessionState, SetSummary, UserStats, WorkoutEvent,
    WorkoutSession, WorkoutSummary, EXERCISES,
};
