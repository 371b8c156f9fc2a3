//! Habit types and the per-user habit collection.
//!
//! A [`Habit`] is a recurring activity tracked by the set of calendar dates on
//! which it was completed. Streaks and other derived values are computed by
//! the [`adherence`] engine and cached on the habit for display only.

pub mod adherence;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::ValidationError;

/// Streak target used when none is given.
pub const DEFAULT_GOAL_DAYS: i64 = 30;

/// Habits created for a user whose collection is empty on first load.
pub const DEFAULT_HABITS: [&str; 4] = ["Morning Workout", "Meditation", "Drink Water", "Reading"];

/// Identifier of a habit within one user's collection.
///
/// Issued monotonically by [`HabitCollection`] and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub i64);

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trackable recurring activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    /// Target streak length. Only used for progress display.
    pub goal_days: i64,
    pub completed_dates: BTreeSet<NaiveDate>,
    /// Derived by [`adherence::recalculate_streaks`]; never persisted.
    #[serde(default)]
    pub current_streak: u32,
    /// Derived by [`adherence::recalculate_streaks`]; never persisted.
    #[serde(default)]
    pub completed_today: bool,
}

impl Habit {
    /// Create a validated habit with no completions.
    ///
    /// The name is trimmed and must not be empty; `goal_days` must be at least 1.
    pub fn new(id: HabitId, name: &str, goal_days: i64) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::invalid("name", "habit name must not be empty"));
        }
        if goal_days < 1 {
            return Err(ValidationError::invalid(
                "goal_days",
                format!("goal must be at least 1 day, got {goal_days}"),
            ));
        }
        Ok(Self::from_parts(id, name.to_string(), goal_days, BTreeSet::new()))
    }

    /// Rebuild a habit from stored fields without validation.
    ///
    /// Stored records may predate validation, so odd goals are kept as-is and
    /// left to the engine to tolerate.
    pub fn from_parts(
        id: HabitId,
        name: String,
        goal_days: i64,
        completed_dates: BTreeSet<NaiveDate>,
    ) -> Self {
        Self {
            id,
            name,
            goal_days,
            completed_dates,
            current_streak: 0,
            completed_today: false,
        }
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }
}

/// One user's habits, in insertion order, with a monotonic id counter.
#[derive(Debug, Clone, Default)]
pub struct HabitCollection {
    habits: Vec<Habit>,
    next_id: i64,
}

impl HabitCollection {
    pub fn new() -> Self {
        Self {
            habits: Vec::new(),
            next_id: 1,
        }
    }

    /// Start an empty collection whose first issued id is `next_id`.
    ///
    /// Used when storage remembers ids that are no longer present.
    pub fn starting_at(next_id: HabitId) -> Self {
        Self {
            habits: Vec::new(),
            next_id: next_id.0.max(1),
        }
    }

    /// Id the next call to [`insert_new`](Self::insert_new) will assign.
    pub fn next_id(&self) -> HabitId {
        HabitId(self.next_id.max(1))
    }

    /// Create a habit with the next unused id and append it.
    pub fn insert_new(&mut self, name: &str, goal_days: i64) -> Result<HabitId, ValidationError> {
        let id = self.next_id();
        let habit = Habit::new(id, name, goal_days)?;
        self.habits.push(habit);
        self.next_id = id.0 + 1;
        Ok(id)
    }

    /// Add a habit that already carries an id (e.g. loaded from storage).
    ///
    /// A habit with the same id is replaced in place. The id counter moves
    /// past the inserted id so it is never issued again.
    pub fn insert_loaded(&mut self, habit: Habit) {
        self.next_id = self.next_id.max(habit.id.0 + 1);
        match self.habits.iter_mut().find(|h| h.id == habit.id) {
            Some(slot) => *slot = habit,
            None => self.habits.push(habit),
        }
    }

    /// Remove a habit. Its id stays retired.
    pub fn remove(&mut self, id: HabitId) -> Option<Habit> {
        let pos = self.habits.iter().position(|h| h.id == id)?;
        Some(self.habits.remove(pos))
    }

    pub fn get(&self, id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn get_mut(&mut self, id: HabitId) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|h| h.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Habit> {
        self.habits.iter()
    }

    pub fn as_slice(&self) -> &[Habit] {
        &self.habits
    }

    pub fn as_mut_slice(&mut self) -> &mut [Habit] {
        &mut self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_habit_trims_name_and_starts_empty() {
        let habit = Habit::new(HabitId(1), "  Reading ", 30).unwrap();
        assert_eq!(habit.name, "Reading");
        assert!(habit.completed_dates.is_empty());
        assert_eq!(habit.current_streak, 0);
        assert!(!habit.completed_today);
    }

    #[test]
    fn new_habit_rejects_blank_name() {
        let err = Habit::new(HabitId(1), "   ", 30).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "name"));
    }

    #[test]
    fn new_habit_rejects_non_positive_goal() {
        assert!(Habit::new(HabitId(1), "Stretch", 0).is_err());
        assert!(Habit::new(HabitId(1), "Stretch", -3).is_err());
        assert!(Habit::new(HabitId(1), "Stretch", 1).is_ok());
    }

    #[test]
    fn collection_issues_monotonic_ids() {
        let mut habits = HabitCollection::new();
        let a = habits.insert_new("A", 30).unwrap();
        let b = habits.insert_new("B", 30).unwrap();
        assert_eq!(a, HabitId(1));
        assert_eq!(b, HabitId(2));
        assert_eq!(habits.next_id(), HabitId(3));
    }

    #[test]
    fn removed_ids_are_never_reused() {
        let mut habits = HabitCollection::new();
        habits.insert_new("A", 30).unwrap();
        let b = habits.insert_new("B", 30).unwrap();
        assert!(habits.remove(b).is_some());
        let c = habits.insert_new("C", 30).unwrap();
        assert_eq!(c, HabitId(3));
        assert!(habits.get(b).is_none());
    }

    #[test]
    fn failed_insert_does_not_consume_an_id() {
        let mut habits = HabitCollection::new();
        assert!(habits.insert_new("", 30).is_err());
        assert_eq!(habits.insert_new("A", 30).unwrap(), HabitId(1));
    }

    #[test]
    fn insert_loaded_bumps_counter_and_replaces_same_id() {
        let mut habits = HabitCollection::new();
        habits.insert_loaded(Habit::from_parts(HabitId(7), "Old".into(), 30, BTreeSet::new()));
        habits.insert_loaded(Habit::from_parts(HabitId(7), "New".into(), 10, BTreeSet::new()));
        assert_eq!(habits.len(), 1);
        assert_eq!(habits.get(HabitId(7)).unwrap().name, "New");
        assert_eq!(habits.next_id(), HabitId(8));
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut habits = HabitCollection::new();
        for name in DEFAULT_HABITS {
            habits.insert_new(name, DEFAULT_GOAL_DAYS).unwrap();
        }
        let names: Vec<&str> = habits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, DEFAULT_HABITS);
    }

    #[test]
    fn starting_at_respects_stored_counter() {
        let mut habits = HabitCollection::starting_at(HabitId(12));
        assert_eq!(habits.insert_new("A", 30).unwrap(), HabitId(12));
    }
}
