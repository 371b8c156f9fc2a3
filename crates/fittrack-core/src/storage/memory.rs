//! In-memory store implementing the same contracts as [`Database`](super::Database).
//!
//! Intended for tests and for embedding the tracker without a disk.

use chrono::{NaiveDate, NaiveTime, Weekday};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use super::{HabitStore, MealPlanStore, UserId, UserStatsStore, WaterStore};
use crate::error::{CoreError, Result};
use crate::habit::{Habit, HabitId};
use crate::meal_plan::{Meal, MealPlan, PlannedExercise};
use crate::water::WaterIntake;
use crate::workout::{FitnessGoals, UserStats};

#[derive(Debug, Default)]
pub struct MemoryStore {
    habits: RefCell<HashMap<UserId, BTreeMap<HabitId, Habit>>>,
    sequence: RefCell<HashMap<UserId, i64>>,
    water: RefCell<HashMap<(UserId, NaiveDate), WaterIntake>>,
    stats: RefCell<HashMap<UserId, UserStats>>,
    goals: RefCell<HashMap<UserId, FitnessGoals>>,
    plans: RefCell<HashMap<UserId, MealPlan>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save_habit` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Make every following `save_habit` fail, to exercise error paths.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl HabitStore for MemoryStore {
    fn load_habits(&self, user_id: UserId) -> Result<Vec<Habit>> {
        let habits = self.habits.borrow();
        Ok(habits
            .get(&user_id)
            .map(|by_id| {
                by_id
                    .values()
                    .map(|h| {
                        Habit::from_parts(h.id, h.name.clone(), h.goal_days, h.completed_dates.clone())
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn save_habit(&self, user_id: UserId, habit: &Habit) -> Result<()> {
        if self.fail_saves.get() {
            return Err(CoreError::Custom("memory store: save rejected".into()));
        }
        self.habits
            .borrow_mut()
            .entry(user_id)
            .or_default()
            .insert(habit.id, habit.clone());
        let mut sequence = self.sequence.borrow_mut();
        let next = sequence.entry(user_id).or_insert(1);
        *next = (*next).max(habit.id.0 + 1);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn delete_habit(&self, user_id: UserId, id: HabitId) -> Result<bool> {
        Ok(self
            .habits
            .borrow_mut()
            .get_mut(&user_id)
            .and_then(|by_id| by_id.remove(&id))
            .is_some())
    }

    fn next_habit_id(&self, user_id: UserId) -> Result<HabitId> {
        Ok(HabitId(
            self.sequence.borrow().get(&user_id).copied().unwrap_or(1),
        ))
    }
}

impl WaterStore for MemoryStore {
    fn load_water(&self, user_id: UserId, date: NaiveDate) -> Result<Option<WaterIntake>> {
        Ok(self.water.borrow().get(&(user_id, date)).cloned())
    }

    fn save_water(&self, user_id: UserId, intake: &WaterIntake) -> Result<()> {
        self.water
            .borrow_mut()
            .insert((user_id, intake.date), intake.clone());
        Ok(())
    }
}

impl UserStatsStore for MemoryStore {
    fn load_stats(&self, user_id: UserId) -> Result<UserStats> {
        Ok(self.stats.borrow().get(&user_id).copied().unwrap_or_default())
    }

    fn save_stats(&self, user_id: UserId, stats: &UserStats) -> Result<()> {
        self.stats.borrow_mut().insert(user_id, *stats);
        Ok(())
    }

    fn load_goals(&self, user_id: UserId) -> Result<FitnessGoals> {
        Ok(self.goals.borrow().get(&user_id).copied().unwrap_or_default())
    }

    fn save_goals(&self, user_id: UserId, goals: &FitnessGoals) -> Result<()> {
        self.goals.borrow_mut().insert(user_id, *goals);
        Ok(())
    }
}

impl MealPlanStore for MemoryStore {
    fn load_meal_plan(&self, user_id: UserId) -> Result<MealPlan> {
        Ok(self.plans.borrow().get(&user_id).cloned().unwrap_or_default())
    }

    fn save_meal(&self, user_id: UserId, meal: &Meal) -> Result<()> {
        self.plans
            .borrow_mut()
            .entry(user_id)
            .or_default()
            .upsert_meal(meal.clone());
        Ok(())
    }

    fn delete_meal(
        &self,
        user_id: UserId,
        weekday: Weekday,
        name: &str,
        time: NaiveTime,
    ) -> Result<bool> {
        Ok(self
            .plans
            .borrow_mut()
            .get_mut(&user_id)
            .and_then(|plan| plan.remove_meal(weekday, name, time))
            .is_some())
    }

    fn save_planned_exercise(&self, user_id: UserId, exercise: &PlannedExercise) -> Result<()> {
        self.plans
            .borrow_mut()
            .entry(user_id)
            .or_default()
            .upsert_exercise(exercise.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loaded_habits_have_no_derived_state() {
        let store = MemoryStore::new();
        let mut habit = Habit::new(HabitId(1), "Reading", 30).unwrap();
        habit.current_streak = 9;
        habit.completed_today = true;
        store.save_habit(1, &habit).unwrap();

        let loaded = store.load_habits(1).unwrap();
        assert_eq!(loaded[0].current_streak, 0);
        assert!(!loaded[0].completed_today);
    }

    #[test]
    fn sequence_outlives_deletes() {
        let store = MemoryStore::new();
        store.save_habit(1, &Habit::new(HabitId(4), "A", 30).unwrap()).unwrap();
        assert!(store.delete_habit(1, HabitId(4)).unwrap());
        assert_eq!(store.next_habit_id(1).unwrap(), HabitId(5));
        assert_eq!(store.next_habit_id(2).unwrap(), HabitId(1));
    }

    #[test]
    fn failing_saves_are_not_counted() {
        let store = MemoryStore::new();
        store.fail_saves(true);
        assert!(store.save_habit(1, &Habit::new(HabitId(1), "A", 30).unwrap()).is_err());
        assert_eq!(store.save_count(), 0);
        assert!(store.load_habits(1).unwrap().is_empty());
    }

    #[test]
    fn stats_and_plans_are_per_user() {
        let store = MemoryStore::new();
        let mut goals = FitnessGoals::default();
        goals.record("Plank");
        store.save_goals(1, &goals).unwrap();
        assert_eq!(store.load_goals(1).unwrap().strength, 10);
        assert_eq!(store.load_goals(2).unwrap(), FitnessGoals::default());

        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let meal = Meal::new(Weekday::Fri, "Breakfast", time, 390).unwrap();
        store.save_meal(1, &meal).unwrap();
        assert_eq!(store.load_meal_plan(1).unwrap().meals(), &[meal]);
        assert!(store.load_meal_plan(2).unwrap().meals().is_empty());
        assert!(store.delete_meal(1, Weekday::Fri, "Breakfast", time).unwrap());
        assert!(!store.delete_meal(2, Weekday::Fri, "Breakfast", time).unwrap());
    }
}
