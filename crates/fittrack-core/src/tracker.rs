//! Habit tracker service: one user's collection bound to a store.
//!
//! The service owns the in-memory [`HabitCollection`] and persists every
//! mutation through the injected [`HabitStore`]. All statistics come from the
//! pure functions in [`crate::habit::adherence`].

use chrono::NaiveDate;

use crate::error::{Result, ValidationError};
use crate::habit::adherence::{self, AdherenceSummary};
use crate::habit::{Habit, HabitCollection, HabitId};
use crate::storage::{HabitStore, UserId};

pub struct HabitTracker<S: HabitStore> {
    store: S,
    user_id: UserId,
    habits: HabitCollection,
}

impl<S: HabitStore> HabitTracker<S> {
    /// Load a user's habits, seeding `seed` when nothing is stored yet.
    ///
    /// Seeded habits are persisted immediately. Derived streak fields are
    /// zero until [`summary`](Self::summary) or [`refresh`](Self::refresh)
    /// runs.
    pub fn open(store: S, user_id: UserId, seed: &[(String, i64)]) -> Result<Self> {
        let next_id = store.next_habit_id(user_id)?;
        let mut habits = HabitCollection::starting_at(next_id);

        let stored = store.load_habits(user_id)?;
        if stored.is_empty() {
            // Validate the whole seed before anything is persisted.
            for (name, goal_days) in seed {
                habits.insert_new(name, *goal_days)?;
            }
            for habit in habits.iter() {
                store.save_habit(user_id, habit)?;
            }
            if !seed.is_empty() {
                tracing::info!(user_id, count = habits.len(), "seeded default habits");
            }
        } else {
            for habit in stored {
                habits.insert_loaded(habit);
            }
            tracing::debug!(user_id, count = habits.len(), "loaded habit collection");
        }

        Ok(Self {
            store,
            user_id,
            habits,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn habits(&self) -> &[Habit] {
        self.habits.as_slice()
    }

    pub fn habit(&self, id: HabitId) -> Option<&Habit> {
        self.habits.get(id)
    }

    /// Create and persist a new habit, returning its id.
    pub fn add_habit(&mut self, name: &str, goal_days: i64) -> Result<HabitId> {
        let id = self.habits.insert_new(name, goal_days)?;
        let habit = self.habits.get(id).ok_or(ValidationError::UnknownHabit(id))?;
        if let Err(e) = self.store.save_habit(self.user_id, habit) {
            self.habits.remove(id);
            return Err(e);
        }
        tracing::info!(user_id = self.user_id, habit_id = id.0, name = %habit.name, "added habit");
        Ok(id)
    }

    /// Mark `date` done or not done for a habit.
    ///
    /// Saves only when the completion set actually changed, and returns
    /// whether it did. A failed save rolls the in-memory change back.
    pub fn set_completion(&mut self, id: HabitId, date: NaiveDate, done: bool) -> Result<bool> {
        let habit = self
            .habits
            .get_mut(id)
            .ok_or(ValidationError::UnknownHabit(id))?;

        if !adherence::toggle_completion(habit, date, done) {
            return Ok(false);
        }
        if let Err(e) = self.store.save_habit(self.user_id, habit) {
            adherence::toggle_completion(habit, date, !done);
            return Err(e);
        }
        tracing::debug!(user_id = self.user_id, habit_id = id.0, %date, done, "toggled completion");
        Ok(true)
    }

    /// Delete a habit from the collection and the store.
    pub fn remove_habit(&mut self, id: HabitId) -> Result<Habit> {
        if self.habits.get(id).is_none() {
            return Err(ValidationError::UnknownHabit(id).into());
        }
        self.store.delete_habit(self.user_id, id)?;
        let removed = self
            .habits
            .remove(id)
            .ok_or(ValidationError::UnknownHabit(id))?;
        tracing::info!(user_id = self.user_id, habit_id = id.0, "removed habit");
        Ok(removed)
    }

    /// Recompute derived per-habit fields as of `today`.
    pub fn refresh(&mut self, today: NaiveDate) {
        adherence::recalculate_streaks(self.habits.as_mut_slice(), today);
    }

    /// Refresh streaks and compute aggregate statistics as of `today`.
    pub fn summary(&mut self, today: NaiveDate) -> AdherenceSummary {
        adherence::summarize(self.habits.as_mut_slice(), today)
    }
}
