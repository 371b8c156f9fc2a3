//! SQLite-backed storage for habits and water intake.
//!
//! Provides persistent storage for:
//! - Habits and their completion dates, per user
//! - The per-user habit id sequence
//! - Daily water intake records
//! - Lifetime workout totals and goal progress
//! - The weekly meal and exercise plan

use chrono::{NaiveDate, NaiveTime, Weekday};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeSet;
use std::path::Path;

use super::{
    data_dir, migrations, HabitStore, MealPlanStore, UserId, UserStatsStore, WaterStore,
    DATE_FORMAT, TIME_FORMAT,
};
use crate::error::{DatabaseError, Result};
use crate::habit::{Habit, HabitId};
use crate::meal_plan::{weekday_from_number, Ingredient, Meal, MealPlan, PlannedExercise};
use crate::water::WaterIntake;
use crate::workout::{FitnessGoals, GoalArea, UserStats};

/// SQLite database for all FitTrack storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/fittrack.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("fittrack.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened database");
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    fn load_completions(&self, user_id: UserId, habit_id: HabitId) -> Result<BTreeSet<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT completion_date FROM habit_completions
             WHERE user_id = ?1 AND habit_id = ?2",
        )?;
        let rows = stmt.query_map(params![user_id, habit_id.0], |row| row.get::<_, String>(0))?;

        let mut dates = BTreeSet::new();
        for row in rows {
            let value = row?;
            let date = NaiveDate::parse_from_str(&value, DATE_FORMAT)
                .map_err(|_| DatabaseError::MalformedDate { habit_id, value })?;
            dates.insert(date);
        }
        Ok(dates)
    }

    fn load_ingredients(&self, meal_id: i64) -> Result<Vec<Ingredient>> {
        let mut stmt = self.conn.prepare(
            "SELECT ingredient_name, quantity FROM meal_ingredients
             WHERE meal_id = ?1
             ORDER BY position",
        )?;
        let ingredients = stmt
            .query_map(params![meal_id], |row| {
                Ok(Ingredient {
                    name: row.get(0)?,
                    quantity: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ingredients)
    }
}

fn stored_weekday(day: u32) -> Result<Weekday> {
    weekday_from_number(day).ok_or_else(|| {
        DatabaseError::MalformedValue {
            field: "day_of_week",
            value: day.to_string(),
        }
        .into()
    })
}

fn stored_time(value: String) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(&value, TIME_FORMAT).map_err(|_| {
        DatabaseError::MalformedValue {
            field: "meal time",
            value,
        }
        .into()
    })
}

impl HabitStore for Database {
    fn load_habits(&self, user_id: UserId) -> Result<Vec<Habit>> {
        let mut stmt = self.conn.prepare(
            "SELECT habit_id, name, goal_days FROM habits
             WHERE user_id = ?1
             ORDER BY habit_id",
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((
                    HabitId(row.get::<_, i64>(0)?),
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut habits = Vec::with_capacity(rows.len());
        for (id, name, goal_days) in rows {
            let completed = self.load_completions(user_id, id)?;
            habits.push(Habit::from_parts(id, name, goal_days, completed));
        }
        tracing::debug!(user_id, count = habits.len(), "loaded habits");
        Ok(habits)
    }

    fn save_habit(&self, user_id: UserId, habit: &Habit) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT OR REPLACE INTO habits (user_id, habit_id, name, goal_days)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, habit.id.0, habit.name, habit.goal_days],
        )?;

        tx.execute(
            "INSERT INTO habit_sequence (user_id, next_id) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET next_id = MAX(next_id, excluded.next_id)",
            params![user_id, habit.id.0 + 1],
        )?;

        tx.execute(
            "DELETE FROM habit_completions WHERE user_id = ?1 AND habit_id = ?2",
            params![user_id, habit.id.0],
        )?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO habit_completions (user_id, habit_id, completion_date)
                 VALUES (?1, ?2, ?3)",
            )?;
            for date in &habit.completed_dates {
                insert.execute(params![
                    user_id,
                    habit.id.0,
                    date.format(DATE_FORMAT).to_string()
                ])?;
            }
        }

        tx.commit()?;
        tracing::debug!(
            user_id,
            habit_id = habit.id.0,
            completions = habit.completed_dates.len(),
            "saved habit"
        );
        Ok(())
    }

    fn delete_habit(&self, user_id: UserId, id: HabitId) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM habit_completions WHERE user_id = ?1 AND habit_id = ?2",
            params![user_id, id.0],
        )?;
        let deleted = tx.execute(
            "DELETE FROM habits WHERE user_id = ?1 AND habit_id = ?2",
            params![user_id, id.0],
        )?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    fn next_habit_id(&self, user_id: UserId) -> Result<HabitId> {
        let sequence: Option<i64> = self
            .conn
            .query_row(
                "SELECT next_id FROM habit_sequence WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        let max_stored: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(habit_id), 0) FROM habits WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(HabitId(sequence.unwrap_or(1).max(max_stored + 1)))
    }
}

impl WaterStore for Database {
    fn load_water(&self, user_id: UserId, date: NaiveDate) -> Result<Option<WaterIntake>> {
        let row = self
            .conn
            .query_row(
                "SELECT daily_goal, current_amount FROM water_intake
                 WHERE user_id = ?1 AND date = ?2",
                params![user_id, date.format(DATE_FORMAT).to_string()],
                |row| Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?)),
            )
            .optional()?;

        Ok(row.map(|(daily_goal_ml, consumed_ml)| WaterIntake {
            date,
            daily_goal_ml,
            consumed_ml,
        }))
    }

    fn save_water(&self, user_id: UserId, intake: &WaterIntake) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO water_intake (user_id, date, daily_goal, current_amount)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user_id,
                intake.date.format(DATE_FORMAT).to_string(),
                intake.daily_goal_ml,
                intake.consumed_ml,
            ],
        )?;
        Ok(())
    }
}

impl UserStatsStore for Database {
    fn load_stats(&self, user_id: UserId) -> Result<UserStats> {
        let stats = self
            .conn
            .query_row(
                "SELECT workout_sessions, calories_burned, activity_minutes, exercises_done
                 FROM user_stats WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok(UserStats {
                        workout_sessions: row.get(0)?,
                        calories_burned: row.get(1)?,
                        activity_minutes: row.get(2)?,
                        exercises_done: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(stats.unwrap_or_default())
    }

    fn save_stats(&self, user_id: UserId, stats: &UserStats) -> Result<()> {
        self.conn.execute(
            "INSERT INTO user_stats
                (user_id, workout_sessions, calories_burned, activity_minutes, exercises_done)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id) DO UPDATE SET
                workout_sessions = excluded.workout_sessions,
                calories_burned  = excluded.calories_burned,
                activity_minutes = excluded.activity_minutes,
                exercises_done   = excluded.exercises_done",
            params![
                user_id,
                stats.workout_sessions,
                stats.calories_burned,
                stats.activity_minutes,
                stats.exercises_done,
            ],
        )?;
        tracing::debug!(user_id, sessions = stats.workout_sessions, "saved user stats");
        Ok(())
    }

    fn load_goals(&self, user_id: UserId) -> Result<FitnessGoals> {
        let mut stmt = self
            .conn
            .prepare("SELECT goal_name, progress FROM user_goals WHERE user_id = ?1")?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut goals = FitnessGoals::default();
        for (name, progress) in rows {
            match GoalArea::from_key(&name) {
                Some(area) => {
                    let progress = u8::try_from(progress.clamp(0, 100)).unwrap_or_default();
                    goals.set(area, progress);
                }
                None => tracing::warn!(user_id, goal = %name, "ignoring unknown stored goal"),
            }
        }
        Ok(goals)
    }

    fn save_goals(&self, user_id: UserId, goals: &FitnessGoals) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for area in GoalArea::ALL {
            tx.execute(
                "INSERT INTO user_goals (user_id, goal_name, progress) VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id, goal_name) DO UPDATE SET progress = excluded.progress",
                params![user_id, area.key(), goals.get(area)],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl MealPlanStore for Database {
    fn load_meal_plan(&self, user_id: UserId) -> Result<MealPlan> {
        let mut stmt = self.conn.prepare(
            "SELECT id, day_of_week, name, time, calories FROM meals
             WHERE user_id = ?1
             ORDER BY day_of_week, time, name",
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, u32>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut meals = Vec::with_capacity(rows.len());
        for (id, day, name, time, calories) in rows {
            meals.push(Meal {
                weekday: stored_weekday(day)?,
                name,
                time: stored_time(time)?,
                calories,
                ingredients: self.load_ingredients(id)?,
            });
        }

        let mut stmt = self.conn.prepare(
            "SELECT day_of_week, name, duration_minutes, calories, completed
             FROM planned_exercises
             WHERE user_id = ?1
             ORDER BY day_of_week, id",
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, u32>(3)?,
                    row.get::<_, bool>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut exercises = Vec::with_capacity(rows.len());
        for (day, name, duration_minutes, calories, completed) in rows {
            exercises.push(PlannedExercise {
                weekday: stored_weekday(day)?,
                name,
                duration_minutes,
                calories,
                completed,
            });
        }

        tracing::debug!(
            user_id,
            meals = meals.len(),
            exercises = exercises.len(),
            "loaded meal plan"
        );
        Ok(MealPlan::from_parts(meals, exercises))
    }

    fn save_meal(&self, user_id: UserId, meal: &Meal) -> Result<()> {
        let day = meal.weekday.number_from_monday();
        let time = meal.time.format(TIME_FORMAT).to_string();
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO meals (user_id, day_of_week, name, time, calories)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id, day_of_week, name, time)
             DO UPDATE SET calories = excluded.calories",
            params![user_id, day, meal.name, time, meal.calories],
        )?;
        let meal_id: i64 = tx.query_row(
            "SELECT id FROM meals
             WHERE user_id = ?1 AND day_of_week = ?2 AND name = ?3 AND time = ?4",
            params![user_id, day, meal.name, time],
            |row| row.get(0),
        )?;

        tx.execute(
            "DELETE FROM meal_ingredients WHERE meal_id = ?1",
            params![meal_id],
        )?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO meal_ingredients (meal_id, position, ingredient_name, quantity)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (position, ingredient) in meal.ingredients.iter().enumerate() {
                insert.execute(params![
                    meal_id,
                    position as i64,
                    ingredient.name,
                    ingredient.quantity
                ])?;
            }
        }

        tx.commit()?;
        tracing::debug!(user_id, meal_id, name = %meal.name, "saved meal");
        Ok(())
    }

    fn delete_meal(
        &self,
        user_id: UserId,
        weekday: Weekday,
        name: &str,
        time: NaiveTime,
    ) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let meal_id: Option<i64> = tx
            .query_row(
                "SELECT id FROM meals
                 WHERE user_id = ?1 AND day_of_week = ?2 AND name = ?3 AND time = ?4",
                params![
                    user_id,
                    weekday.number_from_monday(),
                    name,
                    time.format(TIME_FORMAT).to_string()
                ],
                |row| row.get(0),
            )
            .optional()?;
        let Some(meal_id) = meal_id else {
            return Ok(false);
        };

        tx.execute(
            "DELETE FROM meal_ingredients WHERE meal_id = ?1",
            params![meal_id],
        )?;
        tx.execute("DELETE FROM meals WHERE id = ?1", params![meal_id])?;
        tx.commit()?;
        Ok(true)
    }

    fn save_planned_exercise(&self, user_id: UserId, exercise: &PlannedExercise) -> Result<()> {
        self.conn.execute(
            "INSERT INTO planned_exercises
                (user_id, day_of_week, name, duration_minutes, calories, completed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(user_id, day_of_week, name) DO UPDATE SET
                duration_minutes = excluded.duration_minutes,
                calories         = excluded.calories,
                completed        = excluded.completed",
            params![
                user_id,
                exercise.weekday.number_from_monday(),
                exercise.name,
                exercise.duration_minutes,
                exercise.calories,
                exercise.completed,
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(id: i64, name: &str, dates: &[NaiveDate]) -> Habit {
        Habit::from_parts(HabitId(id), name.into(), 30, dates.iter().copied().collect())
    }

    #[test]
    fn save_and_load_habit() {
        let db = Database::open_memory().unwrap();
        let h = habit(1, "Reading", &[date(2024, 1, 1), date(2024, 1, 2)]);
        db.save_habit(1, &h).unwrap();

        let loaded = db.load_habits(1).unwrap();
        assert_eq!(loaded, vec![h]);
    }

    #[test]
    fn save_replaces_completion_set() {
        let db = Database::open_memory().unwrap();
        db.save_habit(1, &habit(1, "Reading", &[date(2024, 1, 1), date(2024, 1, 2)]))
            .unwrap();
        db.save_habit(1, &habit(1, "Reading", &[date(2024, 1, 3)])).unwrap();

        let loaded = db.load_habits(1).unwrap();
        assert_eq!(loaded[0].completed_dates, BTreeSet::from([date(2024, 1, 3)]));
    }

    #[test]
    fn habits_are_scoped_per_user() {
        let db = Database::open_memory().unwrap();
        db.save_habit(1, &habit(1, "Reading", &[])).unwrap();
        db.save_habit(2, &habit(1, "Running", &[date(2024, 1, 1)])).unwrap();

        assert_eq!(db.load_habits(1).unwrap()[0].name, "Reading");
        assert_eq!(db.load_habits(2).unwrap()[0].name, "Running");
        assert!(db.load_habits(3).unwrap().is_empty());
    }

    #[test]
    fn load_orders_by_id() {
        let db = Database::open_memory().unwrap();
        db.save_habit(1, &habit(3, "C", &[])).unwrap();
        db.save_habit(1, &habit(1, "A", &[])).unwrap();
        let ids: Vec<i64> = db.load_habits(1).unwrap().iter().map(|h| h.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn next_id_survives_deletion() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.next_habit_id(1).unwrap(), HabitId(1));
        db.save_habit(1, &habit(1, "A", &[])).unwrap();
        db.save_habit(1, &habit(2, "B", &[date(2024, 1, 1)])).unwrap();
        assert_eq!(db.next_habit_id(1).unwrap(), HabitId(3));

        assert!(db.delete_habit(1, HabitId(2)).unwrap());
        assert!(!db.delete_habit(1, HabitId(2)).unwrap());
        assert_eq!(db.next_habit_id(1).unwrap(), HabitId(3));

        let orphans: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM habit_completions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn malformed_stored_date_is_reported() {
        let db = Database::open_memory().unwrap();
        db.save_habit(1, &habit(1, "A", &[])).unwrap();
        db.conn()
            .execute(
                "INSERT INTO habit_completions (user_id, habit_id, completion_date)
                 VALUES (1, 1, '01/02/2024')",
                [],
            )
            .unwrap();

        let err = db.load_habits(1).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Database(DatabaseError::MalformedDate { .. })
        ));
    }

    #[test]
    fn water_roundtrip_per_day() {
        let db = Database::open_memory().unwrap();
        let day = date(2024, 5, 1);
        assert!(db.load_water(1, day).unwrap().is_none());

        let mut intake = WaterIntake::new(day, 2000);
        intake.add(750);
        db.save_water(1, &intake).unwrap();
        intake.add(250);
        db.save_water(1, &intake).unwrap();

        assert_eq!(db.load_water(1, day).unwrap(), Some(intake));
        assert!(db.load_water(1, date(2024, 5, 2)).unwrap().is_none());
    }

    #[test]
    fn stats_and_goals_default_then_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.load_stats(1).unwrap(), UserStats::default());
        assert_eq!(db.load_goals(1).unwrap(), FitnessGoals::default());

        let stats = UserStats {
            workout_sessions: 2,
            calories_burned: 31,
            activity_minutes: 4,
            exercises_done: 2,
        };
        db.save_stats(1, &stats).unwrap();
        let mut goals = FitnessGoals::default();
        goals.record("Squats");
        db.save_goals(1, &goals).unwrap();
        goals.record("Squats");
        db.save_goals(1, &goals).unwrap();

        assert_eq!(db.load_stats(1).unwrap(), stats);
        assert_eq!(db.load_goals(1).unwrap(), goals);
        assert_eq!(db.load_goals(2).unwrap(), FitnessGoals::default());
    }

    #[test]
    fn unknown_and_out_of_range_goals_are_tolerated() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute_batch(
                "INSERT INTO user_goals (user_id, goal_name, progress) VALUES (1, 'Flexibility', 40);
                 INSERT INTO user_goals (user_id, goal_name, progress) VALUES (1, 'cardio', 250);",
            )
            .unwrap();
        let goals = db.load_goals(1).unwrap();
        assert_eq!(goals.cardio, 100);
        assert_eq!(goals.strength, 0);
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn meal_upsert_replaces_ingredients() {
        let db = Database::open_memory().unwrap();
        let meal = Meal::new(Weekday::Mon, "Breakfast", at(7, 30), 380)
            .unwrap()
            .with_ingredients(vec![
                "Muesli=60g".parse().unwrap(),
                "Skim milk=200ml".parse().unwrap(),
            ]);
        db.save_meal(1, &meal).unwrap();

        let lighter = Meal::new(Weekday::Mon, "Breakfast", at(7, 30), 300)
            .unwrap()
            .with_ingredients(vec!["Yogurt=125g".parse().unwrap()]);
        db.save_meal(1, &lighter).unwrap();

        let plan = db.load_meal_plan(1).unwrap();
        assert_eq!(plan.meals(), &[lighter]);
        let ingredients: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM meal_ingredients", [], |row| row.get(0))
            .unwrap();
        assert_eq!(ingredients, 1);
    }

    #[test]
    fn meal_plan_roundtrip_and_delete() {
        let db = Database::open_memory().unwrap();
        let lunch = Meal::new(Weekday::Wed, "Lunch", at(12, 30), 550)
            .unwrap()
            .with_ingredients(vec!["Lentils=150g".parse().unwrap(), "Feta=50g".parse().unwrap()]);
        let snack = Meal::new(Weekday::Wed, "Snack", at(16, 0), 200).unwrap();
        db.save_meal(1, &snack).unwrap();
        db.save_meal(1, &lunch).unwrap();

        let mut swim = PlannedExercise::new(Weekday::Wed, "Swimming", 40, 450).unwrap();
        db.save_planned_exercise(1, &swim).unwrap();
        swim.completed = true;
        db.save_planned_exercise(1, &swim).unwrap();

        let plan = db.load_meal_plan(1).unwrap();
        let names: Vec<&str> = plan.meals().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Lunch", "Snack"]);
        assert_eq!(plan.meals()[0].ingredients[1].name, "Feta");
        assert_eq!(plan.exercises(), &[swim]);
        assert!(db.load_meal_plan(2).unwrap().meals().is_empty());

        assert!(db.delete_meal(1, Weekday::Wed, "Lunch", at(12, 30)).unwrap());
        assert!(!db.delete_meal(1, Weekday::Wed, "Lunch", at(12, 30)).unwrap());
        assert_eq!(db.load_meal_plan(1).unwrap().meals(), &[snack]);
    }

    #[test]
    fn malformed_meal_time_is_reported() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO meals (user_id, day_of_week, name, time, calories)
                 VALUES (1, 1, 'Lunch', 'noon', 500)",
                [],
            )
            .unwrap();
        let err = db.load_meal_plan(1).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Database(DatabaseError::MalformedValue { field: "meal time", .. })
        ));
    }
}
