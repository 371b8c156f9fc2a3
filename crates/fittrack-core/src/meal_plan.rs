//! Weekly meal and exercise plan.
//!
//! The plan is keyed by weekday, not by date: the same Monday menu repeats
//! every week. Meals are identified by `(weekday, name, time)` and planned
//! exercises by `(weekday, name)`, so saving the same key twice updates it.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Daily intake goal used when none is configured.
pub const DEFAULT_DAILY_CALORIE_TARGET: u32 = 2200;

/// Monday-first week order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Inverse of `Weekday::number_from_monday`.
pub fn weekday_from_number(n: u32) -> Option<Weekday> {
    n.checked_sub(1)
        .and_then(|i| WEEK.get(usize::try_from(i).ok()?))
        .copied()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Free-form amount such as "60g" or "1/2".
    pub quantity: String,
}

impl FromStr for Ingredient {
    type Err = ValidationError;

    /// Parses `name=quantity`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, quantity) = s
            .split_once('=')
            .ok_or_else(|| ValidationError::invalid("ingredient", "expected NAME=QUANTITY"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::invalid("ingredient", "name must not be empty"));
        }
        Ok(Self {
            name: name.to_string(),
            quantity: quantity.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub weekday: Weekday,
    pub name: String,
    pub time: NaiveTime,
    pub calories: u32,
    pub ingredients: Vec<Ingredient>,
}

impl Meal {
    pub fn new(
        weekday: Weekday,
        name: &str,
        time: NaiveTime,
        calories: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            weekday,
            name: non_empty_name(name)?,
            time,
            calories,
            ingredients: Vec::new(),
        })
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    fn same_slot(&self, weekday: Weekday, name: &str, time: NaiveTime) -> bool {
        self.weekday == weekday && self.name == name && self.time == time
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub weekday: Weekday,
    pub name: String,
    pub duration_minutes: u32,
    pub calories: u32,
    pub completed: bool,
}

impl PlannedExercise {
    pub fn new(
        weekday: Weekday,
        name: &str,
        duration_minutes: u32,
        calories: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            weekday,
            name: non_empty_name(name)?,
            duration_minutes,
            calories,
            completed: false,
        })
    }
}

fn non_empty_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::invalid("name", "must not be empty"));
    }
    Ok(name.to_string())
}

/// Intake and exercise totals for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub weekday: Weekday,
    pub meals: u32,
    pub intake_kcal: u32,
    pub target_kcal: u32,
    /// Truncated share of the target; 0 when the target is 0.
    pub intake_pct: u32,
    pub exercises_planned: u32,
    pub exercises_done: u32,
    /// Calories of completed exercises only.
    pub burned_kcal: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub days: Vec<DaySummary>,
    pub total_intake_kcal: u32,
    pub total_burned_kcal: u32,
    /// Mean intake over days that have at least one meal.
    pub average_intake_kcal: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    meals: Vec<Meal>,
    exercises: Vec<PlannedExercise>,
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(meals: Vec<Meal>, exercises: Vec<PlannedExercise>) -> Self {
        let mut plan = Self::new();
        for meal in meals {
            plan.upsert_meal(meal);
        }
        for exercise in exercises {
            plan.upsert_exercise(exercise);
        }
        plan
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn exercises(&self) -> &[PlannedExercise] {
        &self.exercises
    }

    /// Insert a meal or replace the one in the same slot.
    ///
    /// Returns `true` if an existing meal was replaced.
    pub fn upsert_meal(&mut self, meal: Meal) -> bool {
        match self
            .meals
            .iter_mut()
            .find(|m| m.same_slot(meal.weekday, &meal.name, meal.time))
        {
            Some(existing) => {
                *existing = meal;
                true
            }
            None => {
                self.meals.push(meal);
                false
            }
        }
    }

    pub fn remove_meal(&mut self, weekday: Weekday, name: &str, time: NaiveTime) -> Option<Meal> {
        let pos = self
            .meals
            .iter()
            .position(|m| m.same_slot(weekday, name, time))?;
        Some(self.meals.remove(pos))
    }

    /// Insert a planned exercise or replace the one with the same day and name.
    ///
    /// Returns `true` if an existing entry was replaced.
    pub fn upsert_exercise(&mut self, exercise: PlannedExercise) -> bool {
        match self
            .exercises
            .iter_mut()
            .find(|e| e.weekday == exercise.weekday && e.name == exercise.name)
        {
            Some(existing) => {
                *existing = exercise;
                true
            }
            None => {
                self.exercises.push(exercise);
                false
            }
        }
    }

    pub fn set_exercise_completed(
        &mut self,
        weekday: Weekday,
        name: &str,
        completed: bool,
    ) -> Result<&PlannedExercise, ValidationError> {
        let exercise = self
            .exercises
            .iter_mut()
            .find(|e| e.weekday == weekday && e.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ValidationError::NotFound {
                kind: "planned exercise",
                name: format!("{name} on {weekday}"),
            })?;
        exercise.completed = completed;
        Ok(&*exercise)
    }

    /// Meals of one weekday, earliest first.
    pub fn meals_on(&self, weekday: Weekday) -> Vec<&Meal> {
        let mut meals: Vec<&Meal> = self.meals.iter().filter(|m| m.weekday == weekday).collect();
        meals.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.name.cmp(&b.name)));
        meals
    }

    pub fn exercises_on(&self, weekday: Weekday) -> Vec<&PlannedExercise> {
        self.exercises
            .iter()
            .filter(|e| e.weekday == weekday)
            .collect()
    }

    pub fn day_summary(&self, weekday: Weekday, target_kcal: u32) -> DaySummary {
        let meals = self.meals_on(weekday);
        let intake_kcal = meals
            .iter()
            .fold(0u32, |sum, m| sum.saturating_add(m.calories));
        let exercises = self.exercises_on(weekday);
        let done: Vec<&&PlannedExercise> = exercises.iter().filter(|e| e.completed).collect();
        let burned_kcal = done
            .iter()
            .fold(0u32, |sum, e| sum.saturating_add(e.calories));

        let intake_pct = if target_kcal == 0 {
            0
        } else {
            let pct = u64::from(intake_kcal) * 100 / u64::from(target_kcal);
            u32::try_from(pct).unwrap_or(u32::MAX)
        };

        DaySummary {
            weekday,
            meals: meals.len() as u32,
            intake_kcal,
            target_kcal,
            intake_pct,
            exercises_planned: exercises.len() as u32,
            exercises_done: done.len() as u32,
            burned_kcal,
        }
    }

    pub fn week_summary(&self, target_kcal: u32) -> WeekSummary {
        let days: Vec<DaySummary> = WEEK
            .iter()
            .map(|day| self.day_summary(*day, target_kcal))
            .collect();
        let total_intake_kcal = days
            .iter()
            .fold(0u32, |sum, d| sum.saturating_add(d.intake_kcal));
        let total_burned_kcal = days
            .iter()
            .fold(0u32, |sum, d| sum.saturating_add(d.burned_kcal));
        let planned_days = days.iter().filter(|d| d.meals > 0).count() as u32;
        let average_intake_kcal = if planned_days == 0 {
            0
        } else {
            total_intake_kcal / planned_days
        };

        WeekSummary {
            days,
            total_intake_kcal,
            total_burned_kcal,
            average_intake_kcal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn monday_plan() -> MealPlan {
        let mut plan = MealPlan::new();
        plan.upsert_meal(Meal::new(Weekday::Mon, "Dinner", at(19, 30), 450).unwrap());
        plan.upsert_meal(
            Meal::new(Weekday::Mon, "Breakfast", at(7, 30), 380)
                .unwrap()
                .with_ingredients(vec!["Muesli=60g".parse().unwrap()]),
        );
        plan.upsert_meal(Meal::new(Weekday::Mon, "Lunch", at(12, 30), 520).unwrap());
        plan.upsert_exercise(PlannedExercise::new(Weekday::Mon, "Running", 30, 300).unwrap());
        plan.upsert_exercise(PlannedExercise::new(Weekday::Mon, "Stretching", 10, 50).unwrap());
        plan
    }

    #[test]
    fn weekday_numbers_are_monday_based() {
        assert_eq!(weekday_from_number(1), Some(Weekday::Mon));
        assert_eq!(weekday_from_number(7), Some(Weekday::Sun));
        assert_eq!(weekday_from_number(0), None);
        assert_eq!(weekday_from_number(8), None);
        for day in WEEK {
            assert_eq!(weekday_from_number(day.number_from_monday()), Some(day));
        }
    }

    #[test]
    fn ingredient_parses_name_and_quantity() {
        let ingredient: Ingredient = " Skim milk = 200ml ".parse().unwrap();
        assert_eq!(ingredient.name, "Skim milk");
        assert_eq!(ingredient.quantity, "200ml");
        assert!("no separator".parse::<Ingredient>().is_err());
        assert!("=60g".parse::<Ingredient>().is_err());
    }

    #[test]
    fn meals_on_sorts_by_time() {
        let plan = monday_plan();
        let names: Vec<&str> = plan
            .meals_on(Weekday::Mon)
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Breakfast", "Lunch", "Dinner"]);
        assert!(plan.meals_on(Weekday::Tue).is_empty());
    }

    #[test]
    fn upsert_replaces_same_slot() {
        let mut plan = monday_plan();
        let replaced = plan.upsert_meal(Meal::new(Weekday::Mon, "Lunch", at(12, 30), 600).unwrap());
        assert!(replaced);
        assert_eq!(plan.meals().len(), 3);

        // Same name at another time is a separate meal.
        assert!(!plan.upsert_meal(Meal::new(Weekday::Mon, "Lunch", at(13, 0), 100).unwrap()));
        assert_eq!(plan.meals().len(), 4);

        assert!(plan.remove_meal(Weekday::Mon, "Lunch", at(13, 0)).is_some());
        assert!(plan.remove_meal(Weekday::Mon, "Lunch", at(13, 0)).is_none());
    }

    #[test]
    fn day_summary_counts_only_completed_exercise_burn() {
        let mut plan = monday_plan();
        let summary = plan.day_summary(Weekday::Mon, DEFAULT_DAILY_CALORIE_TARGET);
        assert_eq!(summary.meals, 3);
        assert_eq!(summary.intake_kcal, 1350);
        assert_eq!(summary.intake_pct, 61);
        assert_eq!(summary.exercises_planned, 2);
        assert_eq!(summary.burned_kcal, 0);

        plan.set_exercise_completed(Weekday::Mon, "running", true).unwrap();
        let summary = plan.day_summary(Weekday::Mon, DEFAULT_DAILY_CALORIE_TARGET);
        assert_eq!(summary.exercises_done, 1);
        assert_eq!(summary.burned_kcal, 300);

        assert!(plan.set_exercise_completed(Weekday::Tue, "Running", true).is_err());
    }

    #[test]
    fn zero_target_does_not_divide() {
        let plan = monday_plan();
        assert_eq!(plan.day_summary(Weekday::Mon, 0).intake_pct, 0);
    }

    #[test]
    fn week_summary_averages_planned_days() {
        let mut plan = monday_plan();
        plan.upsert_meal(Meal::new(Weekday::Wed, "Lunch", at(12, 30), 550).unwrap());
        let week = plan.week_summary(2200);
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days[0].weekday, Weekday::Mon);
        assert_eq!(week.total_intake_kcal, 1900);
        assert_eq!(week.average_intake_kcal, 950);
        assert_eq!(MealPlan::new().week_summary(2200).average_intake_kcal, 0);
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(Meal::new(Weekday::Mon, " ", at(8, 0), 100).is_err());
        assert!(PlannedExercise::new(Weekday::Mon, "", 10, 50).is_err());
    }
}
