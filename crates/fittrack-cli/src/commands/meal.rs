//! Weekly meal plan commands for CLI.

use chrono::{Datelike, NaiveTime, Weekday};
use clap::Subcommand;
use fittrack_core::{Database, DaySummary, Ingredient, Meal, MealPlanStore, PlannedExercise};
use serde::Serialize;

use super::{parse_time, parse_weekday, Context};

#[derive(Subcommand)]
pub enum MealAction {
    /// Show the plan for one weekday
    Show {
        /// Weekday (default: today's)
        #[arg(long, value_parser = parse_weekday)]
        day: Option<Weekday>,
        #[arg(long)]
        json: bool,
    },
    /// Add or update a meal
    Add {
        #[arg(value_parser = parse_weekday)]
        day: Weekday,
        name: String,
        /// Time as HH:MM
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
        #[arg(long)]
        calories: u32,
        /// Ingredient as NAME=QUANTITY (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
    },
    /// Remove a meal
    Remove {
        #[arg(value_parser = parse_weekday)]
        day: Weekday,
        name: String,
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
    },
    /// Plan an exercise for a weekday
    Exercise {
        #[arg(value_parser = parse_weekday)]
        day: Weekday,
        name: String,
        #[arg(long)]
        minutes: u32,
        #[arg(long)]
        calories: u32,
    },
    /// Mark a planned exercise done
    Done {
        #[arg(value_parser = parse_weekday)]
        day: Weekday,
        name: String,
        /// Clear the done mark instead
        #[arg(long)]
        undo: bool,
    },
    /// Calorie totals for the whole week
    Week {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct DayView<'a> {
    summary: DaySummary,
    meals: Vec<&'a Meal>,
    exercises: Vec<&'a PlannedExercise>,
}

fn print_summary(day: &DaySummary) {
    println!(
        "{}: {} / {} kcal ({}%), exercises {}/{} done, {} kcal burned",
        day.weekday,
        day.intake_kcal,
        day.target_kcal,
        day.intake_pct,
        day.exercises_done,
        day.exercises_planned,
        day.burned_kcal
    );
}

pub fn run(action: MealAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let target = ctx.config.meals.daily_calorie_target;

    match action {
        MealAction::Show { day, json } => {
            let day = day.unwrap_or_else(|| ctx.today.weekday());
            let plan = db.load_meal_plan(ctx.user_id)?;
            let view = DayView {
                summary: plan.day_summary(day, target),
                meals: plan.meals_on(day),
                exercises: plan.exercises_on(day),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_summary(&view.summary);
                for meal in &view.meals {
                    println!("  {}  {:<20} {} kcal", meal.time.format("%H:%M"), meal.name, meal.calories);
                    for ingredient in &meal.ingredients {
                        println!("         - {} {}", ingredient.name, ingredient.quantity);
                    }
                }
                for exercise in &view.exercises {
                    let mark = if exercise.completed { "x" } else { " " };
                    println!(
                        "  [{mark}] {:<20} {} min, {} kcal",
                        exercise.name, exercise.duration_minutes, exercise.calories
                    );
                }
            }
        }
        MealAction::Add {
            day,
            name,
            time,
            calories,
            ingredients,
        } => {
            let ingredients = ingredients
                .iter()
                .map(|s| s.parse::<Ingredient>())
                .collect::<Result<Vec<_>, _>>()?;
            let meal = Meal::new(day, &name, time, calories)?.with_ingredients(ingredients);
            db.save_meal(ctx.user_id, &meal)?;
            println!(
                "Meal saved: {} on {} at {} ({} kcal)",
                meal.name,
                day,
                time.format("%H:%M"),
                calories
            );
        }
        MealAction::Remove { day, name, time } => {
            if db.delete_meal(ctx.user_id, day, name.trim(), time)? {
                println!("Meal removed: {} on {day}", name.trim());
            } else {
                return Err(format!("no meal '{}' on {day} at {}", name.trim(), time.format("%H:%M")).into());
            }
        }
        MealAction::Exercise {
            day,
            name,
            minutes,
            calories,
        } => {
            let exercise = PlannedExercise::new(day, &name, minutes, calories)?;
            db.save_planned_exercise(ctx.user_id, &exercise)?;
            println!("Exercise planned: {} on {day}", exercise.name);
        }
        MealAction::Done { day, name, undo } => {
            let mut plan = db.load_meal_plan(ctx.user_id)?;
            let exercise = plan.set_exercise_completed(day, &name, !undo)?;
            db.save_planned_exercise(ctx.user_id, exercise)?;
            if undo {
                println!("Cleared {} on {day}", exercise.name);
            } else {
                println!("Marked {} done on {day}", exercise.name);
            }
        }
        MealAction::Week { json } => {
            let week = db.load_meal_plan(ctx.user_id)?.week_summary(target);
            if json {
                println!("{}", serde_json::to_string_pretty(&week)?);
            } else {
                for day in &week.days {
                    print_summary(day);
                }
                println!("Total intake:     {} kcal", week.total_intake_kcal);
                println!("Average per day:  {} kcal", week.average_intake_kcal);
                println!("Total burned:     {} kcal", week.total_burned_kcal);
            }
        }
    }
    Ok(())
}
