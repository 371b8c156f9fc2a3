//! Workout commands for CLI.

use clap::Subcommand;
use fittrack_core::workout::find_exercise;
use fittrack_core::{Database, GoalArea, UserStatsStore, WorkoutSession, EXERCISES};

use super::Context;

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// List the built-in exercises
    List {
        #[arg(long)]
        json: bool,
    },
    /// Log a completed workout and update lifetime stats and goals
    Log {
        /// Exercise name (built-in or custom)
        exercise: String,
        /// Number of sets (default: the exercise's default, or 3)
        #[arg(long)]
        sets: Option<u32>,
        /// Seconds per set (default: the exercise's default, or 30)
        #[arg(long)]
        seconds: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Show lifetime workout stats and goal progress
    Stats {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: WorkoutAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WorkoutAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(EXERCISES)?);
            } else {
                for e in EXERCISES {
                    println!(
                        "{:<10} {:>2} kcal/min  {} x {}s  {}",
                        e.name, e.calories_per_minute, e.default_sets, e.default_set_secs, e.description
                    );
                }
            }
        }
        WorkoutAction::Log {
            exercise,
            sets,
            seconds,
            json,
        } => {
            let mut session = match (find_exercise(&exercise), sets, seconds) {
                (Some(known), None, None) => WorkoutSession::from_catalogue(known),
                (known, sets, seconds) => {
                    let sets = sets.or(known.map(|e| e.default_sets)).unwrap_or(3);
                    let seconds = seconds.or(known.map(|e| e.default_set_secs)).unwrap_or(30);
                    WorkoutSession::new(&exercise, sets, seconds)?
                }
            };
            let (finished_sets, summary) = session.run_to_completion();

            let db = Database::open()?;
            let mut stats = db.load_stats(ctx.user_id)?;
            let mut goals = db.load_goals(ctx.user_id)?;
            stats.record(&summary);
            let bumped = goals.record(&summary.exercise);
            db.save_stats(ctx.user_id, &stats)?;
            db.save_goals(ctx.user_id, &goals)?;
            tracing::info!(
                user_id = ctx.user_id,
                exercise = %summary.exercise,
                calories = summary.calories,
                "logged workout"
            );

            if json {
                let value = serde_json::json!({
                    "sets": finished_sets,
                    "summary": summary,
                    "stats": stats,
                    "goals": goals,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                for set in &finished_sets {
                    println!(
                        "Set {}/{}: {}s, {} kcal",
                        set.set,
                        session.total_sets(),
                        set.seconds,
                        set.calories
                    );
                }
                println!(
                    "Workout complete: {} ({} min, {} kcal)",
                    summary.exercise, summary.minutes, summary.calories
                );
                for area in bumped {
                    println!("  {}: {}%", area.key(), goals.get(area));
                }
            }
        }
        WorkoutAction::Stats { json } => {
            let db = Database::open()?;
            let stats = db.load_stats(ctx.user_id)?;
            let goals = db.load_goals(ctx.user_id)?;
            if json {
                let value = serde_json::json!({ "stats": stats, "goals": goals });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Workout sessions:  {}", stats.workout_sessions);
                println!("Exercises done:    {}", stats.exercises_done);
                println!("Calories burned:   {}", stats.calories_burned);
                println!("Activity minutes:  {}", stats.activity_minutes);
                for area in GoalArea::ALL {
                    println!("Goal {:<12} {}%", area.key(), goals.get(area));
                }
            }
        }
    }
    Ok(())
}
