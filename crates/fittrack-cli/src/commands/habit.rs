//! Habit tracker commands for CLI.

use chrono::{Datelike, NaiveDate};
use clap::Subcommand;
use fittrack_core::adherence::{self, DayTier, ProgressTier};
use fittrack_core::{Database, Habit, HabitId, HabitTracker};
use serde::Serialize;

use super::{parse_date, parse_month, Context};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits with their current streaks
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// Target streak in days (default: habits.default_goal_days)
        #[arg(long)]
        goal: Option<i64>,
    },
    /// Mark a habit done for a day
    Done {
        /// Habit ID
        id: i64,
        /// Day to mark (default: today)
        #[arg(long, value_parser = parse_date)]
        on: Option<NaiveDate>,
    },
    /// Clear a habit's completion for a day
    Undo {
        /// Habit ID
        id: i64,
        /// Day to clear (default: today)
        #[arg(long, value_parser = parse_date)]
        on: Option<NaiveDate>,
    },
    /// Delete a habit and its history
    Remove {
        /// Habit ID
        id: i64,
    },
    /// Completion rate, longest streak and perfect days
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Completion and streak of every habit as of a given day
    Day {
        /// Day to inspect (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long)]
        json: bool,
    },
    /// Per-day completion counts for a month
    Calendar {
        /// Month as YYYY-MM (default: current month)
        #[arg(long, value_parser = parse_month)]
        month: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct HabitView<'a> {
    id: HabitId,
    name: &'a str,
    goal_days: i64,
    current_streak: u32,
    completed_today: bool,
    progress: f64,
    tier: ProgressTier,
}

impl<'a> From<&'a Habit> for HabitView<'a> {
    fn from(habit: &'a Habit) -> Self {
        let progress = adherence::goal_progress(habit);
        Self {
            id: habit.id,
            name: &habit.name,
            goal_days: habit.goal_days,
            current_streak: habit.current_streak,
            completed_today: habit.completed_today,
            progress: progress.ratio,
            tier: progress.tier,
        }
    }
}

#[derive(Serialize)]
struct HabitDayView<'a> {
    id: HabitId,
    name: &'a str,
    done: bool,
    streak: u32,
}

#[derive(Serialize)]
struct CalendarDay {
    date: NaiveDate,
    completed: u32,
    total: u32,
    tier: DayTier,
    perfect: bool,
}

fn tier_label(tier: ProgressTier) -> &'static str {
    match tier {
        ProgressTier::Reached => "goal reached",
        ProgressTier::Good => "good",
        ProgressTier::Fair => "fair",
        ProgressTier::Low => "low",
    }
}

pub fn run(action: HabitAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut tracker = HabitTracker::open(db, ctx.user_id, &ctx.config.habits.seed())?;

    match action {
        HabitAction::List { json } => {
            tracker.refresh(ctx.today);
            let views: Vec<HabitView> = tracker.habits().iter().map(HabitView::from).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else if views.is_empty() {
                println!("No habits yet. Add one with `habit add <name>`.");
            } else {
                for v in &views {
                    let mark = if v.completed_today { "x" } else { " " };
                    println!(
                        "[{mark}] {:>3}  {:<24} {}/{} days ({})",
                        v.id.0,
                        v.name,
                        v.current_streak,
                        v.goal_days,
                        tier_label(v.tier)
                    );
                }
            }
        }
        HabitAction::Add { name, goal } => {
            let goal = goal.unwrap_or(ctx.config.habits.default_goal_days);
            let id = tracker.add_habit(&name, goal)?;
            println!("Habit added: {} (id {id}, goal {goal} days)", name.trim());
        }
        HabitAction::Done { id, on } => {
            let day = on.unwrap_or(ctx.today);
            if tracker.set_completion(HabitId(id), day, true)? {
                println!("Marked habit {id} done on {day}");
            } else {
                println!("Habit {id} was already done on {day}");
            }
        }
        HabitAction::Undo { id, on } => {
            let day = on.unwrap_or(ctx.today);
            if tracker.set_completion(HabitId(id), day, false)? {
                println!("Cleared habit {id} on {day}");
            } else {
                println!("Habit {id} was not done on {day}");
            }
        }
        HabitAction::Remove { id } => {
            let removed = tracker.remove_habit(HabitId(id))?;
            println!("Habit removed: {} (id {id})", removed.name);
        }
        HabitAction::Stats { json } => {
            let summary = tracker.summary(ctx.today);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Total habits:     {}", summary.total_habits);
                println!("Done today:       {}", summary.completed_today);
                println!("Completion rate:  {}%", summary.completion_rate);
                println!("Longest streak:   {} days", summary.longest_streak);
                println!("Perfect days:     {}", summary.perfect_days);
            }
        }
        HabitAction::Day { date, json } => {
            let views: Vec<HabitDayView> = tracker
                .habits()
                .iter()
                .map(|habit| HabitDayView {
                    id: habit.id,
                    name: &habit.name,
                    done: habit.is_completed_on(date),
                    streak: adherence::streak_ending_at(habit, date),
                })
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                println!("{}", date.format("%A %Y-%m-%d"));
                for v in &views {
                    let mark = if v.done { "x" } else { " " };
                    println!("[{mark}] {:>3}  {:<24} streak {}", v.id.0, v.name, v.streak);
                }
            }
        }
        HabitAction::Calendar { month, json } => {
            let first = month.unwrap_or_else(|| ctx.today.with_day(1).unwrap_or(ctx.today));
            let days: Vec<CalendarDay> = adherence::daily_completion(tracker.habits())
                .into_iter()
                .filter(|(date, _)| date.year() == first.year() && date.month() == first.month())
                .map(|(date, day)| CalendarDay {
                    date,
                    completed: day.completed,
                    total: day.total,
                    tier: day.tier(),
                    perfect: day.is_perfect(),
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&days)?);
            } else if days.is_empty() {
                println!("No completions in {}", first.format("%B %Y"));
            } else {
                println!("{}", first.format("%B %Y"));
                for day in &days {
                    let star = if day.perfect { " *" } else { "" };
                    println!("  {}  {}/{}{star}", day.date, day.completed, day.total);
                }
            }
        }
    }
    Ok(())
}
