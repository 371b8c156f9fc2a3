//! Streak and adherence analytics over a habit collection.
//!
//! Every function here is a pure computation over a snapshot of habits and an
//! explicit `today`. Nothing reads the system clock and nothing recomputes on
//! mutation: after [`toggle_completion`] the caller re-runs
//! [`recalculate_streaks`] (or [`summarize`]) itself.
//!
//! - **Current streak**: consecutive completed days ending today, or ending
//!   yesterday when today is not yet marked (the grace day)
//! - **Weekly completion rate**: completed habit-day slots in `today-6..=today`
//! - **Perfect day**: a date on which every habit was completed

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::Habit;

/// Length of the trailing completion-rate window, in days.
pub const WEEK_WINDOW_DAYS: u64 = 7;

/// Count consecutive dates in `dates` ending exactly at `end`, walking back.
fn run_ending_at(dates: &BTreeSet<NaiveDate>, end: NaiveDate) -> u32 {
    let mut count = 0u32;
    let mut cursor = Some(end);
    while let Some(day) = cursor {
        if !dates.contains(&day) {
            break;
        }
        count = count.saturating_add(1);
        cursor = day.pred_opt();
    }
    count
}

/// Current streak of a single habit as of `today`, including the grace day.
pub fn current_streak(habit: &Habit, today: NaiveDate) -> u32 {
    if habit.is_completed_on(today) {
        run_ending_at(&habit.completed_dates, today)
    } else {
        today
            .pred_opt()
            .map_or(0, |yesterday| run_ending_at(&habit.completed_dates, yesterday))
    }
}

/// Length of the run of completions ending exactly at `date`.
///
/// No grace day: returns 0 when `date` itself is not completed. Used for the
/// streak shown next to an arbitrary selected calendar date.
pub fn streak_ending_at(habit: &Habit, date: NaiveDate) -> u32 {
    run_ending_at(&habit.completed_dates, date)
}

/// Refresh `current_streak` and `completed_today` on every habit.
///
/// Touches nothing else. Calling it twice with the same `today` is a no-op the
/// second time.
pub fn recalculate_streaks(habits: &mut [Habit], today: NaiveDate) {
    for habit in habits.iter_mut() {
        habit.completed_today = habit.is_completed_on(today);
        habit.current_streak = current_streak(habit, today);
    }
}

/// Percentage (0-100, truncated) of habit-day slots completed in the seven
/// days ending at `today` inclusive. Returns 0 for an empty collection.
pub fn weekly_completion_rate(habits: &[Habit], today: NaiveDate) -> u32 {
    if habits.is_empty() {
        return 0;
    }

    let window: Vec<NaiveDate> = (0..WEEK_WINDOW_DAYS)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect();

    let total_possible = habits.len() as u64 * WEEK_WINDOW_DAYS;
    let total_completed: u64 = habits
        .iter()
        .map(|habit| window.iter().filter(|d| habit.is_completed_on(**d)).count() as u64)
        .sum();

    (total_completed * 100 / total_possible) as u32
}

/// Highest `current_streak` in the collection, 0 when empty.
///
/// Reads the cached streaks, so run [`recalculate_streaks`] first.
pub fn longest_streak(habits: &[Habit]) -> u32 {
    habits.iter().map(|h| h.current_streak).max().unwrap_or(0)
}

/// Number of dates on which every habit in the collection was completed.
///
/// Candidate dates come from the union of all completion sets, so an empty
/// collection has no candidates and yields 0.
pub fn perfect_days(habits: &[Habit]) -> u32 {
    let all_dates: BTreeSet<NaiveDate> = habits
        .iter()
        .flat_map(|h| h.completed_dates.iter().copied())
        .collect();

    all_dates
        .into_iter()
        .filter(|date| habits.iter().all(|h| h.is_completed_on(*date)))
        .count() as u32
}

/// Mark `date` done or not done for one habit.
///
/// Returns `true` if the completion set changed. Derived fields are not
/// refreshed.
pub fn toggle_completion(habit: &mut Habit, date: NaiveDate, mark_done: bool) -> bool {
    if mark_done {
        habit.completed_dates.insert(date)
    } else {
        habit.completed_dates.remove(&date)
    }
}

/// How far a habit's current streak has come toward its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    /// Streak met or exceeded the goal
    Reached,
    /// At least 70% of the goal
    Good,
    /// At least 30% of the goal
    Fair,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// `current_streak / goal_days`, clamped to 0.0..=1.0
    pub ratio: f64,
    pub tier: ProgressTier,
}

/// Progress of the cached `current_streak` toward `goal_days`.
///
/// A goal of zero or less counts any positive streak as reached and never
/// divides by the goal.
pub fn goal_progress(habit: &Habit) -> GoalProgress {
    let streak = i64::from(habit.current_streak);
    let goal = habit.goal_days;

    if goal <= 0 {
        return if streak > 0 {
            GoalProgress { ratio: 1.0, tier: ProgressTier::Reached }
        } else {
            GoalProgress { ratio: 0.0, tier: ProgressTier::Low }
        };
    }

    // Integer percentages keep the tier thresholds exact.
    let tier = if streak >= goal {
        ProgressTier::Reached
    } else if streak * 10 >= goal * 7 {
        ProgressTier::Good
    } else if streak * 10 >= goal * 3 {
        ProgressTier::Fair
    } else {
        ProgressTier::Low
    };

    GoalProgress {
        ratio: (streak as f64 / goal as f64).clamp(0.0, 1.0),
        tier,
    }
}

/// Calendar heat bucket for a day, by share of habits completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayTier {
    /// 90% or more
    Almost,
    /// 70% or more
    Most,
    /// 50% or more
    Half,
    Few,
}

/// Completion count for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCompletion {
    pub completed: u32,
    pub total: u32,
}

impl DayCompletion {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }

    pub fn tier(&self) -> DayTier {
        let ratio = self.ratio();
        if ratio >= 0.9 {
            DayTier::Almost
        } else if ratio >= 0.7 {
            DayTier::Most
        } else if ratio >= 0.5 {
            DayTier::Half
        } else {
            DayTier::Few
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Per-date completion counts across the collection.
///
/// Only dates with at least one completion appear.
pub fn daily_completion(habits: &[Habit]) -> BTreeMap<NaiveDate, DayCompletion> {
    let total = habits.len() as u32;
    let mut days: BTreeMap<NaiveDate, DayCompletion> = BTreeMap::new();
    for habit in habits {
        for date in &habit.completed_dates {
            days.entry(*date)
                .or_insert(DayCompletion { completed: 0, total })
                .completed += 1;
        }
    }
    days
}

/// Aggregate statistics for one snapshot of the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdherenceSummary {
    pub total_habits: u32,
    /// Trailing seven-day completion percentage
    pub completion_rate: u32,
    pub longest_streak: u32,
    pub perfect_days: u32,
    /// Habits already marked done today
    pub completed_today: u32,
}

/// Recalculate streaks, then compute every aggregate from that same snapshot.
pub fn summarize(habits: &mut [Habit], today: NaiveDate) -> AdherenceSummary {
    recalculate_streaks(habits, today);
    let snapshot: &[Habit] = habits;
    AdherenceSummary {
        total_habits: snapshot.len() as u32,
        completion_rate: weekly_completion_rate(snapshot, today),
        longest_streak: longest_streak(snapshot),
        perfect_days: perfect_days(snapshot),
        completed_today: snapshot.iter().filter(|h| h.completed_today).count() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::HabitId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit_with(id: i64, dates: &[NaiveDate]) -> Habit {
        Habit::from_parts(
            HabitId(id),
            format!("Habit {id}"),
            30,
            dates.iter().copied().collect(),
        )
    }

    fn days_back(today: NaiveDate, from: u64, to: u64) -> Vec<NaiveDate> {
        (from..=to).map(|n| today - Days::new(n)).collect()
    }

    #[test]
    fn empty_completion_set_has_no_streak() {
        let mut habits = vec![habit_with(1, &[])];
        recalculate_streaks(&mut habits, date(2024, 3, 10));
        assert_eq!(habits[0].current_streak, 0);
        assert!(!habits[0].completed_today);
    }

    #[test]
    fn streak_counts_contiguous_run_ending_today() {
        let today = date(2024, 3, 10);
        let mut habits = vec![habit_with(1, &days_back(today, 0, 4))];
        recalculate_streaks(&mut habits, today);
        assert_eq!(habits[0].current_streak, 5);
        assert!(habits[0].completed_today);
    }

    #[test]
    fn grace_day_keeps_streak_through_yesterday() {
        let today = date(2024, 3, 10);
        let mut habits = vec![habit_with(1, &days_back(today, 1, 30))];
        recalculate_streaks(&mut habits, today);
        assert!(!habits[0].completed_today);
        assert_eq!(habits[0].current_streak, 30);
    }

    #[test]
    fn streak_is_zero_when_both_today_and_yesterday_missed() {
        let today = date(2024, 3, 10);
        let mut habits = vec![habit_with(1, &days_back(today, 2, 10))];
        recalculate_streaks(&mut habits, today);
        assert_eq!(habits[0].current_streak, 0);
    }

    #[test]
    fn streak_stops_at_first_gap() {
        let today = date(2024, 3, 10);
        let mut dates = days_back(today, 0, 2);
        dates.extend(days_back(today, 4, 9));
        let mut habits = vec![habit_with(1, &dates)];
        recalculate_streaks(&mut habits, today);
        assert_eq!(habits[0].current_streak, 3);
    }

    #[test]
    fn future_completions_are_ignored() {
        let today = date(2024, 3, 10);
        let mut habits = vec![habit_with(1, &[date(2024, 3, 11), date(2024, 3, 12)])];
        recalculate_streaks(&mut habits, today);
        assert_eq!(habits[0].current_streak, 0);
    }

    #[test]
    fn goal_does_not_cap_streak() {
        let today = date(2024, 3, 10);
        let mut habit = habit_with(1, &days_back(today, 0, 44));
        habit.goal_days = 10;
        let mut habits = vec![habit];
        recalculate_streaks(&mut habits, today);
        assert_eq!(habits[0].current_streak, 45);
        assert_eq!(habits[0].goal_days, 10);
    }

    #[test]
    fn streak_crosses_month_and_year_boundaries() {
        let today = date(2024, 1, 2);
        let dates = [date(2023, 12, 30), date(2023, 12, 31), date(2024, 1, 1), date(2024, 1, 2)];
        let mut habits = vec![habit_with(1, &dates)];
        recalculate_streaks(&mut habits, today);
        assert_eq!(habits[0].current_streak, 4);
    }

    #[test]
    fn streak_ending_at_has_no_grace_day() {
        let today = date(2024, 3, 10);
        let habit = habit_with(1, &days_back(today, 1, 5));
        assert_eq!(streak_ending_at(&habit, today), 0);
        assert_eq!(streak_ending_at(&habit, date(2024, 3, 9)), 5);
        assert_eq!(streak_ending_at(&habit, date(2024, 3, 7)), 3);
    }

    #[test]
    fn weekly_rate_half_completed() {
        let today = date(2024, 1, 7);
        let a = habit_with(1, &days_back(today, 0, 6));
        let b = habit_with(2, &[]);
        assert_eq!(weekly_completion_rate(&[a, b], today), 50);
    }

    #[test]
    fn weekly_rate_truncates() {
        // 2 of 21 slots = 9.52%
        let today = date(2024, 1, 7);
        let habits = vec![
            habit_with(1, &[today, date(2024, 1, 1)]),
            habit_with(2, &[]),
            habit_with(3, &[]),
        ];
        assert_eq!(weekly_completion_rate(&habits, today), 9);
    }

    #[test]
    fn weekly_rate_ignores_dates_outside_window() {
        let today = date(2024, 1, 7);
        let habits = vec![habit_with(1, &[date(2023, 12, 31), date(2024, 1, 8)])];
        assert_eq!(weekly_completion_rate(&habits, today), 0);
    }

    #[test]
    fn weekly_rate_empty_collection_is_zero() {
        assert_eq!(weekly_completion_rate(&[], date(2024, 1, 7)), 0);
    }

    #[test]
    fn longest_streak_takes_maximum() {
        assert_eq!(longest_streak(&[]), 0);
        let habits: Vec<Habit> = [0, 3, 7, 2]
            .iter()
            .enumerate()
            .map(|(i, streak)| {
                let mut h = habit_with(i as i64 + 1, &[]);
                h.current_streak = *streak;
                h
            })
            .collect();
        assert_eq!(longest_streak(&habits), 7);
    }

    #[test]
    fn perfect_days_require_every_habit() {
        let a = habit_with(1, &[date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
        let b = habit_with(2, &[date(2024, 1, 1), date(2024, 1, 2)]);
        assert_eq!(perfect_days(&[a, b]), 2);
    }

    #[test]
    fn perfect_days_empty_collection_is_zero() {
        assert_eq!(perfect_days(&[]), 0);
    }

    #[test]
    fn perfect_days_single_habit_counts_every_completion() {
        let a = habit_with(1, &[date(2024, 1, 1), date(2024, 1, 5)]);
        assert_eq!(perfect_days(&[a]), 2);
    }

    #[test]
    fn toggle_reports_changes_only() {
        let mut habit = habit_with(1, &[]);
        let d = date(2024, 2, 29);
        assert!(toggle_completion(&mut habit, d, true));
        assert!(!toggle_completion(&mut habit, d, true));
        assert!(toggle_completion(&mut habit, d, false));
        assert!(!toggle_completion(&mut habit, d, false));
        assert!(habit.completed_dates.is_empty());
    }

    #[test]
    fn toggle_does_not_recompute_streak() {
        let today = date(2024, 3, 10);
        let mut habit = habit_with(1, &[]);
        toggle_completion(&mut habit, today, true);
        assert_eq!(habit.current_streak, 0);
        assert!(!habit.completed_today);
    }

    #[test]
    fn goal_progress_tiers() {
        let mut habit = habit_with(1, &[]);
        habit.goal_days = 10;
        for (streak, tier) in [
            (0, ProgressTier::Low),
            (2, ProgressTier::Low),
            (3, ProgressTier::Fair),
            (7, ProgressTier::Good),
            (10, ProgressTier::Reached),
            (25, ProgressTier::Reached),
        ] {
            habit.current_streak = streak;
            assert_eq!(goal_progress(&habit).tier, tier, "streak {streak}");
        }
        habit.current_streak = 25;
        assert_eq!(goal_progress(&habit).ratio, 1.0);
        habit.current_streak = 5;
        assert_eq!(goal_progress(&habit).ratio, 0.5);
    }

    #[test]
    fn goal_progress_tolerates_non_positive_goal() {
        let mut habit = habit_with(1, &[]);
        habit.goal_days = 0;
        assert_eq!(goal_progress(&habit).tier, ProgressTier::Low);
        assert_eq!(goal_progress(&habit).ratio, 0.0);
        habit.current_streak = 1;
        habit.goal_days = -4;
        assert_eq!(goal_progress(&habit).tier, ProgressTier::Reached);
        assert_eq!(goal_progress(&habit).ratio, 1.0);
    }

    #[test]
    fn daily_completion_counts_and_tiers() {
        let d1 = date(2024, 1, 1);
        let d2 = date(2024, 1, 2);
        let habits = vec![
            habit_with(1, &[d1, d2]),
            habit_with(2, &[d1]),
            habit_with(3, &[d1]),
            habit_with(4, &[]),
        ];
        let days = daily_completion(&habits);
        assert_eq!(days.len(), 2);
        assert_eq!(days[&d1], DayCompletion { completed: 3, total: 4 });
        assert_eq!(days[&d1].tier(), DayTier::Most);
        assert_eq!(days[&d2].tier(), DayTier::Few);
        assert!(!days[&d1].is_perfect());
    }

    #[test]
    fn summarize_uses_one_snapshot() {
        let today = date(2024, 1, 7);
        let mut habits = vec![
            habit_with(1, &days_back(today, 0, 6)),
            habit_with(2, &days_back(today, 1, 2)),
        ];
        let summary = summarize(&mut habits, today);
        assert_eq!(
            summary,
            AdherenceSummary {
                total_habits: 2,
                completion_rate: 64,
                longest_streak: 7,
                perfect_days: 2,
                completed_today: 1,
            }
        );
        assert_eq!(habits[1].current_streak, 2);
    }

    #[test]
    fn summarize_empty_collection() {
        let mut habits: Vec<Habit> = Vec::new();
        assert_eq!(summarize(&mut habits, date(2024, 1, 7)), AdherenceSummary::default());
    }
}
