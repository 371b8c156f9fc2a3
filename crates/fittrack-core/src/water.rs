//! Daily water intake tracking.
//!
//! One [`WaterIntake`] record per user per calendar day: a goal in
//! milliliters and the amount consumed so far.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Daily goal used when none has been stored.
pub const DEFAULT_DAILY_GOAL_ML: u32 = 2000;

/// Preset serving sizes offered for one-tap logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlassSize {
    Small,
    Medium,
    Large,
}

impl GlassSize {
    pub fn milliliters(&self) -> u32 {
        match self {
            GlassSize::Small => 200,
            GlassSize::Medium => 300,
            GlassSize::Large => 500,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GlassSize::Small => "Small glass",
            GlassSize::Medium => "Medium glass",
            GlassSize::Large => "Large bottle",
        }
    }
}

impl FromStr for GlassSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(GlassSize::Small),
            "medium" => Ok(GlassSize::Medium),
            "large" => Ok(GlassSize::Large),
            other => Err(ValidationError::invalid(
                "glass",
                format!("expected small, medium or large, got '{other}'"),
            )),
        }
    }
}

/// Coarse hydration status derived from the percentage of the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationStatus {
    /// Below 25%
    Low,
    /// 25% to 49%
    OnTrack,
    /// 50% to 74%
    KeepGoing,
    /// 75% to 99%
    AlmostThere,
    GoalReached,
}

impl HydrationStatus {
    pub fn message(&self) -> &'static str {
        match self {
            HydrationStatus::Low => "Remember to drink more water!",
            HydrationStatus::OnTrack => "You're on the right track!",
            HydrationStatus::KeepGoing => "Keep it up!",
            HydrationStatus::AlmostThere => "Almost at your goal!",
            HydrationStatus::GoalReached => "Congratulations! Goal reached!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterIntake {
    pub date: NaiveDate,
    pub daily_goal_ml: u32,
    pub consumed_ml: u32,
}

impl WaterIntake {
    /// Empty record for `date` with the given goal.
    pub fn new(date: NaiveDate, daily_goal_ml: u32) -> Self {
        Self {
            date,
            daily_goal_ml,
            consumed_ml: 0,
        }
    }

    /// Add water. Zero is ignored and the total saturates.
    ///
    /// Returns `true` if the consumed amount changed.
    pub fn add(&mut self, ml: u32) -> bool {
        if ml == 0 {
            return false;
        }
        let before = self.consumed_ml;
        self.consumed_ml = self.consumed_ml.saturating_add(ml);
        self.consumed_ml != before
    }

    pub fn add_glass(&mut self, glass: GlassSize) -> bool {
        self.add(glass.milliliters())
    }

    pub fn set_goal(&mut self, ml: u32) -> Result<(), ValidationError> {
        if ml == 0 {
            return Err(ValidationError::invalid(
                "daily_goal_ml",
                "daily goal must be greater than zero",
            ));
        }
        self.daily_goal_ml = ml;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.consumed_ml = 0;
    }

    /// Consumed share of the goal as a truncated percentage. May exceed 100,
    /// and saturates at `u32::MAX`.
    pub fn percentage(&self) -> u32 {
        if self.daily_goal_ml == 0 {
            return 0;
        }
        let pct = u64::from(self.consumed_ml) * 100 / u64::from(self.daily_goal_ml);
        u32::try_from(pct).unwrap_or(u32::MAX)
    }

    pub fn remaining_ml(&self) -> u32 {
        self.daily_goal_ml.saturating_sub(self.consumed_ml)
    }

    pub fn status(&self) -> HydrationStatus {
        match self.percentage() {
            0..=24 => HydrationStatus::Low,
            25..=49 => HydrationStatus::OnTrack,
            50..=74 => HydrationStatus::KeepGoing,
            75..=99 => HydrationStatus::AlmostThere,
            _ => HydrationStatus::GoalReached,
        }
    }
}
