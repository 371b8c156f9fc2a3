//! Guided workout sessions and cumulative user statistics.
//!
//! A [`WorkoutSession`] is a set/rest countdown state machine. It never reads
//! the clock: the caller feeds elapsed seconds into [`WorkoutSession::tick`]
//! and gets an event back when a set or the whole workout finishes.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//! Running -> Completed   (last set ends, or finish())
//! Completed -> Running   (start() begins a fresh round)
//! ```
//!
//! Finished workouts are folded into [`UserStats`] and [`FitnessGoals`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Burn rate used for exercises missing from the catalogue.
pub const DEFAULT_CALORIES_PER_MINUTE: u32 = 6;

/// Upper bound of every goal progress value.
pub const GOAL_CAP: u8 = 100;

/// A catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub name: &'static str,
    pub description: &'static str,
    pub calories_per_minute: u32,
    pub default_set_secs: u32,
    pub default_sets: u32,
}

/// Built-in exercises, in carousel order.
pub const EXERCISES: &[Exercise] = &[
    Exercise {
        name: "Push Ups",
        description: "Great for chest, shoulders and triceps",
        calories_per_minute: 7,
        default_set_secs: 30,
        default_sets: 3,
    },
    Exercise {
        name: "Squats",
        description: "Works your quads, hamstrings and glutes",
        calories_per_minute: 8,
        default_set_secs: 45,
        default_sets: 3,
    },
    Exercise {
        name: "Plank",
        description: "Strengthens your core, back and shoulders",
        calories_per_minute: 5,
        default_set_secs: 60,
        default_sets: 3,
    },
    Exercise {
        name: "Burpees",
        description: "Full body exercise with high intensity",
        calories_per_minute: 10,
        default_set_secs: 30,
        default_sets: 3,
    },
];

/// Look up a catalogue exercise by name, ignoring case.
pub fn find_exercise(name: &str) -> Option<&'static Exercise> {
    let name = name.trim();
    EXERCISES.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

/// Calories for one set: `secs / 60 * rate`, truncated.
pub fn set_calories(secs: u32, calories_per_minute: u32) -> u32 {
    let kcal = u64::from(secs) * u64::from(calories_per_minute) / 60;
    u32::try_from(kcal).unwrap_or(u32::MAX)
}

/// Calories credited for a whole workout. Only whole minutes count.
pub fn workout_calories(active_secs: u32, calories_per_minute: u32) -> u32 {
    (active_secs / 60).saturating_mul(calories_per_minute)
}

// ── Goals ────────────────────────────────────────────────────────────

/// Fitness goal tracked as a 0-100 progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalArea {
    WeightLoss,
    Strength,
    Cardio,
}

impl GoalArea {
    pub const ALL: [GoalArea; 3] = [GoalArea::WeightLoss, GoalArea::Strength, GoalArea::Cardio];

    /// Stable storage key.
    pub fn key(&self) -> &'static str {
        match self {
            GoalArea::WeightLoss => "weight_loss",
            GoalArea::Strength => "strength",
            GoalArea::Cardio => "cardio",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|area| area.key() == key)
    }

    /// Progress added per finished workout that trains this area.
    pub fn increment(&self) -> u8 {
        match self {
            GoalArea::WeightLoss => 5,
            GoalArea::Strength => 10,
            GoalArea::Cardio => 15,
        }
    }

    /// The area an exercise trains besides weight loss, matched on its name.
    pub fn for_exercise(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name.contains("push") || name.contains("plank") {
            Some(GoalArea::Strength)
        } else if name.contains("squat") || name.contains("burpee") {
            Some(GoalArea::Cardio)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessGoals {
    pub weight_loss: u8,
    pub strength: u8,
    pub cardio: u8,
}

impl FitnessGoals {
    pub fn get(&self, area: GoalArea) -> u8 {
        match area {
            GoalArea::WeightLoss => self.weight_loss,
            GoalArea::Strength => self.strength,
            GoalArea::Cardio => self.cardio,
        }
    }

    /// Set a progress value, clamped to [`GOAL_CAP`].
    pub fn set(&mut self, area: GoalArea, progress: u8) {
        let progress = progress.min(GOAL_CAP);
        match area {
            GoalArea::WeightLoss => self.weight_loss = progress,
            GoalArea::Strength => self.strength = progress,
            GoalArea::Cardio => self.cardio = progress,
        }
    }

    /// Bump the goals trained by `exercise`. Weight loss always moves.
    ///
    /// Returns the areas that were bumped.
    pub fn record(&mut self, exercise: &str) -> Vec<GoalArea> {
        let mut bumped: Vec<GoalArea> = GoalArea::for_exercise(exercise).into_iter().collect();
        bumped.push(GoalArea::WeightLoss);
        for area in &bumped {
            let next = self.get(*area).saturating_add(area.increment());
            self.set(*area, next);
        }
        bumped
    }
}

/// Lifetime workout totals for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub workout_sessions: u32,
    pub calories_burned: u32,
    pub activity_minutes: u32,
    pub exercises_done: u32,
}

impl UserStats {
    pub fn record(&mut self, summary: &WorkoutSummary) {
        self.workout_sessions = self.workout_sessions.saturating_add(1);
        self.exercises_done = self.exercises_done.saturating_add(1);
        self.calories_burned = self.calories_burned.saturating_add(summary.calories);
        self.activity_minutes = self.activity_minutes.saturating_add(summary.minutes);
    }
}

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSummary {
    /// 1-based set number.
    pub set: u32,
    pub seconds: u32,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub exercise: String,
    pub sets_completed: u32,
    pub active_secs: u32,
    pub minutes: u32,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkoutEvent {
    /// A set ended and the next one started.
    SetFinished(SetSummary),
    /// The last set ended; the session is now `Completed`.
    WorkoutFinished {
        last_set: SetSummary,
        summary: WorkoutSummary,
    },
}

/// Countdown over `total_sets` sets of `set_secs` each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    exercise: String,
    calories_per_minute: u32,
    total_sets: u32,
    set_secs: u32,
    state: SessionState,
    current_set: u32,
    remaining_secs: u32,
    set_elapsed_secs: u32,
    active_secs: u32,
    sets_completed: u32,
}

impl WorkoutSession {
    /// Create an idle session. Unknown exercises burn
    /// [`DEFAULT_CALORIES_PER_MINUTE`].
    pub fn new(exercise: &str, total_sets: u32, set_secs: u32) -> Result<Self, ValidationError> {
        let exercise = exercise.trim();
        if exercise.is_empty() {
            return Err(ValidationError::invalid("exercise", "must not be empty"));
        }
        if total_sets == 0 {
            return Err(ValidationError::invalid("sets", "must be at least 1"));
        }
        if set_secs == 0 {
            return Err(ValidationError::invalid("set_secs", "must be at least 1"));
        }
        let (name, calories_per_minute) = match find_exercise(exercise) {
            Some(known) => (known.name.to_string(), known.calories_per_minute),
            None => (exercise.to_string(), DEFAULT_CALORIES_PER_MINUTE),
        };
        Ok(Self {
            exercise: name,
            calories_per_minute,
            total_sets,
            set_secs,
            state: SessionState::Idle,
            current_set: 1,
            remaining_secs: set_secs,
            set_elapsed_secs: 0,
            active_secs: 0,
            sets_completed: 0,
        })
    }

    /// Session using a catalogue entry's default sets and duration.
    pub fn from_catalogue(exercise: &Exercise) -> Self {
        Self {
            exercise: exercise.name.to_string(),
            calories_per_minute: exercise.calories_per_minute,
            total_sets: exercise.default_sets.max(1),
            set_secs: exercise.default_set_secs.max(1),
            state: SessionState::Idle,
            current_set: 1,
            remaining_secs: exercise.default_set_secs.max(1),
            set_elapsed_secs: 0,
            active_secs: 0,
            sets_completed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    pub fn calories_per_minute(&self) -> u32 {
        self.calories_per_minute
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_set(&self) -> u32 {
        self.current_set
    }

    pub fn total_sets(&self) -> u32 {
        self.total_sets
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn active_secs(&self) -> u32 {
        self.active_secs
    }

    /// Totals so far, as they would be credited if the workout ended now.
    pub fn summary(&self) -> WorkoutSummary {
        WorkoutSummary {
            exercise: self.exercise.clone(),
            sets_completed: self.sets_completed,
            active_secs: self.active_secs,
            minutes: self.active_secs / 60,
            calories: workout_calories(self.active_secs, self.calories_per_minute),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        match self.state {
            SessionState::Running => false,
            SessionState::Completed => {
                self.reset();
                self.state = SessionState::Running;
                true
            }
            SessionState::Idle | SessionState::Paused => {
                self.state = SessionState::Running;
                true
            }
        }
    }

    /// Pause a running session. Elapsed time stays credited.
    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.state = SessionState::Paused;
        true
    }

    /// Back to set 1 with nothing credited.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.current_set = 1;
        self.remaining_secs = self.set_secs;
        self.set_elapsed_secs = 0;
        self.active_secs = 0;
        self.sets_completed = 0;
    }

    /// Advance the countdown by `elapsed_secs`.
    ///
    /// Crosses at most one set boundary per call; time beyond the end of the
    /// current set is dropped. Ignored unless running.
    pub fn tick(&mut self, elapsed_secs: u32) -> Option<WorkoutEvent> {
        if self.state != SessionState::Running || elapsed_secs == 0 {
            return None;
        }

        let step = elapsed_secs.min(self.remaining_secs);
        self.remaining_secs -= step;
        self.set_elapsed_secs = self.set_elapsed_secs.saturating_add(step);
        self.active_secs = self.active_secs.saturating_add(step);
        if self.remaining_secs > 0 {
            return None;
        }

        let finished = SetSummary {
            set: self.current_set,
            seconds: self.set_elapsed_secs,
            calories: set_calories(self.set_elapsed_secs, self.calories_per_minute),
        };
        self.set_elapsed_secs = 0;
        self.sets_completed += 1;

        if self.current_set < self.total_sets {
            self.current_set += 1;
            self.remaining_secs = self.set_secs;
            Some(WorkoutEvent::SetFinished(finished))
        } else {
            self.state = SessionState::Completed;
            Some(WorkoutEvent::WorkoutFinished {
                last_set: finished,
                summary: self.summary(),
            })
        }
    }

    /// End the workout early and return what it earned.
    pub fn finish(&mut self) -> WorkoutSummary {
        self.state = SessionState::Completed;
        self.summary()
    }

    /// Run every remaining set to completion without pauses.
    pub fn run_to_completion(&mut self) -> (Vec<SetSummary>, WorkoutSummary) {
        let mut sets = Vec::new();
        self.start();
        loop {
            match self.tick(self.remaining_secs) {
                Some(WorkoutEvent::SetFinished(set)) => sets.push(set),
                Some(WorkoutEvent::WorkoutFinished { last_set, summary }) => {
                    sets.push(last_set);
                    return (sets, summary);
                }
                None => return (sets, self.finish()),
            }
        }
    }
}
