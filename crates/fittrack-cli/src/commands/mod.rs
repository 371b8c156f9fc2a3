pub mod config;
pub mod habit;
pub mod meal;
pub mod water;
pub mod workout;

use chrono::{NaiveDate, NaiveTime, Weekday};
use fittrack_core::{Config, UserId};

/// Resolved global options shared by every command.
pub struct Context {
    pub user_id: UserId,
    pub today: NaiveDate,
    pub config: Config,
}

impl Context {
    pub fn new(user: Option<UserId>, date: Option<NaiveDate>) -> Self {
        let config = Config::load_or_default();
        let user_id = user.unwrap_or(config.user.default_user_id);
        let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
        tracing::debug!(user_id, %today, "resolved command context");
        Self {
            user_id,
            today,
            config,
        }
    }
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Parse a `YYYY-MM` argument into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM: {e}"))
}

/// Parse a weekday name such as `mon` or `Monday`.
pub fn parse_weekday(s: &str) -> Result<Weekday, String> {
    s.parse::<Weekday>()
        .map_err(|_| format!("expected a weekday (mon..sun), got '{s}'"))
}

/// Parse an `HH:MM` argument.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}
