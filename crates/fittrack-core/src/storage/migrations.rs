//! Database schema migrations for fittrack.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const SCHEMA_VERSION: i32 = 4;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }
    if current_version < 3 {
        migrate_v3(conn)?;
    }
    if current_version < 4 {
        migrate_v4(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            tracing::warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration v1: habits and their completion dates.
///
/// `habit_sequence` remembers the next id per user so deleted ids are never
/// handed out again.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS habits (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL,
            habit_id    INTEGER NOT NULL,
            name        TEXT NOT NULL,
            goal_days   INTEGER NOT NULL DEFAULT 30,
            UNIQUE(user_id, habit_id)
        );

        CREATE TABLE IF NOT EXISTS habit_completions (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         INTEGER NOT NULL,
            habit_id        INTEGER NOT NULL,
            completion_date TEXT NOT NULL,
            UNIQUE(user_id, habit_id, completion_date)
        );

        CREATE TABLE IF NOT EXISTS habit_sequence (
            user_id INTEGER PRIMARY KEY,
            next_id INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_habit_completions_habit
            ON habit_completions(user_id, habit_id);",
    )?;

    set_schema_version(&tx, 1)?;
    tx.commit()?;
    Ok(())
}

/// Migration v2: daily water intake.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS water_intake (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id        INTEGER NOT NULL,
            date           TEXT NOT NULL,
            daily_goal     INTEGER NOT NULL DEFAULT 2000,
            current_amount INTEGER NOT NULL DEFAULT 0,
            UNIQUE(user_id, date)
        );",
    )?;

    set_schema_version(&tx, 2)?;
    tx.commit()?;
    Ok(())
}

/// Migration v3: lifetime workout totals and goal progress.
fn migrate_v3(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS user_stats (
            user_id          INTEGER PRIMARY KEY,
            workout_sessions INTEGER NOT NULL DEFAULT 0,
            calories_burned  INTEGER NOT NULL DEFAULT 0,
            activity_minutes INTEGER NOT NULL DEFAULT 0,
            exercises_done   INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS user_goals (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id   INTEGER NOT NULL,
            goal_name TEXT NOT NULL,
            progress  INTEGER NOT NULL DEFAULT 0,
            UNIQUE(user_id, goal_name)
        );",
    )?;

    set_schema_version(&tx, 3)?;
    tx.commit()?;
    Ok(())
}

/// Migration v4: weekly meal plan and planned exercises.
///
/// `day_of_week` is 1 (Monday) through 7 (Sunday).
fn migrate_v4(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS meals (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL,
            day_of_week INTEGER NOT NULL,
            name        TEXT NOT NULL,
            time        TEXT NOT NULL,
            calories    INTEGER NOT NULL,
            UNIQUE(user_id, day_of_week, name, time)
        );

        CREATE TABLE IF NOT EXISTS meal_ingredients (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            meal_id         INTEGER NOT NULL REFERENCES meals(id),
            position        INTEGER NOT NULL,
            ingredient_name TEXT NOT NULL,
            quantity        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS planned_exercises (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id          INTEGER NOT NULL,
            day_of_week      INTEGER NOT NULL,
            name             TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL,
            calories         INTEGER NOT NULL,
            completed        INTEGER NOT NULL DEFAULT 0,
            UNIQUE(user_id, day_of_week, name)
        );

        CREATE INDEX IF NOT EXISTS idx_meal_ingredients_meal
            ON meal_ingredients(meal_id);",
    )?;

    set_schema_version(&tx, 4)?;
    tx.commit()?;
    Ok(())
}
