//! SQL schema for the Continuum SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS habits (
    habit_id      TEXT PRIMARY KEY,
    owner         TEXT NOT NULL,
    name          TEXT NOT NULL,
    schedule_type TEXT NOT NULL DEFAULT 'DAILY',  -- 'DAILY' | 'WEEKDAYS' | 'CUSTOM'
    days_of_week  TEXT,                           -- normalised CSV, CUSTOM only
    created_at    TEXT NOT NULL                   -- ISO 8601 UTC
);

-- One row per (habit, day); the existence of the row is the completion fact.
CREATE TABLE IF NOT EXISTS check_ins (
    check_in_id TEXT PRIMARY KEY,
    habit_id    TEXT NOT NULL REFERENCES habits(habit_id) ON DELETE CASCADE,
    day         TEXT NOT NULL,                    -- YYYY-MM-DD day key
    created_at  TEXT NOT NULL,
    UNIQUE (habit_id, day)
);

CREATE INDEX IF NOT EXISTS habits_owner_idx ON habits(owner, created_at);

PRAGMA user_version = 1;
";
