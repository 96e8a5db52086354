//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, day keys verbatim and custom weekday sets as normalised CSV.

use chrono::{DateTime, Utc};
use continuum_core::{
  day::DayKey,
  habit::Habit,
  schedule::{Schedule, ScheduleType},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── DayKey ──────────────────────────────────────────────────────────────────

pub fn decode_day(s: &str) -> Result<DayKey> {
  s.parse()
    .map_err(|_| Error::CorruptRow(format!("bad day key: {s:?}")))
}

// ─── Schedule ────────────────────────────────────────────────────────────────

pub fn decode_schedule_type(s: &str) -> Result<ScheduleType> {
  s.parse()
    .map_err(|_| Error::CorruptRow(format!("unknown schedule type: {s:?}")))
}

/// `(schedule_type, days_of_week)` column values.
pub fn encode_schedule(schedule: &Schedule) -> (&'static str, Option<String>) {
  (schedule.schedule_type.as_str(), schedule.to_csv())
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawHabit::from_row`].
pub const HABIT_COLUMNS: &str =
  "habit_id, owner, name, schedule_type, days_of_week, created_at";

/// Raw strings read directly from a `habits` row.
pub struct RawHabit {
  pub habit_id:      String,
  pub owner:         String,
  pub name:          String,
  pub schedule_type: String,
  pub days_of_week:  Option<String>,
  pub created_at:    String,
}

impl RawHabit {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      habit_id:      row.get(0)?,
      owner:         row.get(1)?,
      name:          row.get(2)?,
      schedule_type: row.get(3)?,
      days_of_week:  row.get(4)?,
      created_at:    row.get(5)?,
    })
  }

  pub fn into_habit(self) -> Result<Habit> {
    let schedule_type = decode_schedule_type(&self.schedule_type)?;
    Ok(Habit {
      habit_id:   decode_uuid(&self.habit_id)?,
      owner:      self.owner,
      name:       self.name,
      schedule:   Schedule::from_storage(schedule_type, self.days_of_week.as_deref()),
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
