//! Schedule evaluation: which calendar days a habit expects a check-in on.
//!
//! Weekday indexes are 0 = Sunday … 6 = Saturday throughout.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, day::DayKey};

const DAY_NAMES: [&str; 7] = [
  "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

// ─── ScheduleType ────────────────────────────────────────────────────────────

/// The recurrence rule of a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleType {
  /// Every calendar day.
  #[default]
  Daily,
  /// Monday through Friday.
  Weekdays,
  /// An explicit set of weekdays.
  Custom,
}

impl ScheduleType {
  /// The discriminant stored in the `schedule_type` column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Daily => "DAILY",
      Self::Weekdays => "WEEKDAYS",
      Self::Custom => "CUSTOM",
    }
  }
}

impl FromStr for ScheduleType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_uppercase().as_str() {
      "DAILY" => Ok(Self::Daily),
      "WEEKDAYS" => Ok(Self::Weekdays),
      "CUSTOM" => Ok(Self::Custom),
      _ => Err(Error::UnknownScheduleType(s.to_owned())),
    }
  }
}

impl fmt::Display for ScheduleType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

// ─── Schedule ────────────────────────────────────────────────────────────────

/// A recurrence rule plus its weekday set.
///
/// `days_of_week` only matters for [`ScheduleType::Custom`]; residual days on
/// the other types are carried but never consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
  pub schedule_type: ScheduleType,
  #[serde(default)]
  pub days_of_week:  BTreeSet<u8>,
}

impl Schedule {
  pub fn daily() -> Self { Self::default() }

  pub fn weekdays() -> Self {
    Self { schedule_type: ScheduleType::Weekdays, days_of_week: BTreeSet::new() }
  }

  /// A custom schedule; indexes above 6 are dropped.
  pub fn custom(days: impl IntoIterator<Item = u8>) -> Self {
    Self {
      schedule_type: ScheduleType::Custom,
      days_of_week:  days.into_iter().filter(|d| *d <= 6).collect(),
    }
  }

  /// Rebuild a schedule from its stored columns.
  pub fn from_storage(schedule_type: ScheduleType, days_csv: Option<&str>) -> Self {
    Self { schedule_type, days_of_week: parse_days_of_week(days_csv) }
  }

  /// The value for the `days_of_week` column; only custom schedules keep one.
  pub fn to_csv(&self) -> Option<String> {
    match self.schedule_type {
      ScheduleType::Custom => {
        Some(days_of_week_to_csv(self.days_of_week.iter().copied()))
      }
      ScheduleType::Daily | ScheduleType::Weekdays => None,
    }
  }

  /// Whether at least one weekday is scheduled.
  pub fn has_scheduled_days(&self) -> bool {
    match self.schedule_type {
      ScheduleType::Daily | ScheduleType::Weekdays => true,
      ScheduleType::Custom => self.days_of_week.iter().any(|d| *d <= 6),
    }
  }

  pub fn is_scheduled(&self, day: &DayKey) -> bool { is_scheduled_day(day, self) }

  pub fn describe(&self) -> String { format_valid_days(self) }
}

// ─── Evaluation ──────────────────────────────────────────────────────────────

/// Whether `day` counts toward streaks under `schedule`.
pub fn is_scheduled_day(day: &DayKey, schedule: &Schedule) -> bool {
  let weekday = day.weekday_index();
  match schedule.schedule_type {
    ScheduleType::Daily => true,
    ScheduleType::Weekdays => (1..=5).contains(&weekday),
    ScheduleType::Custom => schedule.days_of_week.contains(&weekday),
  }
}

/// Human-readable description of the days a schedule covers.
///
/// Custom day lists use serial-comma grammar: `"A"`, `"A and B"`,
/// `"A, B, and C"`.
pub fn format_valid_days(schedule: &Schedule) -> String {
  match schedule.schedule_type {
    ScheduleType::Daily => "Every day".to_owned(),
    ScheduleType::Weekdays => {
      "Monday, Tuesday, Wednesday, Thursday, Friday".to_owned()
    }
    ScheduleType::Custom => {
      let names: Vec<&str> = schedule
        .days_of_week
        .iter()
        .filter_map(|d| DAY_NAMES.get(usize::from(*d)).copied())
        .collect();

      match names.as_slice() {
        [] => "No days selected".to_owned(),
        [only] => (*only).to_owned(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
      }
    }
  }
}

// ─── CSV boundary ────────────────────────────────────────────────────────────

/// Parse a stored or submitted comma-separated weekday list.
///
/// Never fails: blank, non-integral and out-of-range tokens are dropped.
pub fn parse_days_of_week(csv: Option<&str>) -> BTreeSet<u8> {
  let Some(csv) = csv else {
    return BTreeSet::new();
  };
  csv
    .split(',')
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .filter_map(|token| token.parse::<f64>().ok())
    .filter(|n| n.fract() == 0.0 && (0.0..=6.0).contains(n))
    .map(|n| n as u8)
    .collect()
}

/// Normalise a weekday collection to the stored CSV form: deduplicated,
/// ascending, out-of-range values removed.
pub fn days_of_week_to_csv<I>(days: I) -> String
where
  I: IntoIterator,
  I::Item: Into<i64>,
{
  days
    .into_iter()
    .map(Into::into)
    .filter(|d| (0..=6).contains(d))
    .collect::<BTreeSet<i64>>()
    .iter()
    .map(i64::to_string)
    .collect::<Vec<_>>()
    .join(",")
}
