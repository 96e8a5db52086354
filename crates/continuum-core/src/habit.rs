//! Habit records and the validated input used to create or edit them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  schedule::{Schedule, ScheduleType},
};

/// Longest accepted habit name, in characters.
pub const NAME_MAX_CHARS: usize = 50;

/// A tracked habit. Check-ins are stored separately, keyed by day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
  pub habit_id:   Uuid,
  /// The user the habit belongs to; every store operation is scoped by it.
  pub owner:      String,
  pub name:       String,
  pub schedule:   Schedule,
  pub created_at: DateTime<Utc>,
}

// ─── HabitDraft ──────────────────────────────────────────────────────────────

/// Validated name and schedule, accepted by
/// [`crate::store::HabitStore::create_habit`] and
/// [`crate::store::HabitStore::update_habit`].
///
/// Fields are private so a draft can only come out of [`HabitDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDraft {
  name:     String,
  schedule: Schedule,
}

impl HabitDraft {
  /// Validate user input.
  ///
  /// - the name must be 1 to [`NAME_MAX_CHARS`] characters;
  /// - a custom schedule must keep at least one weekday after normalisation;
  /// - daily and weekday schedules drop any submitted weekdays.
  pub fn new(name: impl Into<String>, schedule: Schedule) -> Result<Self> {
    let name = name.into();
    let len = name.chars().count();
    if len == 0 || len > NAME_MAX_CHARS {
      return Err(Error::InvalidName);
    }

    let schedule = match schedule.schedule_type {
      ScheduleType::Custom => {
        let custom = Schedule::custom(schedule.days_of_week);
        if custom.days_of_week.is_empty() {
          return Err(Error::EmptyCustomSchedule);
        }
        custom
      }
      ScheduleType::Daily => Schedule::daily(),
      ScheduleType::Weekdays => Schedule::weekdays(),
    };

    Ok(Self { name, schedule })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn schedule(&self) -> &Schedule { &self.schedule }

  pub fn into_parts(self) -> (String, Schedule) { (self.name, self.schedule) }
}

// ─── Check-ins ───────────────────────────────────────────────────────────────

/// What a check-in toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
  Checked,
  Unchecked,
}

impl ToggleOutcome {
  pub fn is_checked(self) -> bool { matches!(self, Self::Checked) }
}
