//! Per-habit read models assembled from a habit, its check-ins and today.
//!
//! This is the thin layer that feeds raw check-in keys through the schedule
//! evaluator and streak calculator; it holds no state of its own.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
  day::DayKey,
  habit::Habit,
  schedule::Schedule,
  streak::{StreakStats, compute_schedule_streak_stats},
};

/// How far back history is considered, in days.
pub const HISTORY_WINDOW_DAYS: u32 = 365;

/// How many recent check-ins a detail view lists.
pub const HISTORY_LIMIT: usize = 30;

/// The inclusive lower bound of a `days`-long history window ending today.
pub fn history_floor(today: &DayKey, days: u32) -> DayKey {
  today.add_days(-i64::from(days))
}

// ─── HabitSummary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSummary {
  pub habit:            Habit,
  pub stats:            StreakStats,
  pub checked_in_today: bool,
  /// Human-readable schedule, e.g. `"Monday, Wednesday, and Friday"`.
  pub valid_days:       String,
  /// Distinct check-in days inside the history window, bonus days included.
  pub total_check_ins:  usize,
}

/// Compute the summary for one habit.
///
/// `check_ins` is the snapshot read for this request; entries before
/// `min_day` are ignored.
pub fn summarize(
  habit: Habit,
  check_ins: &[DayKey],
  today: &DayKey,
  min_day: &DayKey,
) -> HabitSummary {
  let in_window: BTreeSet<&DayKey> =
    check_ins.iter().filter(|d| *d >= min_day).collect();

  let stats =
    compute_schedule_streak_stats(check_ins, &habit.schedule, today, Some(min_day));

  HabitSummary {
    stats,
    checked_in_today: in_window.contains(today),
    valid_days: habit.schedule.describe(),
    total_check_ins: in_window.len(),
    habit,
  }
}

// ─── DailyProgress ───────────────────────────────────────────────────────────

/// How many habits have been checked in today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
  pub today:     DayKey,
  pub completed: usize,
  pub total:     usize,
}

impl DailyProgress {
  pub fn from_summaries(today: DayKey, summaries: &[HabitSummary]) -> Self {
    Self {
      today,
      completed: summaries.iter().filter(|s| s.checked_in_today).count(),
      total: summaries.len(),
    }
  }
}

// ─── History ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
  pub day:                  DayKey,
  pub is_today:             bool,
  /// `false` for bonus check-ins on unscheduled days.
  pub counts_toward_streak: bool,
}

/// The `limit` most recent distinct check-ins, newest first.
pub fn recent_history(
  check_ins: &[DayKey],
  schedule: &Schedule,
  today: &DayKey,
  limit: usize,
) -> Vec<HistoryEntry> {
  let distinct: BTreeSet<&DayKey> = check_ins.iter().collect();
  distinct
    .into_iter()
    .rev()
    .take(limit)
    .map(|day| HistoryEntry {
      day:                  day.clone(),
      is_today:             day == today,
      counts_toward_streak: schedule.is_scheduled(day),
    })
    .collect()
}
