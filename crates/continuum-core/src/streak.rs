//! Schedule-aware streak calculation.
//!
//! Streaks walk only over scheduled days. Unscheduled days are transparent:
//! they neither extend nor break a run, and a check-in on one (a bonus day)
//! never counts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{day::DayKey, schedule::Schedule};

/// Current and longest streak lengths, in scheduled days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
  pub current: u32,
  pub longest: u32,
}

/// Compute the current and longest streaks for a habit.
///
/// - `checked_days` may be unsorted and contain duplicates.
/// - `min_day`, when given, bounds both scans from below (inclusive). Without
///   it, the longest-streak scan starts at the earliest check-in, or at
///   `today` when there are none.
///
/// The current streak counts checked scheduled days backward from `today`
/// and stops at the first scheduled day without a check-in; an unchecked
/// `today` therefore yields `current == 0`.
pub fn compute_schedule_streak_stats(
  checked_days: &[DayKey],
  schedule: &Schedule,
  today: &DayKey,
  min_day: Option<&DayKey>,
) -> StreakStats {
  let checked: BTreeSet<&DayKey> = checked_days.iter().collect();
  let earliest = checked.first().copied();

  StreakStats {
    current: current_streak(&checked, schedule, today, min_day.or(earliest)),
    longest: longest_streak(&checked, schedule, today, min_day.or(earliest)),
  }
}

/// Backward scan from `today`.
///
/// With no explicit lower bound the scan is floored at the earliest check-in:
/// nothing before it can extend the streak, and a schedule with no days at
/// all would otherwise never meet a break.
fn current_streak(
  checked: &BTreeSet<&DayKey>,
  schedule: &Schedule,
  today: &DayKey,
  floor: Option<&DayKey>,
) -> u32 {
  let Some(floor) = floor else {
    return 0;
  };

  let mut current = 0;
  let mut cursor = today.clone();
  while &cursor >= floor {
    if schedule.is_scheduled(&cursor) {
      if !checked.contains(&cursor) {
        break;
      }
      current += 1;
    }
    let prev = cursor.prev();
    // 0000-01-01 has no predecessor.
    if prev == cursor {
      break;
    }
    cursor = prev;
  }
  current
}

/// Forward scan from `start` (or `today`) through `today`, inclusive.
fn longest_streak(
  checked: &BTreeSet<&DayKey>,
  schedule: &Schedule,
  today: &DayKey,
  start: Option<&DayKey>,
) -> u32 {
  let mut longest = 0;
  let mut run = 0;
  let mut scan = start.unwrap_or(today).clone();
  while &scan <= today {
    if schedule.is_scheduled(&scan) {
      if checked.contains(&scan) {
        run += 1;
        longest = longest.max(run);
      } else {
        run = 0;
      }
    }
    let next = scan.next();
    // 9999-12-31 has no successor.
    if next == scan {
      break;
    }
    scan = next;
  }
  longest
}
