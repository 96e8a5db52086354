//! Activity heatmap: a Monday-first grid of recent weeks with each cell
//! classified against the habit's schedule.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{day::DayKey, schedule::Schedule};

/// Number of week columns shown when the caller does not ask for another.
pub const DEFAULT_WEEKS: usize = 24;

/// How a single day renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellStatus {
  CheckedScheduled,
  MissedScheduled,
  /// A check-in on a day the schedule does not cover.
  CheckedBonus,
  /// Unscheduled and unchecked, or in the future.
  NotScheduled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
  pub day:      DayKey,
  pub status:   CellStatus,
  pub is_today: bool,
  pub checked:  bool,
}

/// Week columns, oldest first; each column runs Monday through Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heatmap {
  pub weeks: Vec<Vec<HeatmapCell>>,
}

/// `weeks` Monday-first columns ending with the week that contains `today`.
pub fn generate_date_grid(today: &DayKey, weeks: usize) -> Vec<[DayKey; 7]> {
  let days_since_monday = (i64::from(today.weekday_index()) + 6) % 7;
  let this_monday = today.add_days(-days_since_monday);

  (0..weeks)
    .rev()
    .map(|back| {
      let monday = this_monday.add_days(-7 * back as i64);
      std::array::from_fn(|i| monday.add_days(i as i64))
    })
    .collect()
}

pub fn cell_status(
  day: &DayKey,
  checked: &HashSet<&DayKey>,
  schedule: &Schedule,
  today: &DayKey,
) -> CellStatus {
  if day > today {
    return CellStatus::NotScheduled;
  }
  match (schedule.is_scheduled(day), checked.contains(day)) {
    (true, true) => CellStatus::CheckedScheduled,
    (true, false) => CellStatus::MissedScheduled,
    (false, true) => CellStatus::CheckedBonus,
    (false, false) => CellStatus::NotScheduled,
  }
}

impl Heatmap {
  pub fn build(
    check_ins: &[DayKey],
    schedule: &Schedule,
    today: &DayKey,
    weeks: usize,
  ) -> Self {
    let checked: HashSet<&DayKey> = check_ins.iter().collect();
    let weeks = generate_date_grid(today, weeks)
      .into_iter()
      .map(|column| {
        column
          .into_iter()
          .map(|day| HeatmapCell {
            status:   cell_status(&day, &checked, schedule, today),
            is_today: &day == today,
            checked:  checked.contains(&day),
            day,
          })
          .collect()
      })
      .collect();
    Self { weeks }
  }
}
