//! Plain-text rendering of API responses.

use std::fmt::Write as _;

use continuum_api::habits::{HabitDetail, Overview};
use continuum_core::heatmap::{CellStatus, Heatmap, HeatmapCell};
use uuid::Uuid;

const ROW_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// First eight hex digits; enough to pick a habit on the command line.
pub fn short_id(id: Uuid) -> String {
  let mut s = id.simple().to_string();
  s.truncate(8);
  s
}

fn glyph(cell: &HeatmapCell) -> char {
  match cell.status {
    CellStatus::CheckedScheduled => '■',
    // Today is still open, not missed.
    CellStatus::MissedScheduled if cell.is_today => '○',
    CellStatus::MissedScheduled => '·',
    CellStatus::CheckedBonus => '+',
    CellStatus::NotScheduled => ' ',
  }
}

/// One line per weekday, Monday first; one character per week, oldest left.
pub fn heatmap_rows(heatmap: &Heatmap) -> Vec<String> {
  ROW_LABELS
    .iter()
    .enumerate()
    .map(|(row, label)| {
      let cells: String = heatmap
        .weeks
        .iter()
        .map(|week| week.get(row).map_or(' ', glyph))
        .collect();
      format!("{label} {cells}")
    })
    .collect()
}

pub fn render_overview(overview: &Overview) -> String {
  let mut out = String::new();
  let p = &overview.progress;
  let _ = writeln!(out, "{}: {}/{} done", p.today, p.completed, p.total);

  if overview.habits.is_empty() {
    out.push_str("No habits yet. Add one with `continuum add <name>`.\n");
    return out;
  }

  out.push('\n');
  for s in &overview.habits {
    let mark = if s.checked_in_today { 'x' } else { ' ' };
    let _ = writeln!(
      out,
      "[{mark}] {}  {:<24} streak {:>3}  best {:>3}  {}",
      short_id(s.habit.habit_id),
      s.habit.name,
      s.stats.current,
      s.stats.longest,
      s.valid_days,
    );
  }
  out
}

pub fn render_detail(detail: &HabitDetail) -> String {
  let mut out = String::new();
  let s = &detail.summary;

  let _ = writeln!(out, "{} ({})", s.habit.name, s.habit.habit_id);
  let _ = writeln!(out, "Schedule: {}", s.valid_days);
  let _ = writeln!(
    out,
    "Current streak: {}  Longest: {}  Check-ins: {}",
    s.stats.current, s.stats.longest, s.total_check_ins
  );
  let _ = writeln!(
    out,
    "Today: {}",
    if s.checked_in_today { "done" } else { "not yet" }
  );

  out.push('\n');
  for row in heatmap_rows(&detail.heatmap) {
    let _ = writeln!(out, "{}", row.trim_end());
  }
  out.push_str("■ done  · missed  + bonus  ○ today\n");

  out.push('\n');
  if detail.history.is_empty() {
    out.push_str("No check-ins yet.\n");
  } else {
    out.push_str("Recent check-ins:\n");
    for entry in &detail.history {
      let mut line = format!("  {}", entry.day);
      if entry.is_today {
        line.push_str(" (today)");
      }
      if !entry.counts_toward_streak {
        line.push_str(" (excluded)");
      }
      let _ = writeln!(out, "{line}");
    }
  }
  out
}
