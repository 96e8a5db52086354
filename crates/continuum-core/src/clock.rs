//! The source of "today".
//!
//! Callers read the clock once per request and pass the resulting [`DayKey`]
//! down explicitly. Nothing in the workspace caches today at process scope.

use chrono::Local;

use crate::day::DayKey;

pub trait Clock: Send + Sync {
  /// The current calendar day.
  fn today(&self) -> DayKey;
}

/// Wall clock in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> DayKey { DayKey::from_datetime(&Local::now()) }
}

/// A clock pinned to one day.
#[derive(Debug, Clone)]
pub struct FixedClock(pub DayKey);

impl Clock for FixedClock {
  fn today(&self) -> DayKey { self.0.clone() }
}
