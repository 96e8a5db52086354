//! The `HabitStore` trait.
//!
//! Implemented by storage backends (e.g. `continuum-store-sqlite`). The API
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  day::DayKey,
  habit::{Habit, HabitDraft, ToggleOutcome},
};

/// Abstraction over a habit store backend.
///
/// Every operation is scoped by `owner`: a habit that belongs to someone else
/// behaves exactly like one that does not exist.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait HabitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Habits ────────────────────────────────────────────────────────────

  /// Create and persist a new habit.
  fn create_habit<'a>(
    &'a self,
    owner: &'a str,
    draft: HabitDraft,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + 'a;

  /// Retrieve a habit by UUID. Returns `None` if not found or not owned.
  fn get_habit<'a>(
    &'a self,
    owner: &'a str,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Habit>, Self::Error>> + Send + 'a;

  /// List an owner's habits, oldest first.
  fn list_habits<'a>(
    &'a self,
    owner: &'a str,
  ) -> impl Future<Output = Result<Vec<Habit>, Self::Error>> + Send + 'a;

  /// Replace a habit's name and schedule. Returns `None` if not found.
  ///
  /// A schedule change applies retroactively: past check-ins are simply
  /// re-evaluated against the new schedule.
  fn update_habit<'a>(
    &'a self,
    owner: &'a str,
    id: Uuid,
    draft: HabitDraft,
  ) -> impl Future<Output = Result<Option<Habit>, Self::Error>> + Send + 'a;

  /// Delete a habit and all of its check-ins. Returns `false` if not found.
  fn delete_habit<'a>(
    &'a self,
    owner: &'a str,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Check-ins ─────────────────────────────────────────────────────────

  /// Create the check-in for `day` if absent, remove it if present.
  ///
  /// Returns an error if the habit is not found.
  fn toggle_check_in<'a>(
    &'a self,
    owner: &'a str,
    id: Uuid,
    day: &'a DayKey,
  ) -> impl Future<Output = Result<ToggleOutcome, Self::Error>> + Send + 'a;

  /// Days with a check-in, newest first, optionally only those on or after
  /// `since`. Read in a single statement so one request sees one snapshot.
  ///
  /// Returns an error if the habit is not found.
  fn check_in_days<'a>(
    &'a self,
    owner: &'a str,
    id: Uuid,
    since: Option<&'a DayKey>,
  ) -> impl Future<Output = Result<Vec<DayKey>, Self::Error>> + Send + 'a;
}
