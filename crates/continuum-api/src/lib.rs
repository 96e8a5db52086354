//! JSON REST API for Continuum.
//!
//! Exposes an axum [`Router`] backed by any [`HabitStore`]. Authentication is
//! the caller's responsibility: something upstream must insert an [`Owner`]
//! request extension before these handlers run.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", continuum_api::api_router(state))
//! ```

pub mod checkins;
pub mod error;
pub mod habits;
pub mod schedule;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use continuum_core::{clock::Clock, store::HabitStore, summary::HISTORY_WINDOW_DAYS};

pub use error::ApiError;

/// The authenticated user a request acts on behalf of.
#[derive(Clone, Debug)]
pub struct Owner(pub String);

/// Shared state for every API handler.
pub struct ApiState<S> {
  pub store:        Arc<S>,
  pub clock:        Arc<dyn Clock>,
  /// How many days back check-ins are loaded for streaks and history.
  pub history_days: u32,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
    Self { store, clock, history_days: HISTORY_WINDOW_DAYS }
  }

  pub fn with_history_days(mut self, days: u32) -> Self {
    self.history_days = days;
    self
  }
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:        Arc::clone(&self.store),
      clock:        Arc::clone(&self.clock),
      history_days: self.history_days,
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: HabitStore + 'static,
{
  Router::new()
    // Habits
    .route("/habits", get(habits::list::<S>).post(habits::create::<S>))
    .route(
      "/habits/{id}",
      get(habits::get_one::<S>)
        .patch(habits::update_one::<S>)
        .delete(habits::delete_one::<S>),
    )
    // Check-ins
    .route("/habits/{id}/toggle", post(checkins::toggle::<S>))
    .route("/habits/{id}/check-ins", get(checkins::list::<S>))
    // Schedules
    .route("/schedule/describe", get(schedule::describe))
    .with_state(state)
}
