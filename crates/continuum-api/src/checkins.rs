//! Handlers for check-in endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/habits/:id/toggle` | Optional `?day=YYYY-MM-DD`, defaults to today |
//! | `GET`  | `/habits/:id/check-ins` | Days inside the history window, newest first |

use axum::{
  Extension, Json,
  extract::{Path, Query, State},
};
use continuum_core::{
  day::DayKey, habit::ToggleOutcome, store::HabitStore, summary::history_floor,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, Owner, error::ApiError, habits::owned_habit};

#[derive(Debug, Deserialize)]
pub struct ToggleParams {
  pub day: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
  pub day:     DayKey,
  pub checked: bool,
  pub outcome: ToggleOutcome,
}

/// `POST /habits/:id/toggle[?day=YYYY-MM-DD]`
///
/// Any day may be toggled, including future and unscheduled ones; whether it
/// counts toward a streak is decided at read time.
pub async fn toggle<S>(
  State(state): State<ApiState<S>>,
  Extension(owner): Extension<Owner>,
  Path(id): Path<Uuid>,
  Query(params): Query<ToggleParams>,
) -> Result<Json<ToggleResponse>, ApiError>
where
  S: HabitStore,
{
  let day = match params.day {
    Some(raw) => raw.parse::<DayKey>()?,
    None => state.clock.today(),
  };

  owned_habit(&state, &owner, id).await?;
  let outcome = state
    .store
    .toggle_check_in(&owner.0, id, &day)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(ToggleResponse { day, checked: outcome.is_checked(), outcome }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckInList {
  pub since: DayKey,
  pub days:  Vec<DayKey>,
}

/// `GET /habits/:id/check-ins`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Extension(owner): Extension<Owner>,
  Path(id): Path<Uuid>,
) -> Result<Json<CheckInList>, ApiError>
where
  S: HabitStore,
{
  owned_habit(&state, &owner, id).await?;

  let since = history_floor(&state.clock.today(), state.history_days);
  let days = state
    .store
    .check_in_days(&owner.0, id, Some(&since))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(CheckInList { since, days }))
}
