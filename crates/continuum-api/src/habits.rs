//! Handlers for `/habits` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/habits` | Today's progress plus a summary per habit |
//! | `POST`   | `/habits` | Body: [`HabitBody`]; returns 201 + stored habit |
//! | `GET`    | `/habits/:id` | Summary, recent history and heatmap; optional `?weeks=` |
//! | `PATCH`  | `/habits/:id` | Body: [`HabitBody`]; replaces name and schedule |
//! | `DELETE` | `/habits/:id` | 204; check-ins go with it |

use axum::{
  Extension, Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use continuum_core::{
  day::DayKey,
  habit::{Habit, HabitDraft},
  heatmap::{DEFAULT_WEEKS, Heatmap, generate_date_grid},
  schedule::{Schedule, ScheduleType},
  store::HabitStore,
  summary::{
    DailyProgress, HISTORY_LIMIT, HabitSummary, HistoryEntry, history_floor, recent_history,
    summarize,
  },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, Owner, error::ApiError};

/// Widest heatmap a client may request.
const MAX_WEEKS: usize = 104;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct Overview {
  pub progress: DailyProgress,
  pub habits:   Vec<HabitSummary>,
}

/// `GET /habits`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Extension(owner): Extension<Owner>,
) -> Result<Json<Overview>, ApiError>
where
  S: HabitStore,
{
  let today = state.clock.today();
  let min_day = history_floor(&today, state.history_days);

  let habits = state
    .store
    .list_habits(&owner.0)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let mut summaries = Vec::with_capacity(habits.len());
  for habit in habits {
    let days = state
      .store
      .check_in_days(&owner.0, habit.habit_id, Some(&min_day))
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
    summaries.push(summarize(habit, &days, &today, &min_day));
  }

  Ok(Json(Overview {
    progress: DailyProgress::from_summaries(today, &summaries),
    habits:   summaries,
  }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /habits` and `PATCH /habits/:id`.
#[derive(Debug, Deserialize)]
pub struct HabitBody {
  pub name:          String,
  #[serde(default)]
  pub schedule_type: ScheduleType,
  /// Only read for `CUSTOM`; out-of-range values are dropped.
  #[serde(default)]
  pub days_of_week:  Vec<i64>,
}

impl TryFrom<HabitBody> for HabitDraft {
  type Error = continuum_core::Error;

  fn try_from(b: HabitBody) -> Result<Self, Self::Error> {
    let schedule = Schedule {
      schedule_type: b.schedule_type,
      days_of_week:  b
        .days_of_week
        .into_iter()
        .filter_map(|d| u8::try_from(d).ok())
        .filter(|d| *d <= 6)
        .collect(),
    };
    HabitDraft::new(b.name, schedule)
  }
}

/// `POST /habits` — returns 201 + the stored [`Habit`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Extension(owner): Extension<Owner>,
  Json(body): Json<HabitBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HabitStore,
{
  let draft = HabitDraft::try_from(body)?;
  let habit = state
    .store
    .create_habit(&owner.0, draft)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(habit)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DetailParams {
  /// Heatmap width in weeks; defaults to 24.
  pub weeks: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitDetail {
  pub summary: HabitSummary,
  /// Most recent check-ins, newest first.
  pub history: Vec<HistoryEntry>,
  pub heatmap: Heatmap,
}

/// `GET /habits/:id[?weeks=N]`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Extension(owner): Extension<Owner>,
  Path(id): Path<Uuid>,
  Query(params): Query<DetailParams>,
) -> Result<Json<HabitDetail>, ApiError>
where
  S: HabitStore,
{
  let habit = owned_habit(&state, &owner, id).await?;

  let today = state.clock.today();
  let min_day = history_floor(&today, state.history_days);
  let weeks = params.weeks.unwrap_or(DEFAULT_WEEKS).min(MAX_WEEKS);

  // The grid may reach back past the history window.
  let load_from = generate_date_grid(&today, weeks)
    .first()
    .map(|week| week[0].clone())
    .filter(|grid_start| grid_start < &min_day)
    .unwrap_or_else(|| min_day.clone());
  let loaded = state
    .store
    .check_in_days(&owner.0, id, Some(&load_from))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let days: Vec<DayKey> = loaded.iter().filter(|d| *d >= &min_day).cloned().collect();

  let history = recent_history(&days, &habit.schedule, &today, HISTORY_LIMIT);
  let heatmap = Heatmap::build(&loaded, &habit.schedule, &today, weeks);
  let summary = summarize(habit, &days, &today, &min_day);

  Ok(Json(HabitDetail { summary, history, heatmap }))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /habits/:id`; the body is a full [`HabitBody`].
pub async fn update_one<S>(
  State(state): State<ApiState<S>>,
  Extension(owner): Extension<Owner>,
  Path(id): Path<Uuid>,
  Json(body): Json<HabitBody>,
) -> Result<Json<Habit>, ApiError>
where
  S: HabitStore,
{
  let draft = HabitDraft::try_from(body)?;
  let habit = state
    .store
    .update_habit(&owner.0, id, draft)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::habit_not_found(id))?;
  Ok(Json(habit))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /habits/:id`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Extension(owner): Extension<Owner>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: HabitStore,
{
  let deleted = state
    .store
    .delete_habit(&owner.0, id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::habit_not_found(id));
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Fetch a habit the caller owns, or 404.
pub(crate) async fn owned_habit<S>(
  state: &ApiState<S>,
  owner: &Owner,
  id: Uuid,
) -> Result<Habit, ApiError>
where
  S: HabitStore,
{
  state
    .store
    .get_habit(&owner.0, id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::habit_not_found(id))
}
