//! `GET /schedule/describe`: human-readable schedule text, so clients can
//! preview a schedule before saving it.
//!
//! Query: `type=DAILY|WEEKDAYS|CUSTOM` (default `DAILY`) and
//! `days=1,3,5` for custom schedules.

use axum::{Json, extract::Query};
use continuum_core::schedule::{Schedule, ScheduleType};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct DescribeParams {
  #[serde(rename = "type")]
  pub schedule_type: Option<String>,
  pub days:          Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Description {
  pub schedule:    Schedule,
  pub description: String,
}

pub async fn describe(
  Query(params): Query<DescribeParams>,
) -> Result<Json<Description>, ApiError> {
  let schedule_type = match params.schedule_type.as_deref() {
    Some(raw) => raw.parse::<ScheduleType>()?,
    None => ScheduleType::default(),
  };
  let schedule = Schedule::from_storage(schedule_type, params.days.as_deref());
  let description = schedule.describe();
  Ok(Json(Description { schedule, description }))
}
