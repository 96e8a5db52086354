//! Async HTTP client wrapping the continuum JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use continuum_api::{
  checkins::ToggleResponse,
  habits::{HabitDetail, Overview},
  schedule::Description,
};
use continuum_core::{
  day::DayKey,
  habit::Habit,
  schedule::{Schedule, ScheduleType},
};
use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Connection settings for the continuum API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Request body for creating or replacing a habit.
#[derive(Debug, Serialize)]
pub struct HabitInput {
  pub name:          String,
  pub schedule_type: ScheduleType,
  pub days_of_week:  Vec<u8>,
}

impl HabitInput {
  pub fn new(name: String, schedule: &Schedule) -> Self {
    Self {
      name,
      schedule_type: schedule.schedule_type,
      days_of_week: schedule.days_of_week.iter().copied().collect(),
    }
  }
}

/// Async HTTP client for the continuum JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  async fn send(&self, label: &str, req: reqwest::RequestBuilder) -> Result<Response> {
    tracing::debug!(request = label, "sending");
    let resp = self
      .auth(req)
      .send()
      .await
      .with_context(|| format!("{label} failed"))?;

    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp
      .json::<serde_json::Value>()
      .await
      .ok()
      .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
      .unwrap_or_else(|| status.to_string());
    Err(anyhow!("{label} → {status}: {message}"))
  }

  async fn json<T: DeserializeOwned>(
    &self,
    label: &str,
    req: reqwest::RequestBuilder,
  ) -> Result<T> {
    self
      .send(label, req)
      .await?
      .json()
      .await
      .with_context(|| format!("deserialising {label} response"))
  }

  // ── Habits ────────────────────────────────────────────────────────────────

  /// `GET /api/habits`
  pub async fn overview(&self) -> Result<Overview> {
    self
      .json("GET /habits", self.client.get(self.url("/habits")))
      .await
  }

  /// `POST /api/habits`
  pub async fn create_habit(&self, input: &HabitInput) -> Result<Habit> {
    self
      .json("POST /habits", self.client.post(self.url("/habits")).json(input))
      .await
  }

  /// `GET /api/habits/<id>[?weeks=N]`
  pub async fn habit_detail(&self, id: Uuid, weeks: Option<usize>) -> Result<HabitDetail> {
    let mut req = self.client.get(self.url(&format!("/habits/{id}")));
    if let Some(weeks) = weeks {
      req = req.query(&[("weeks", weeks)]);
    }
    self.json("GET /habits/{id}", req).await
  }

  /// `PATCH /api/habits/<id>`
  pub async fn update_habit(&self, id: Uuid, input: &HabitInput) -> Result<Habit> {
    self
      .json(
        "PATCH /habits/{id}",
        self.client.patch(self.url(&format!("/habits/{id}"))).json(input),
      )
      .await
  }

  /// `DELETE /api/habits/<id>`
  pub async fn delete_habit(&self, id: Uuid) -> Result<()> {
    self
      .send(
        "DELETE /habits/{id}",
        self.client.delete(self.url(&format!("/habits/{id}"))),
      )
      .await?;
    Ok(())
  }

  // ── Check-ins ─────────────────────────────────────────────────────────────

  /// `POST /api/habits/<id>/toggle[?day=YYYY-MM-DD]`
  pub async fn toggle(&self, id: Uuid, day: Option<&DayKey>) -> Result<ToggleResponse> {
    let mut req = self.client.post(self.url(&format!("/habits/{id}/toggle")));
    if let Some(day) = day {
      req = req.query(&[("day", day.as_str())]);
    }
    self.json("POST /habits/{id}/toggle", req).await
  }

  // ── Schedules ─────────────────────────────────────────────────────────────

  /// `GET /api/schedule/describe?type=<t>[&days=<csv>]`
  pub async fn describe(&self, schedule: &Schedule) -> Result<Description> {
    let mut query = vec![("type", schedule.schedule_type.as_str().to_owned())];
    if let Some(days) = schedule.to_csv() {
      query.push(("days", days));
    }
    self
      .json(
        "GET /schedule/describe",
        self.client.get(self.url("/schedule/describe")).query(&query),
      )
      .await
  }
}
