//! Router tests against an in-memory SQLite store and a pinned clock.

use std::sync::Arc;

use axum::{
  Extension, Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use continuum_core::{clock::FixedClock, day::DayKey};
use continuum_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;

use crate::{ApiState, Owner, api_router};

// 2024-03-15 is a Friday.
const TODAY: &str = "2024-03-15";

async fn make_state() -> ApiState<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let today: DayKey = TODAY.parse().unwrap();
  ApiState::new(Arc::new(store), Arc::new(FixedClock(today)))
}

fn app(state: &ApiState<SqliteStore>, owner: &str) -> Router {
  api_router(state.clone()).layer(Extension(Owner(owner.to_owned())))
}

async fn send(
  app: Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

async fn create(state: &ApiState<SqliteStore>, body: Value) -> String {
  let (status, habit) = send(app(state, "alice"), "POST", "/habits", Some(body)).await;
  assert_eq!(status, StatusCode::CREATED, "{habit}");
  habit["habit_id"].as_str().unwrap().to_owned()
}

// ── Habits ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_list() {
  let state = make_state().await;
  let id = create(&state, json!({ "name": "Read" })).await;

  let (status, overview) = send(app(&state, "alice"), "GET", "/habits", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(overview["progress"]["today"], TODAY);
  assert_eq!(overview["progress"]["completed"], 0);
  assert_eq!(overview["progress"]["total"], 1);

  let summary = &overview["habits"][0];
  assert_eq!(summary["habit"]["habit_id"], id.as_str());
  assert_eq!(summary["habit"]["schedule"]["schedule_type"], "DAILY");
  assert_eq!(summary["valid_days"], "Every day");
  assert_eq!(summary["stats"]["current"], 0);
  assert_eq!(summary["checked_in_today"], false);
}

#[tokio::test]
async fn create_rejects_invalid_input() {
  let state = make_state().await;

  let (status, body) =
    send(app(&state, "alice"), "POST", "/habits", Some(json!({ "name": "" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("name"));

  let long = "x".repeat(51);
  let (status, _) =
    send(app(&state, "alice"), "POST", "/habits", Some(json!({ "name": long }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, body) = send(
    app(&state, "alice"),
    "POST",
    "/habits",
    Some(json!({ "name": "Gym", "schedule_type": "CUSTOM", "days_of_week": [9] })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("at least one day"));
}

#[tokio::test]
async fn custom_days_are_normalised() {
  let state = make_state().await;
  let id = create(
    &state,
    json!({ "name": "Gym", "schedule_type": "CUSTOM", "days_of_week": [5, 1, 3, 3, 7, -1] }),
  )
  .await;

  let (_, detail) =
    send(app(&state, "alice"), "GET", &format!("/habits/{id}"), None).await;
  assert_eq!(
    detail["summary"]["habit"]["schedule"]["days_of_week"],
    json!([1, 3, 5])
  );
  assert_eq!(detail["summary"]["valid_days"], "Monday, Wednesday, and Friday");
}

#[tokio::test]
async fn update_and_delete() {
  let state = make_state().await;
  let id = create(&state, json!({ "name": "Run" })).await;

  let (status, habit) = send(
    app(&state, "alice"),
    "PATCH",
    &format!("/habits/{id}"),
    Some(json!({ "name": "Jog", "schedule_type": "WEEKDAYS" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(habit["name"], "Jog");
  assert_eq!(habit["schedule"]["schedule_type"], "WEEKDAYS");

  let (status, _) =
    send(app(&state, "alice"), "DELETE", &format!("/habits/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, _) =
    send(app(&state, "alice"), "GET", &format!("/habits/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) =
    send(app(&state, "alice"), "DELETE", &format!("/habits/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_owners_see_nothing() {
  let state = make_state().await;
  let id = create(&state, json!({ "name": "Private" })).await;

  let (_, overview) = send(app(&state, "bob"), "GET", "/habits", None).await;
  assert_eq!(overview["progress"]["total"], 0);

  for (method, uri) in [
    ("GET", format!("/habits/{id}")),
    ("DELETE", format!("/habits/{id}")),
    ("POST", format!("/habits/{id}/toggle")),
    ("GET", format!("/habits/{id}/check-ins")),
  ] {
    let (status, _) = send(app(&state, "bob"), method, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
  }
}

// ── Check-ins ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_defaults_to_today() {
  let state = make_state().await;
  let id = create(&state, json!({ "name": "Walk" })).await;
  let uri = format!("/habits/{id}/toggle");

  let (status, body) = send(app(&state, "alice"), "POST", &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["day"], TODAY);
  assert_eq!(body["checked"], true);
  assert_eq!(body["outcome"], "checked");

  let (_, overview) = send(app(&state, "alice"), "GET", "/habits", None).await;
  assert_eq!(overview["progress"]["completed"], 1);
  assert_eq!(overview["habits"][0]["stats"]["current"], 1);

  let (_, body) = send(app(&state, "alice"), "POST", &uri, None).await;
  assert_eq!(body["checked"], false);
  assert_eq!(body["outcome"], "unchecked");
}

#[tokio::test]
async fn toggle_rejects_bad_day() {
  let state = make_state().await;
  let id = create(&state, json!({ "name": "Walk" })).await;

  let (status, _) = send(
    app(&state, "alice"),
    "POST",
    &format!("/habits/{id}/toggle?day=2024-3-1"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = send(
    app(&state, "alice"),
    "POST",
    &format!("/habits/{}/toggle", Uuid::new_v4()),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn weekday_streak_spans_the_weekend() {
  let state = make_state().await;
  let id = create(&state, json!({ "name": "Standup", "schedule_type": "WEEKDAYS" })).await;

  // Friday 8th, a bonus Saturday, then Monday through Friday.
  for d in [
    "2024-03-08", "2024-03-09", "2024-03-11", "2024-03-12", "2024-03-13",
    "2024-03-14", "2024-03-15",
  ] {
    let (status, _) = send(
      app(&state, "alice"),
      "POST",
      &format!("/habits/{id}/toggle?day={d}"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
  }

  let (_, detail) = send(
    app(&state, "alice"),
    "GET",
    &format!("/habits/{id}?weeks=4"),
    None,
  )
  .await;
  assert_eq!(detail["summary"]["stats"]["current"], 6);
  assert_eq!(detail["summary"]["stats"]["longest"], 6);
  assert_eq!(detail["summary"]["total_check_ins"], 7);

  let history = detail["history"].as_array().unwrap();
  assert_eq!(history.len(), 7);
  assert_eq!(history[0]["day"], TODAY);
  assert_eq!(history[0]["is_today"], true);
  assert_eq!(history[5]["day"], "2024-03-09");
  assert_eq!(history[5]["counts_toward_streak"], false);

  let weeks = detail["heatmap"]["weeks"].as_array().unwrap();
  assert_eq!(weeks.len(), 4);
  // Last column is the week of Monday 11th; Saturday 9th sits in the one before.
  assert_eq!(weeks[3][0]["day"], "2024-03-11");
  assert_eq!(weeks[3][4]["status"], "checked-scheduled");
  assert_eq!(weeks[3][4]["is_today"], true);
  assert_eq!(weeks[3][5]["status"], "not-scheduled");
  assert_eq!(weeks[2][5]["status"], "checked-bonus");
}

#[tokio::test]
async fn heatmap_defaults_to_24_weeks() {
  let state = make_state().await;
  let id = create(&state, json!({ "name": "Read" })).await;

  let (_, detail) =
    send(app(&state, "alice"), "GET", &format!("/habits/{id}"), None).await;
  let weeks = detail["heatmap"]["weeks"].as_array().unwrap();
  assert_eq!(weeks.len(), 24);
  assert!(weeks.iter().all(|w| w.as_array().unwrap().len() == 7));
}

#[tokio::test]
async fn heatmap_shows_check_ins_older_than_history_window() {
  let state = make_state().await.with_history_days(7);
  let id = create(&state, json!({ "name": "Read" })).await;

  for d in ["2024-03-01", "2024-03-14"] {
    send(
      app(&state, "alice"),
      "POST",
      &format!("/habits/{id}/toggle?day={d}"),
      None,
    )
    .await;
  }

  let (status, detail) = send(
    app(&state, "alice"),
    "GET",
    &format!("/habits/{id}?weeks=4"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  // Friday 1st sits in the column starting Monday 26 February.
  let cell = &detail["heatmap"]["weeks"][1][4];
  assert_eq!(cell["day"], "2024-03-01");
  assert_eq!(cell["checked"], true);
  assert_eq!(cell["status"], "checked-scheduled");

  // Streaks and history still only see the window.
  assert_eq!(detail["summary"]["total_check_ins"], 1);
  assert_eq!(detail["history"].as_array().unwrap().len(), 1);
  assert_eq!(detail["history"][0]["day"], "2024-03-14");
}

#[tokio::test]
async fn check_ins_respect_history_window() {
  let state = make_state().await.with_history_days(7);
  let id = create(&state, json!({ "name": "Read" })).await;

  for d in ["2024-03-01", "2024-03-08", "2024-03-14"] {
    send(
      app(&state, "alice"),
      "POST",
      &format!("/habits/{id}/toggle?day={d}"),
      None,
    )
    .await;
  }

  let (status, body) = send(
    app(&state, "alice"),
    "GET",
    &format!("/habits/{id}/check-ins"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["since"], "2024-03-08");
  assert_eq!(body["days"], json!(["2024-03-14", "2024-03-08"]));
}

// ── Schedule ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn describe_schedules() {
  let state = make_state().await;

  let (status, body) = send(
    app(&state, "alice"),
    "GET",
    "/schedule/describe?type=custom&days=5,1,3",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["description"], "Monday, Wednesday, and Friday");
  assert_eq!(body["schedule"]["schedule_type"], "CUSTOM");

  let (_, body) =
    send(app(&state, "alice"), "GET", "/schedule/describe", None).await;
  assert_eq!(body["description"], "Every day");

  let (status, _) = send(
    app(&state, "alice"),
    "GET",
    "/schedule/describe?type=MONTHLY",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}
