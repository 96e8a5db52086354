//! Integration tests for `SqliteStore` against an in-memory database.

use continuum_core::{
  day::DayKey,
  habit::{HabitDraft, ToggleOutcome},
  schedule::Schedule,
  store::HabitStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn draft(name: &str, schedule: Schedule) -> HabitDraft {
  HabitDraft::new(name, schedule).unwrap()
}

fn day(s: &str) -> DayKey { s.parse().unwrap() }

// ─── Habits ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_habit() {
  let s = store().await;

  let habit = s
    .create_habit("alice", draft("Meditate", Schedule::custom([1, 3, 5])))
    .await
    .unwrap();
  assert_eq!(habit.owner, "alice");
  assert_eq!(habit.name, "Meditate");

  let fetched = s.get_habit("alice", habit.habit_id).await.unwrap();
  assert!(fetched.is_some());
  let fetched = fetched.unwrap();
  assert_eq!(fetched.habit_id, habit.habit_id);
  assert_eq!(fetched.schedule, Schedule::custom([1, 3, 5]));
  assert_eq!(fetched.created_at, habit.created_at);
}

#[tokio::test]
async fn get_habit_missing_returns_none() {
  let s = store().await;
  let result = s.get_habit("alice", Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn habits_are_scoped_by_owner() {
  let s = store().await;
  let habit = s
    .create_habit("alice", draft("Read", Schedule::daily()))
    .await
    .unwrap();

  assert!(s.get_habit("bob", habit.habit_id).await.unwrap().is_none());
  assert!(s.list_habits("bob").await.unwrap().is_empty());
  assert!(!s.delete_habit("bob", habit.habit_id).await.unwrap());
  assert!(
    s.update_habit("bob", habit.habit_id, draft("Mine now", Schedule::daily()))
      .await
      .unwrap()
      .is_none()
  );
  assert!(matches!(
    s.toggle_check_in("bob", habit.habit_id, &day("2024-03-10")).await,
    Err(Error::HabitNotFound(id)) if id == habit.habit_id
  ));

  // Alice's habit is untouched.
  let still = s.get_habit("alice", habit.habit_id).await.unwrap().unwrap();
  assert_eq!(still.name, "Read");
}

#[tokio::test]
async fn list_habits_oldest_first() {
  let s = store().await;
  for name in ["first", "second", "third"] {
    s.create_habit("alice", draft(name, Schedule::daily()))
      .await
      .unwrap();
  }
  s.create_habit("bob", draft("other", Schedule::daily()))
    .await
    .unwrap();

  let names: Vec<String> = s
    .list_habits("alice")
    .await
    .unwrap()
    .into_iter()
    .map(|h| h.name)
    .collect();
  assert_eq!(names, ["first", "second", "third"]);
}

#[tokio::test]
async fn update_replaces_name_and_schedule() {
  let s = store().await;
  let habit = s
    .create_habit("alice", draft("Run", Schedule::custom([2, 4])))
    .await
    .unwrap();

  let updated = s
    .update_habit("alice", habit.habit_id, draft("Jog", Schedule::weekdays()))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.name, "Jog");
  assert_eq!(updated.schedule, Schedule::weekdays());
  assert_eq!(updated.created_at, habit.created_at);

  let back_to_custom = s
    .update_habit("alice", habit.habit_id, draft("Jog", Schedule::custom([0])))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(back_to_custom.schedule, Schedule::custom([0]));
}

#[tokio::test]
async fn delete_removes_habit_and_check_ins() {
  let s = store().await;
  let habit = s
    .create_habit("alice", draft("Floss", Schedule::daily()))
    .await
    .unwrap();
  s.toggle_check_in("alice", habit.habit_id, &day("2024-03-10"))
    .await
    .unwrap();

  assert!(s.delete_habit("alice", habit.habit_id).await.unwrap());
  assert!(s.get_habit("alice", habit.habit_id).await.unwrap().is_none());
  assert!(matches!(
    s.check_in_days("alice", habit.habit_id, None).await,
    Err(Error::HabitNotFound(_))
  ));
  // Second delete is a no-op.
  assert!(!s.delete_habit("alice", habit.habit_id).await.unwrap());
}

// ─── Check-ins ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_checks_then_unchecks() {
  let s = store().await;
  let habit = s
    .create_habit("alice", draft("Walk", Schedule::daily()))
    .await
    .unwrap();
  let today = day("2024-03-10");

  let first = s.toggle_check_in("alice", habit.habit_id, &today).await.unwrap();
  assert_eq!(first, ToggleOutcome::Checked);
  assert_eq!(
    s.check_in_days("alice", habit.habit_id, None).await.unwrap(),
    vec![today.clone()],
  );

  let second = s.toggle_check_in("alice", habit.habit_id, &today).await.unwrap();
  assert_eq!(second, ToggleOutcome::Unchecked);
  assert!(
    s.check_in_days("alice", habit.habit_id, None)
      .await
      .unwrap()
      .is_empty()
  );
}

#[tokio::test]
async fn check_in_days_newest_first_and_windowed() {
  let s = store().await;
  let habit = s
    .create_habit("alice", draft("Journal", Schedule::daily()))
    .await
    .unwrap();
  for d in ["2024-03-08", "2024-02-29", "2024-03-10", "2023-12-31"] {
    s.toggle_check_in("alice", habit.habit_id, &day(d))
      .await
      .unwrap();
  }

  let all = s.check_in_days("alice", habit.habit_id, None).await.unwrap();
  assert_eq!(
    all,
    vec![day("2024-03-10"), day("2024-03-08"), day("2024-02-29"), day("2023-12-31")],
  );

  let since = day("2024-02-29");
  let recent = s
    .check_in_days("alice", habit.habit_id, Some(&since))
    .await
    .unwrap();
  assert_eq!(recent, vec![day("2024-03-10"), day("2024-03-08"), day("2024-02-29")]);
}

#[tokio::test]
async fn check_ins_are_per_habit() {
  let s = store().await;
  let a = s
    .create_habit("alice", draft("A", Schedule::daily()))
    .await
    .unwrap();
  let b = s
    .create_habit("alice", draft("B", Schedule::daily()))
    .await
    .unwrap();
  let today = day("2024-03-10");

  s.toggle_check_in("alice", a.habit_id, &today).await.unwrap();
  // Toggling the same day on another habit creates, not deletes.
  let outcome = s.toggle_check_in("alice", b.habit_id, &today).await.unwrap();
  assert_eq!(outcome, ToggleOutcome::Checked);
  assert_eq!(s.check_in_days("alice", a.habit_id, None).await.unwrap().len(), 1);
  assert_eq!(s.check_in_days("alice", b.habit_id, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn reopening_a_file_keeps_data() {
  let dir = std::env::temp_dir().join(format!("continuum-test-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("habits.db");

  let habit_id = {
    let s = SqliteStore::open(&path).await.unwrap();
    let habit = s
      .create_habit("alice", draft("Persist", Schedule::weekdays()))
      .await
      .unwrap();
    s.toggle_check_in("alice", habit.habit_id, &day("2024-03-11"))
      .await
      .unwrap();
    habit.habit_id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let habit = s.get_habit("alice", habit_id).await.unwrap().unwrap();
  assert_eq!(habit.schedule, Schedule::weekdays());
  assert_eq!(
    s.check_in_days("alice", habit_id, None).await.unwrap(),
    vec![day("2024-03-11")],
  );

  drop(s);
  std::fs::remove_dir_all(&dir).ok();
}
