//! [`SqliteStore`] — the SQLite implementation of [`HabitStore`].

use std::path::Path;

use chrono::Utc;
use continuum_core::{
  day::DayKey,
  habit::{Habit, HabitDraft, ToggleOutcome},
  store::HabitStore,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    HABIT_COLUMNS, RawHabit, decode_day, encode_dt, encode_schedule, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A habit store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::info!(path = %path.display(), "opened habit store");
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Whether `habit_id` exists and belongs to `owner`.
fn owns_habit(
  conn: &rusqlite::Connection,
  habit_id: &str,
  owner: &str,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM habits WHERE habit_id = ?1 AND owner = ?2",
        rusqlite::params![habit_id, owner],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

// ─── HabitStore impl ─────────────────────────────────────────────────────────

impl HabitStore for SqliteStore {
  type Error = Error;

  // ── Habits ────────────────────────────────────────────────────────────────

  async fn create_habit(&self, owner: &str, draft: HabitDraft) -> Result<Habit> {
    let (name, schedule) = draft.into_parts();
    let habit = Habit {
      habit_id: Uuid::new_v4(),
      owner: owner.to_owned(),
      name,
      schedule,
      created_at: Utc::now(),
    };

    let id_str         = encode_uuid(habit.habit_id);
    let owner_str      = habit.owner.clone();
    let name_str       = habit.name.clone();
    let (ty_str, days) = encode_schedule(&habit.schedule);
    let at_str         = encode_dt(habit.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO habits (habit_id, owner, name, schedule_type, days_of_week, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, owner_str, name_str, ty_str, days, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::info!(habit_id = %habit.habit_id, owner = %habit.owner, "created habit");
    Ok(habit)
  }

  async fn get_habit(&self, owner: &str, id: Uuid) -> Result<Option<Habit>> {
    let id_str    = encode_uuid(id);
    let owner_str = owner.to_owned();

    let raw: Option<RawHabit> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE habit_id = ?1 AND owner = ?2"),
              rusqlite::params![id_str, owner_str],
              RawHabit::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawHabit::into_habit).transpose()
  }

  async fn list_habits(&self, owner: &str) -> Result<Vec<Habit>> {
    let owner_str = owner.to_owned();

    let raws: Vec<RawHabit> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {HABIT_COLUMNS} FROM habits WHERE owner = ?1 ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], RawHabit::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHabit::into_habit).collect()
  }

  async fn update_habit(
    &self,
    owner: &str,
    id: Uuid,
    draft: HabitDraft,
  ) -> Result<Option<Habit>> {
    let (name, schedule) = draft.into_parts();
    let id_str           = encode_uuid(id);
    let owner_str        = owner.to_owned();
    let (ty_str, days)   = encode_schedule(&schedule);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE habits SET name = ?1, schedule_type = ?2, days_of_week = ?3
           WHERE habit_id = ?4 AND owner = ?5",
          rusqlite::params![name, ty_str, days, id_str, owner_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    tracing::info!(habit_id = %id, owner, "updated habit");
    self.get_habit(owner, id).await
  }

  async fn delete_habit(&self, owner: &str, id: Uuid) -> Result<bool> {
    let id_str    = encode_uuid(id);
    let owner_str = owner.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM habits WHERE habit_id = ?1 AND owner = ?2",
          rusqlite::params![id_str, owner_str],
        )?)
      })
      .await?;

    if deleted > 0 {
      tracing::info!(habit_id = %id, owner, "deleted habit");
    }
    Ok(deleted > 0)
  }

  // ── Check-ins ─────────────────────────────────────────────────────────────

  async fn toggle_check_in(
    &self,
    owner: &str,
    id: Uuid,
    day: &DayKey,
  ) -> Result<ToggleOutcome> {
    let id_str    = encode_uuid(id);
    let owner_str = owner.to_owned();
    let day_str   = day.as_str().to_owned();
    let new_id    = encode_uuid(Uuid::new_v4());
    let at_str    = encode_dt(Utc::now());

    let outcome: Option<ToggleOutcome> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !owns_habit(&tx, &id_str, &owner_str)? {
          return Ok(None);
        }

        let removed = tx.execute(
          "DELETE FROM check_ins WHERE habit_id = ?1 AND day = ?2",
          rusqlite::params![id_str, day_str],
        )?;
        let outcome = if removed > 0 {
          ToggleOutcome::Unchecked
        } else {
          tx.execute(
            "INSERT INTO check_ins (check_in_id, habit_id, day, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![new_id, id_str, day_str, at_str],
          )?;
          ToggleOutcome::Checked
        };

        tx.commit()?;
        Ok(Some(outcome))
      })
      .await?;

    let outcome = outcome.ok_or(Error::HabitNotFound(id))?;
    tracing::debug!(habit_id = %id, %day, ?outcome, "toggled check-in");
    Ok(outcome)
  }

  async fn check_in_days(
    &self,
    owner: &str,
    id: Uuid,
    since: Option<&DayKey>,
  ) -> Result<Vec<DayKey>> {
    let id_str    = encode_uuid(id);
    let owner_str = owner.to_owned();
    let since_str = since.map(|d| d.as_str().to_owned());

    let rows: Option<Vec<String>> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !owns_habit(&tx, &id_str, &owner_str)? {
          return Ok(None);
        }

        let days = {
          let mut stmt = tx.prepare(
            "SELECT day FROM check_ins
             WHERE habit_id = ?1 AND (?2 IS NULL OR day >= ?2)
             ORDER BY day DESC",
          )?;
          stmt
            .query_map(rusqlite::params![id_str, since_str], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?
        };

        tx.commit()?;
        Ok(Some(days))
      })
      .await?;

    rows
      .ok_or(Error::HabitNotFound(id))?
      .iter()
      .map(|s| decode_day(s))
      .collect()
  }
}
