//! Error type for `continuum-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column held a value this version does not understand.
  #[error("corrupt row: {0}")]
  CorruptRow(String),

  #[error("habit not found: {0}")]
  HabitNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
