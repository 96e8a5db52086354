//! Error types for `continuum-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid day key: {0:?}")]
  InvalidDayKey(String),

  #[error("invalid habit name: must be between 1 and 50 characters")]
  InvalidName,

  #[error("unknown schedule type: {0:?}")]
  UnknownScheduleType(String),

  #[error("please select at least one day for custom schedule")]
  EmptyCustomSchedule,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
