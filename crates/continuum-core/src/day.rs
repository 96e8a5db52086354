//! Day keys: the calendar-day identifiers every check-in is filed under.
//!
//! A day key is a `YYYY-MM-DD` string in the caller's local calendar. No
//! timezone is stored. Keys compare as strings, and for four-digit years
//! string order is chronological order; the streak scans rely on that.

use std::{cmp::Ordering, fmt, hash, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const FORMAT: &str = "%Y-%m-%d";

/// Earliest and latest dates with a four-digit year; keys never leave this
/// range, so string order stays chronological.
const FIRST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(0, 1, 1) {
  Some(d) => d,
  None => NaiveDate::MIN,
};
const LAST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 31) {
  Some(d) => d,
  None => NaiveDate::MAX,
};

// ─── DayKey ──────────────────────────────────────────────────────────────────

/// A validated calendar-day key.
///
/// Equality, hashing and ordering all delegate to the key string. The parsed
/// date is carried alongside so weekday and offset arithmetic never re-parse.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey {
  key:  String,
  date: NaiveDate,
}

impl DayKey {
  /// Render a calendar date as a day key, clamped to years 0000..=9999.
  pub fn from_date(date: NaiveDate) -> Self {
    let date = date.clamp(FIRST_DATE, LAST_DATE);
    Self { key: date.format(FORMAT).to_string(), date }
  }

  /// The calendar day an instant falls on, in the instant's own timezone.
  ///
  /// Pass a `DateTime<Local>` to get the local-calendar key.
  pub fn from_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
    Self::from_date(instant.date_naive())
  }

  pub fn as_str(&self) -> &str { &self.key }

  pub fn date(&self) -> NaiveDate { self.date }

  /// Weekday index, 0 = Sunday … 6 = Saturday.
  pub fn weekday_index(&self) -> u8 {
    self.date.weekday().num_days_from_sunday() as u8
  }

  /// The key `n` days later (earlier when `n` is negative).
  ///
  /// Saturates at 0000-01-01 and 9999-12-31.
  pub fn add_days(&self, n: i64) -> Self {
    let date = TimeDelta::try_days(n)
      .and_then(|delta| self.date.checked_add_signed(delta))
      .unwrap_or(if n < 0 { FIRST_DATE } else { LAST_DATE });
    Self::from_date(date)
  }

  pub fn next(&self) -> Self { self.add_days(1) }

  pub fn prev(&self) -> Self { self.add_days(-1) }
}

fn is_key_shaped(s: &str) -> bool {
  let bytes = s.as_bytes();
  bytes.len() == 10
    && bytes.iter().enumerate().all(|(i, b)| match i {
      4 | 7 => *b == b'-',
      _ => b.is_ascii_digit(),
    })
}

impl FromStr for DayKey {
  type Err = Error;

  /// Boundary validation: exactly `DDDD-DD-DD`, naming a real date.
  fn from_str(s: &str) -> Result<Self> {
    if !is_key_shaped(s) {
      return Err(Error::InvalidDayKey(s.to_owned()));
    }
    let date = NaiveDate::parse_from_str(s, FORMAT)
      .map_err(|_| Error::InvalidDayKey(s.to_owned()))?;
    Ok(Self { key: s.to_owned(), date })
  }
}

impl TryFrom<String> for DayKey {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl From<DayKey> for String {
  fn from(day: DayKey) -> Self { day.key }
}

impl PartialEq for DayKey {
  fn eq(&self, other: &Self) -> bool { self.key == other.key }
}

impl Eq for DayKey {}

impl hash::Hash for DayKey {
  fn hash<H: hash::Hasher>(&self, state: &mut H) { self.key.hash(state) }
}

impl PartialOrd for DayKey {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for DayKey {
  fn cmp(&self, other: &Self) -> Ordering { self.key.cmp(&other.key) }
}

impl fmt::Display for DayKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.key) }
}

impl fmt::Debug for DayKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "DayKey({})", self.key)
  }
}
