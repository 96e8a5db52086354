//! `continuum` — command-line client for the Continuum habit tracker.
//!
//! # Usage
//!
//! ```
//! continuum --url http://localhost:8080 --user alice --password secret list
//! continuum --config ~/.config/continuum/config.toml check 1a2b3c4d
//! ```

mod client;
mod render;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig, HabitInput};
use continuum_core::{
  day::DayKey,
  habit::Habit,
  schedule::{Schedule, ScheduleType, parse_days_of_week},
};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "continuum", about = "Track habits and schedule-aware streaks")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the continuum server (default: http://localhost:8080).
  #[arg(long, env = "CONTINUUM_URL")]
  url: Option<String>,

  /// API username.
  #[arg(long, env = "CONTINUUM_USER")]
  user: Option<String>,

  /// API password (plaintext).
  #[arg(long, env = "CONTINUUM_PASSWORD")]
  password: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Today's progress and every habit's streak.
  List,
  /// Create a habit.
  Add {
    name: String,
    /// DAILY, WEEKDAYS or CUSTOM.
    #[arg(long, default_value = "DAILY")]
    schedule: ScheduleType,
    /// Weekdays for a custom schedule, 0 = Sunday, e.g. `1,3,5`.
    #[arg(long)]
    days: Option<String>,
  },
  /// Streaks, recent check-ins and the activity heatmap for one habit.
  Show {
    /// Habit id or a unique prefix of it.
    habit: String,
    #[arg(long)]
    weeks: Option<usize>,
  },
  /// Toggle a check-in, today unless `--day` is given.
  Check {
    habit: String,
    #[arg(long)]
    day: Option<DayKey>,
  },
  /// Rename a habit or change its schedule.
  Edit {
    habit: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    schedule: Option<ScheduleType>,
    #[arg(long)]
    days: Option<String>,
  },
  /// Delete a habit and its check-ins.
  Rm { habit: String },
  /// Print the human-readable form of a schedule.
  Describe {
    #[arg(default_value = "DAILY")]
    schedule: ScheduleType,
    #[arg(long)]
    days: Option<String>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
    username: args
      .user
      .or_else(|| (!file_cfg.username.is_empty()).then(|| file_cfg.username.clone()))
      .unwrap_or_default(),
    password: args
      .password
      .or_else(|| (!file_cfg.password.is_empty()).then(|| file_cfg.password.clone()))
      .unwrap_or_default(),
  };

  let client = ApiClient::new(api_config)?;
  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::List => {
      let overview = client.overview().await?;
      print!("{}", render::render_overview(&overview));
    }
    Command::Add { name, schedule, days } => {
      let schedule = build_schedule(schedule, days.as_deref());
      let habit = client.create_habit(&HabitInput::new(name, &schedule)).await?;
      println!("Added {} ({})", habit.name, render::short_id(habit.habit_id));
    }
    Command::Show { habit, weeks } => {
      let id = resolve(client, &habit).await?;
      let detail = client.habit_detail(id, weeks).await?;
      print!("{}", render::render_detail(&detail));
    }
    Command::Check { habit, day } => {
      let id = resolve(client, &habit).await?;
      let toggled = client.toggle(id, day.as_ref()).await?;
      let verb = if toggled.checked { "Checked in" } else { "Removed check-in" };
      println!("{verb} for {}", toggled.day);
    }
    Command::Edit { habit, name, schedule, days } => {
      let id = resolve(client, &habit).await?;
      let current = client.habit_detail(id, Some(1)).await?.summary.habit;
      let schedule = merge_schedule(current.schedule, schedule, days.as_deref());
      let name = name.unwrap_or(current.name);
      let habit = client.update_habit(id, &HabitInput::new(name, &schedule)).await?;
      println!("Updated {}: {}", habit.name, habit.schedule.describe());
    }
    Command::Rm { habit } => {
      let id = resolve(client, &habit).await?;
      client.delete_habit(id).await?;
      println!("Deleted {}", render::short_id(id));
    }
    Command::Describe { schedule, days } => {
      let described = client.describe(&build_schedule(schedule, days.as_deref())).await?;
      println!("{}", described.description);
    }
  }
  Ok(())
}

fn build_schedule(schedule_type: ScheduleType, days: Option<&str>) -> Schedule {
  Schedule { schedule_type, days_of_week: parse_days_of_week(days) }
}

/// Apply `edit` flags to a stored schedule; whatever is not given is kept.
fn merge_schedule(
  current: Schedule,
  schedule_type: Option<ScheduleType>,
  days: Option<&str>,
) -> Schedule {
  Schedule {
    schedule_type: schedule_type.unwrap_or(current.schedule_type),
    days_of_week:  match days {
      Some(csv) => parse_days_of_week(Some(csv)),
      None => current.days_of_week,
    },
  }
}

/// Turn a full id or a unique id prefix into a habit id.
async fn resolve(client: &ApiClient, query: &str) -> Result<Uuid> {
  if let Ok(id) = query.parse::<Uuid>() {
    return Ok(id);
  }
  let habits: Vec<Habit> = client
    .overview()
    .await?
    .habits
    .into_iter()
    .map(|s| s.habit)
    .collect();
  match_prefix(&habits, query)
}

fn match_prefix(habits: &[Habit], query: &str) -> Result<Uuid> {
  let needle = query.trim().to_ascii_lowercase().replace('-', "");
  if needle.is_empty() {
    bail!("empty habit id");
  }
  let mut hits = habits
    .iter()
    .filter(|h| h.habit_id.simple().to_string().starts_with(&needle));
  match (hits.next(), hits.next()) {
    (Some(h), None) => Ok(h.habit_id),
    (None, _) => Err(anyhow!("no habit matches {query:?}")),
    (Some(_), Some(_)) => Err(anyhow!("{query:?} matches more than one habit")),
  }
}
