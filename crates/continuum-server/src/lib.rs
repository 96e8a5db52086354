//! HTTP server for Continuum.
//!
//! Wraps the JSON API from `continuum-api` with Basic authentication and
//! request tracing, and provides the configuration the binary loads.

pub mod auth;
pub mod error;

pub use error::Error;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, middleware, routing::get};
use continuum_api::{ApiState, api_router};
use continuum_core::{store::HabitStore, summary::HISTORY_WINDOW_DAYS};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, require_auth};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CONTINUUM_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub store_path:         PathBuf,
  pub auth_username:      String,
  pub auth_password_hash: String,
  /// Days of check-in history used for streaks.
  #[serde(default = "default_history_days")]
  pub history_days:       u32,
}

fn default_history_days() -> u32 { HISTORY_WINDOW_DAYS }

impl ServerConfig {
  /// Layer `path` (optional) and `CONTINUUM_*` variables over the defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .set_default("store_path", "continuum.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CONTINUUM"))
      .build()?
      .try_deserialize()
  }

  pub fn auth(&self) -> AuthConfig {
    AuthConfig {
      username:      self.auth_username.clone(),
      password_hash: self.auth_password_hash.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: `/health` is open, everything under
/// `/api` requires credentials.
pub fn router<S>(api: ApiState<S>, auth: Arc<AuthConfig>) -> Router
where
  S: HabitStore + 'static,
{
  let api = api_router(api).layer(middleware::from_fn_with_state(auth, require_auth));

  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}
