//! continuum-server binary.
//!
//! Loads [`ServerConfig`] from `config.toml` (or `--config`) and `CONTINUUM_*`
//! variables, opens the SQLite store and serves the habit API over HTTP.
//!
//! # Password hash generation
//!
//! `auth_password_hash` takes an argon2 PHC string; print one with:
//!
//! ```
//! cargo run -p continuum-server -- --hash-password
//! ```

use std::{io::BufRead as _, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use continuum_api::ApiState;
use continuum_core::clock::SystemClock;
use continuum_server::{ServerConfig, auth::hash_password};
use continuum_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Continuum habit tracker server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Read a password from stdin, print its argon2 hash and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_password {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let hash = hash_password(line.trim_end_matches(['\r', '\n']))
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?;
    println!("{hash}");
    return Ok(());
  }

  let cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {}", cfg.store_path.display()))?;
  tracing::info!(path = %cfg.store_path.display(), "opened habit store");

  let api = ApiState::new(Arc::new(store), Arc::new(SystemClock))
    .with_history_days(cfg.history_days);
  let app = continuum_server::router(api, Arc::new(cfg.auth()));

  let address = format!("{}:{}", cfg.host, cfg.port);
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app).await.context("server error")
}
