//! `soot` — World Bank greenhouse-gas emissions ETL.
//!
//! Fetches the tracked countries' emission series concurrently, validates the
//! result as a whole, and appends a new versioned snapshot to the SQLite
//! store. Exits non-zero when the run did not save cleanly.
//!
//! # Usage
//!
//! ```
//! soot                      # defaults: ./world_bank_emissions.db
//! soot --config soot.toml   # store_path / api_base_url / request_timeout_secs
//! SOOT_STORE_PATH=/data/ghg.db soot
//! ```

use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use serde::Deserialize;
use soot_core::{batches_valid, load_batches};
use soot_store_sqlite::SqliteStore;
use soot_worldbank::{ClientConfig, INDICATOR_CODE, TRACKED_COUNTRIES, WorldBankClient};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "World Bank greenhouse-gas emissions ETL")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "soot.toml")]
  config: PathBuf,
}

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Runtime settings. Every field has a default, so the binary runs without a
/// config file; `SOOT_`-prefixed environment variables override the file.
#[derive(Debug, Clone, Deserialize)]
struct Settings {
  #[serde(default = "default_store_path")]
  store_path: PathBuf,

  #[serde(default = "default_api_base_url")]
  api_base_url: String,

  /// Per-request timeout for the World Bank API, in seconds.
  #[serde(default = "default_request_timeout_secs")]
  request_timeout_secs: u64,
}

fn default_store_path() -> PathBuf {
  PathBuf::from("world_bank_emissions.db")
}

fn default_api_base_url() -> String {
  "https://api.worldbank.org/v2".to_string()
}

fn default_request_timeout_secs() -> u64 {
  30
}

// ─── Entry point ──────────────────────────────────────────────────────────────

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

  let settings: Settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SOOT"))
    .build()
    .context("failed to read configuration")?
    .try_deserialize()
    .context("failed to deserialise settings")?;

  let client = WorldBankClient::new(ClientConfig {
    base_url: settings.api_base_url.clone(),
    timeout:  Duration::from_secs(settings.request_timeout_secs),
  })
  .context("failed to build HTTP client")?;

  tracing::info!(
    countries = TRACKED_COUNTRIES.len(),
    indicator = INDICATOR_CODE,
    "fetching emissions data from the World Bank API"
  );
  let batches = client.fetch_all().await;

  // All-or-nothing gate: a single thin country invalidates the whole run and
  // the store is never opened.
  if !batches_valid(&batches) {
    tracing::error!("invalid emissions data was returned; nothing will be saved");
    anyhow::bail!("emissions data was not successfully saved");
  }

  tracing::info!(store = %settings.store_path.display(), "saving emissions data");
  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {}", settings.store_path.display())
    })?;

  let report = load_batches(&store, &batches)
    .await
    .context("failed to start the load run")?;

  tracing::info!(
    version = report.version,
    inserted = report.inserted,
    failed = report.failed,
    "run complete"
  );

  if !report.all_inserted() {
    anyhow::bail!("{} record(s) failed to save", report.failed);
  }

  tracing::info!("emissions data was successfully saved");
  Ok(())
}
