//! Rollcall server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite person store and the in-process event bus, and serves the
//! registration API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use rollcall_api::{AppState, ServiceConfig};
use rollcall_bus::ChannelBus;
use rollcall_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Rollcall person-registration server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration. Missing values fail here, not at first use.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ROLLCALL"))
    .build()
    .context("failed to read config file")?;

  let service_cfg: ServiceConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServiceConfig")?;

  // Open the person store.
  let store = SqliteStore::open(&service_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", service_cfg.store_path)
    })?;

  // Construct the event bus once; all requests share the handle.
  let bus = ChannelBus::new(service_cfg.event_channel.clone());

  let state = AppState {
    store: Arc::new(store),
    bus:   Arc::new(bus),
  };

  let app = rollcall_api::router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", service_cfg.host, service_cfg.port);

  tracing::info!(
    channel = %service_cfg.event_channel,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
