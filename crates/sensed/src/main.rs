//! SupportSense Daemon - support ticket triage API
//!
//! Classifies incoming tickets, serves the ranked ticket list and the
//! suggestion/analysis endpoints.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use sense_shared::{MemoryStore, TicketStore, BUILD_DATE, GIT_SHA, VERSION};
use sensed::config::Config;
use sensed::db::SqliteStore;
use sensed::seed::sample_tickets;
use sensed::server::{self, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// SupportSense daemon
#[derive(Parser)]
#[command(name = "sensed")]
#[command(about = "SupportSense ticket triage daemon", long_about = None)]
#[command(version)]
struct Args {
    /// Config file (overrides $SENSED_CONFIG and defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8001
    #[arg(long)]
    bind: Option<String>,

    /// SQLite database file
    #[arg(long)]
    db: Option<PathBuf>,

    /// Keep tickets in memory instead of SQLite
    #[arg(long)]
    memory: bool,

    /// Write a default config file to PATH and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, config_source) = Config::resolve(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    if let Some(db) = args.db {
        config.store.db_path = db;
    }

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(path) = args.init_config {
        return Config::save_default(&path);
    }

    info!(
        "SupportSense Daemon v{} ({}, built {}) starting",
        VERSION, GIT_SHA, BUILD_DATE
    );
    match &config_source {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => warn!("No config file found, using defaults"),
    }

    let store = open_store(&config, args.memory)?;
    let state = AppState::new(store);

    server::run(state, &config.server).await
}

fn open_store(config: &Config, in_memory: bool) -> Result<Arc<dyn TicketStore>> {
    if in_memory {
        let store = if config.store.seed_samples {
            MemoryStore::with_tickets(sample_tickets(Utc::now()))
        } else {
            MemoryStore::new()
        };
        info!("Using in-memory ticket store ({} tickets)", store.len());
        return Ok(Arc::new(store));
    }

    let store = SqliteStore::open(&config.store.db_path)
        .context("Failed to open ticket database")?;
    if config.store.reset_on_start {
        store.reset()?;
    }
    if config.store.seed_samples {
        store.seed_samples()?;
    }
    Ok(Arc::new(store))
}
