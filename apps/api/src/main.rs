mod compare;
mod config;
mod directory;
mod errors;
mod genome;
mod routes;
mod state;
mod upstream;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::genome::assembler::GenomeAssembler;
use crate::genome::percentile::{PercentileEngine, ReferenceTable};
use crate::routes::build_router;
use crate::state::AppState;
use crate::upstream::GenomeClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Radar API v{}", env!("CARGO_PKG_VERSION"));

    let table = load_reference_table(&config)?;
    if table.is_empty() {
        warn!("Percentile reference table has no skill rows; every skill scores on the default row");
    } else {
        info!("Percentile reference table loaded ({} skills)", table.len());
    }

    let engine = PercentileEngine::new(Arc::new(table), config.percentile_jitter);
    let assembler = GenomeAssembler::new(engine, config.max_skills);

    let client = GenomeClient::new(
        &config.upstream_base_url,
        Duration::from_secs(config.upstream_timeout_secs),
    )?;
    info!("Upstream client initialized ({})", config.upstream_base_url);

    let state = AppState {
        source: Arc::new(client),
        assembler: Arc::new(assembler),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Built-in table unless `PERCENTILE_TABLE_PATH` points at a replacement.
fn load_reference_table(config: &Config) -> Result<ReferenceTable> {
    let Some(path) = &config.percentile_table_path else {
        return Ok(ReferenceTable::builtin());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading percentile table {}", path.display()))?;
    ReferenceTable::from_json_str(&json)
        .with_context(|| format!("parsing percentile table {}", path.display()))
}
