mod applications;
mod auth;
mod config;
mod dashboard;
mod db;
mod errors;
mod identity;
mod jobs;
mod models;
mod notifications;
mod profiles;
mod routes;
mod session;
mod shell;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::identity::GoTrueClient;
use crate::routes::build_router;
use crate::session::PgProfileDirectory;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails on missing required env vars
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job board API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    let identity = GoTrueClient::new(&config.auth_url, config.auth_anon_key.clone())
        .context("Failed to build identity provider client")?;
    info!("Identity provider client initialized ({})", config.auth_url);

    let profiles = PgProfileDirectory::new(db.clone());

    let state = AppState {
        db,
        identity: Arc::new(identity),
        profiles: Arc::new(profiles),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to SITE_URL once the frontend is deployed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
