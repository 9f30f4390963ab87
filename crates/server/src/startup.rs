use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Where the running configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(String),
    /// No file at the given path; `SERVER_*` / `DATABASE_URL` were used instead.
    Environment(String),
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise env vars.
/// A file that exists but fails to parse or validate is an error.
pub fn load_config() -> anyhow::Result<(AppConfig, ConfigSource)> {
    dotenv().ok();
    load_config_from(&configs::config_path())
}

fn load_config_from(path: &str) -> anyhow::Result<(AppConfig, ConfigSource)> {
    if !Path::new(path).exists() {
        return Ok((AppConfig::from_env()?, ConfigSource::Environment(path.to_string())));
    }
    Ok((AppConfig::load_and_validate(path)?, ConfigSource::File(path.to_string())))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Connect, optionally migrate, and build the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }
    Ok(routes::build_router(ServerState::new(db), build_cors()))
}

/// Public entry: build the app and run the HTTP server. Logging is expected
/// to be initialised by the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting salon admin server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
