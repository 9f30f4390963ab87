use std::io;
use configs::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info,sqlx=warn,sea_orm=warn";

fn env_filter(fallback: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.unwrap_or(DEFAULT_FILTER)))
}

/// Initialize tracing subscriber with compact human readable output on stdout.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info` with sqlx/sea_orm statement noise capped at `warn`
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter(None))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize from the `[logging]` section of the app config.
pub fn init_logging(cfg: &LoggingConfig) {
    let filter = env_filter(cfg.filter.as_deref());
    let _ = match cfg.format {
        LogFormat::Compact => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .with_writer(io::stdout)
            .try_init(),
        LogFormat::Json => fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .with_writer(io::stdout)
            .try_init(),
    };
}
