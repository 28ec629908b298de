use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memo_api::auth::{SupabaseAuth, SupabaseAuthConfig};
use memo_api::services::{GenerationService, NoteService, Repositories, ViewCache};
use memo_api::{build_rate_limiter, build_router, AppState, ServerConfig};
use memo_core::AuthProvider;
use memo_db::{log_pool_metrics, Database, PoolConfig};
use memo_inference::{AiGateway, CallLogger, GeminiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "memo_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "memo_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("memo-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let config = ServerConfig::from_env()?;

    // Storage
    let db = Database::connect(&config.database_url, PoolConfig::from_env()).await?;
    db.migrate().await?;
    log_pool_metrics(db.pool());
    info!("Database ready");

    // AI
    let call_log = Arc::new(CallLogger::new());
    let gateway = AiGateway::initialize(&GeminiConfig::from_env(), &call_log);
    let generation = GenerationService::new(gateway, call_log.clone());

    // Auth
    let auth: Arc<dyn AuthProvider> = match SupabaseAuthConfig::from_env() {
        Ok(auth_config) => Arc::new(SupabaseAuth::new(auth_config)),
        Err(e) => {
            warn!(error = %e, "Auth provider not configured; every request is anonymous");
            Arc::new(memo_api::auth::StaticAuth::new())
        }
    };

    let rate_limiter = build_rate_limiter(&config.rate_limit);
    if rate_limiter.is_some() {
        info!(
            requests = config.rate_limit.requests,
            period_secs = config.rate_limit.period.as_secs(),
            "Rate limiting enabled"
        );
    }

    let notes = NoteService::new(
        Repositories::from_database(&db),
        generation.clone(),
        ViewCache::new(config.view_cache_capacity),
    );
    let state = AppState {
        notes,
        generation,
        call_log,
        auth,
        rate_limiter,
    };

    let app = build_router(state, &config);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
