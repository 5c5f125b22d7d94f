use std::sync::Arc;

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, http::HeaderValue};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use museum_api::auth::TokenIssuer;
use museum_api::config::{config, AppConfig};
use museum_api::database::{DatabaseManager, PgStore};
use museum_api::{app, is_production, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("museum_api=info,tower_http=info")),
        )
        .init();

    let config = config();
    info!("Starting Museum API in {:?} mode", config.environment);

    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        db.migrate().await.context("failed to apply migrations")?;
    }

    let tokens = TokenIssuer::from_config(&config.security).context("JWT_SECRET must be set")?;
    let state = AppState::with_store(Arc::new(PgStore::new(&db)), tokens, config.security.min_password_length);

    let app = app(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(config));

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Museum API listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;

    db.close().await;
    Ok(())
}

/// Permissive outside production, configured origins in production
fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !is_production!() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any)
}
