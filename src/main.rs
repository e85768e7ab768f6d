use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use teamstats::{build_router, AppConfig, AppState, StorageBackend};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teamstats=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting team statistics server");

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr;

    let app_state = match config.storage.clone() {
        StorageBackend::Postgres { database_url } => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await
                .context("failed to connect to database")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to run database migrations")?;

            info!("Using PostgreSQL storage");
            AppState::postgres(config, pool)
        }
        StorageBackend::InMemory => {
            warn!("DATABASE_URL not set, data is kept in memory only");
            AppState::in_memory(config)
        }
    };

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Server running on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
