//! Server binary: reads settings, prepares the database, serves the API.

use catalog_api::{app, ensure_database_exists, ensure_tables, AppState, PasswordHasher, Settings, TokenService};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    ensure_tables(&pool).await?;

    let tokens = TokenService::new(&settings.jwt_secret, settings.token_ttl);
    let state = AppState::postgres(pool, tokens, PasswordHasher::new(settings.bcrypt_cost));
    let router = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(settings.bind_addr.as_str()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}
