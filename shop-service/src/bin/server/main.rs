use std::sync::Arc;

use auth::Authenticator;
use shop_service::config::Config;
use shop_service::inbound::http::router::create_router;
use shop_service::inbound::http::router::AppState;
use shop_service::outbound::repositories::PostgresStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shop_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "shop-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        token_ttl_hours = config.jwt.expiration_hours,
        hash_cost = config.hashing.cost,
        "Configuration loaded"
    );

    // Bad secret or cost stops startup here.
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.hashing.cost,
        config.jwt.expiration_hours,
    )?);

    let store = PostgresStore::connect(&config.database).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        statement_timeout_ms = config.database.statement_timeout_ms,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(store.pool()).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let state = AppState::new(&store, authenticator);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, config.server.request_timeout());

    let served = axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;

    match served {
        Ok(()) => tracing::info!("Server exited successfully"),
        Err(ref e) => tracing::error!(error = %e, "Server error"),
    };

    Ok(served?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
