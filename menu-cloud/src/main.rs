//! menu-cloud server binary

use std::net::SocketAddr;

use menu_cloud::{AppState, Config, api, bootstrap, logger, tasks};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logger::init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    tracing::info!(
        "Starting menu-cloud {} (env: {})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let state = AppState::new(&config).await?;

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        bootstrap::ensure_admin(&state.pool, email, password).await?;
    }

    tokio::fs::create_dir_all(&state.images_dir).await?;

    tasks::spawn_subscription_sweep(
        state.pool.clone(),
        config.subscription_sweep_secs,
        config.purge_grace_days,
    );
    tasks::spawn_rate_limit_cleanup(state.rate_limiter.clone());

    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("menu-cloud HTTP listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("menu-cloud stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
