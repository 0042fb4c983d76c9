//! Gym Portal server binary.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use gym_portal::adapters::http::CookieSettings;
use gym_portal::adapters::{
    build_router, GymAppState, InMemorySessionStore, PostgresConnector, SessionCookieSigner,
};
use gym_portal::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info", false);
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.server.log_level, config.is_production());

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let connector = PostgresConnector::from_config(&config.database)?;
    let sessions = InMemorySessionStore::new(config.session.idle_timeout());
    let cookies = CookieSettings {
        name: config.session.cookie_name.clone(),
        signer: SessionCookieSigner::new(config.session.secret_key.clone()),
        secure: config.is_production(),
    };

    let state = GymAppState::new(Arc::new(connector), Arc::new(sessions), cookies);
    let app = build_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        database_host = %config.database.host,
        database = %config.database.dbname,
        "Gym portal listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured level.
fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = if json {
        builder.json().with_target(false).try_init()
    } else {
        builder.try_init()
    };
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
