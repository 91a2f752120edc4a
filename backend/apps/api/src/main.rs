//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::sync::Arc;

use anyhow::Context;
use api::config::{Cli, Command, Config};
use api::{AppState, build_router, cors_layer, startup};
use auth::{AuthConfig, BootstrapUseCase, SqliteAdminRepository};
use clap::Parser;
use platform::database::{self, Database};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.config.log_json);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cli.config).await,
        Command::RecreateAdmin => recreate_admin(cli.config).await,
    }
}

fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "api=info,auth=info,problems=info,platform=info,tower_http=info".into()
    });

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let auth_config = config.auth_config()?;
    let db_config = config.database_config();

    let db = Database::pending();
    let state = AppState::new(db.clone(), auth_config);

    if config.store_fail_fast {
        startup::connect_store(&db, &db_config)
            .await
            .context("Failed to connect to the store")?;
        startup::bootstrap_admin(&state.auth).await;
    } else {
        startup::spawn_store_reconnect(db.clone(), db_config, state.auth.clone());
    }

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.allowed_origins()));

    let addr = config.socket_addr();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), %addr, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Recovery path for when nobody can log in
async fn recreate_admin(config: Config) -> anyhow::Result<()> {
    let pool = database::connect(&config.database_config())
        .await
        .context("Failed to connect to the store")?;
    let db = Database::ready(pool);

    // Tokens are not issued here, so any secret will do
    let auth_config = AuthConfig::with_random_secret().with_bootstrap(config.bootstrap());
    let use_case = BootstrapUseCase::new(
        Arc::new(SqliteAdminRepository::new(db.clone())),
        Arc::new(auth_config),
    );

    let recreated = use_case.recreate().await?;
    db.close().await;

    println!("Admin recreated");
    println!("  email:    {}", recreated.email);
    println!("  password: {}", recreated.password);

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
