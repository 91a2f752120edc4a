//! Server Configuration
//!
//! Flags and environment (a `.env` file is loaded first by `main`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::bail;
use auth::application::config::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_NAME};
use auth::{AuthConfig, BootstrapConfig};
use axum::http::HeaderValue;
use clap::{ArgAction, Parser, Subcommand};
use platform::database::DatabaseConfig;

/// Longest accepted admin token lifetime (one year)
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;

#[derive(Parser, Debug)]
#[command(name = "api")]
#[command(version, about = "Problem Tracker API server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: Config,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Replace the bootstrap admin credential, print it, and exit.
    RecreateAdmin,
}

#[derive(clap::Args, Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000, global = true)]
    pub port: u16,

    /// Address to bind.
    #[arg(long, env = "BIND_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED), global = true)]
    pub bind_addr: IpAddr,

    /// sqlx SQLite URL; `sqlite::memory:` keeps data for the process lifetime only.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://problems.db?mode=rwc", global = true)]
    pub database_url: String,

    /// Seconds allowed for connecting to the store.
    #[arg(long, env = "DB_CONNECT_TIMEOUT_SECS", default_value_t = 5, global = true)]
    pub db_connect_timeout_secs: u64,

    /// Exit if the store is unreachable at startup. When false, serve
    /// degraded and keep retrying in the background.
    #[arg(long, env = "STORE_FAIL_FAST", default_value_t = true, action = ArgAction::Set, global = true)]
    pub store_fail_fast: bool,

    /// HMAC secret for admin tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true, global = true)]
    pub jwt_secret: Option<String>,

    /// Admin token lifetime in hours.
    #[arg(
        long,
        env = "TOKEN_TTL_HOURS",
        default_value_t = 24,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TOKEN_TTL_HOURS),
        global = true
    )]
    pub token_ttl_hours: u64,

    /// Bootstrap admin email.
    #[arg(long, env = "ADMIN_EMAIL", default_value = DEFAULT_ADMIN_EMAIL, global = true)]
    pub admin_email: String,

    /// Bootstrap admin display name.
    #[arg(long, env = "ADMIN_NAME", default_value = DEFAULT_ADMIN_NAME, global = true)]
    pub admin_name: String,

    /// Bootstrap admin password. Generated and logged once when unset.
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true, global = true)]
    pub admin_password: Option<String>,

    /// Comma-separated origins allowed by CORS.
    #[arg(
        long,
        env = "FRONTEND_ORIGINS",
        default_value = "http://localhost:3000,http://127.0.0.1:3000",
        global = true
    )]
    pub frontend_origins: String,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long, global = true)]
    pub log_json: bool,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            connect_timeout: Duration::from_secs(self.db_connect_timeout_secs),
            ..DatabaseConfig::new(&self.database_url)
        }
    }

    pub fn bootstrap(&self) -> BootstrapConfig {
        BootstrapConfig {
            email: self.admin_email.clone(),
            name: Some(self.admin_name.clone()),
            password: self.admin_password.clone().filter(|p| !p.is_empty()),
        }
    }

    /// Auth settings for serving. Release builds refuse to run without
    /// `JWT_SECRET`; debug builds fall back to a per-process random secret.
    pub fn auth_config(&self) -> anyhow::Result<AuthConfig> {
        let base = match self.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => AuthConfig::new(secret.as_bytes()),
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set; using a random secret, tokens will not survive a restart");
                AuthConfig::with_random_secret()
            }
            None => bail!("JWT_SECRET must be set"),
        };

        let ttl_secs = match self.token_ttl_hours.checked_mul(3600) {
            Some(secs) if (1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) => secs,
            _ => bail!(
                "TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS} (got {})",
                self.token_ttl_hours
            ),
        };

        Ok(base
            .with_token_ttl(Duration::from_secs(ttl_secs))
            .with_bootstrap(self.bootstrap()))
    }

    pub fn allowed_origins(&self) -> Vec<HeaderValue> {
        self.frontend_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| origin.parse().ok())
            .collect()
    }
}
