//! Process configuration: CLI flags over environment defaults.

use std::net::SocketAddr;

use actix_web::cookie::Key;
use clap::Parser;
use tracing::warn;

/// Runtime configuration for the backend process.
#[derive(Debug, Clone, Parser)]
#[command(name = "backend", about = "Social backend for gamers")]
pub struct AppConfig {
    /// Socket address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum pooled database connections.
    #[arg(long, env = "DB_POOL_MAX", default_value_t = 10)]
    pub pool_max: u32,

    /// File holding the session key material.
    #[arg(
        long,
        env = "SESSION_KEY_FILE",
        default_value = "/var/run/secrets/session_key"
    )]
    pub session_key_file: String,

    /// Allow an ephemeral session key when the key file is unreadable.
    /// Sessions then die with the process; never enable in production.
    #[arg(long, env = "SESSION_ALLOW_EPHEMERAL", default_value_t = false)]
    pub session_allow_ephemeral: bool,

    /// Set session cookies with the Secure attribute.
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = true, action = clap::ArgAction::Set)]
    pub cookie_secure: bool,

    /// Apply pending schema migrations at startup.
    #[arg(long, env = "RUN_MIGRATIONS", default_value_t = true, action = clap::ArgAction::Set)]
    pub run_migrations: bool,
}

impl AppConfig {
    /// Load the session key from the configured file, falling back to a
    /// generated key in debug builds or when explicitly allowed.
    pub fn load_session_key(&self) -> std::io::Result<Key> {
        match std::fs::read(&self.session_key_file) {
            Ok(bytes) => Ok(Key::derive_from(&bytes)),
            Err(err) => {
                if cfg!(debug_assertions) || self.session_allow_ephemeral {
                    warn!(
                        path = %self.session_key_file,
                        error = %err,
                        "using temporary session key (dev only)"
                    );
                    Ok(Key::generate())
                } else {
                    Err(std::io::Error::other(format!(
                        "failed to read session key at {}: {err}",
                        self.session_key_file
                    )))
                }
            }
        }
    }
}
