//! Pet-hospital owner registry server.
//!
//! Wires the PostgreSQL-backed stores into the auth and session managers and
//! serves the HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use pico_args::Arguments;

use pet_hospital::{
    auth::{AuthManager, PasswordHasher, SessionManager},
    db::{Database, PgOwnerRepository, PgSessionRepository, PgUserRepository},
};
use ph_server::{api, config::ServerConfig, logging};

const HELP: &str = "\
Run the pet-hospital owner registry server

USAGE:
  ph_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:3000]
  --db-url     URL         Database connection string  [default: env DATABASE_URL or postgres://postgres@localhost/pet_hospital]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL             PostgreSQL connection string
  PASSWORD_PEPPER          Password hashing pepper (required)
  SESSION_TTL_SECS         Session lifetime in seconds [default: 7 days]
  (See .env file for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let database_url_override: Option<String> = pargs.opt_value_from_str("--db-url")?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, database_url_override)?;
    config.validate()?;

    tracing::info!("Connecting to database: {}", config.database.database_url);
    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    tracing::info!("Database connected successfully");

    let pool = db.pool().clone();
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let sessions = Arc::new(PgSessionRepository::new(pool.clone()));
    let owners = Arc::new(PgOwnerRepository::new(pool));

    // The work factor and pepper are fixed for the life of the process.
    let hasher = PasswordHasher::new(config.security.password_pepper.clone());
    let auth = Arc::new(AuthManager::new(users.clone(), hasher));
    let session_manager = Arc::new(SessionManager::new(
        sessions,
        users,
        config.security.session_ttl_secs,
    ));

    let state = api::AppState {
        auth,
        sessions: session_manager,
        owners,
        session_ttl_secs: config.security.session_ttl_secs,
    };

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    tracing::info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    db.close().await;
    tracing::info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
