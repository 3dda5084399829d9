//! Service entry point: configuration, storage bootstrap, and the HTTP
//! server.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::files::DirLimerickStore;
use backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use backend::server::{ServerConfig, create_server};

/// Load the session signing key, falling back to a throwaway key only where
/// that is explicitly allowed.
fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;
    let database_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "users.db".into());
    let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());

    let db_pool = DbPool::new(PoolConfig::new(&database_path)).map_err(|e| {
        std::io::Error::other(format!("failed to open database at {database_path}: {e}"))
    })?;
    run_migrations(&db_pool)
        .map_err(|e| std::io::Error::other(format!("failed to initialise schema: {e}")))?;

    let limerick_store = DirLimerickStore::open(&upload_dir).map_err(|e| {
        std::io::Error::other(format!("failed to open upload directory {upload_dir}: {e}"))
    })?;

    info!(
        %bind_addr,
        database = %database_path,
        uploads = %upload_dir,
        "starting server"
    );

    let config = ServerConfig::new(
        key,
        cookie_secure,
        SameSite::Lax,
        bind_addr,
        db_pool,
        limerick_store,
    );
    create_server(config)?.await
}
