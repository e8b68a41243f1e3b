//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup uses this module to create the shared SQLx pool and enforce schema
//! migrations before accepting API traffic. The database may still be booting
//! alongside the server, so connecting is retried a bounded number of times.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::warn;

use crate::config::{DB_CONNECT_RETRY_INTERVAL, ServerConfig};

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns the last connection error once every attempt has failed, or a
/// migration error.
pub async fn init_pool(config: &ServerConfig) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 1;
    let pool = loop {
        let result = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await;
        match result {
            Ok(pool) => break pool,
            Err(e) if attempt < config.db_connect_attempts => {
                warn!(attempt, max_attempts = config.db_connect_attempts, error = %e, "database not ready; retrying");
                attempt += 1;
                tokio::time::sleep(DB_CONNECT_RETRY_INTERVAL).await;
            }
            Err(e) => return Err(e),
        }
    };

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}
