//! `SQLite` connection pool setup, startup retry and migration runner.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

const DEFAULT_MAX_CONNECTIONS: u32 = 2;
const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// Configuration for the `SQLite` storage adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:produk.db` or `sqlite::memory:`).
    pub database_url: String,
    /// Upper bound on open connections held by the pool.
    pub max_connections: u32,
    /// How many times to try opening the pool before giving up.
    pub connect_attempts: u32,
    /// Fixed pause between two connection attempts.
    pub retry_delay: Duration,
}

impl Config {
    /// Configuration for `database_url` with the default pool and retry limits.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_attempts: DEFAULT_CONNECT_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Opens the connection pool (creating the database file if missing),
    /// retrying up to `connect_attempts` times, then runs all pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unreachable`] once the retry budget is spent,
    /// or another [`StorageError`] if the URL is invalid or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        let pool = self.connect().await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Database { pool })
    }

    async fn connect(&self) -> Result<SqlitePool, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.database_url)?.create_if_missing(true);
        let max_attempts = self.connect_attempts.max(1);

        let mut attempt = 1;
        loop {
            let result = self.pool_options().connect_with(options.clone()).await;

            match result {
                Ok(pool) => {
                    tracing::info!(attempt, "database connected");
                    return Ok(pool);
                }
                Err(err) if attempt < max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %err,
                        delay = ?self.retry_delay,
                        "database connection failed, retrying"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                Err(source) => {
                    return Err(StorageError::Unreachable {
                        attempts: attempt,
                        source,
                    });
                }
            }
        }
    }
}

impl Config {
    /// Pool limits for this URL.
    ///
    /// Every connection to an in-memory database opens its own private
    /// database, so such pools hold exactly one connection that is never
    /// recycled.
    fn pool_options(&self) -> SqlitePoolOptions {
        let options = SqlitePoolOptions::new().acquire_timeout(ACQUIRE_TIMEOUT);
        if is_in_memory(&self.database_url) {
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            options
                .max_connections(self.max_connections.max(1))
                .max_lifetime(MAX_LIFETIME)
        }
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Holds the `SQLite` connection pool and provides access to it.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
