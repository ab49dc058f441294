//! `SQLite` connection pool setup and migration runner.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::StorageError;

/// Pool size used by [`Config::new`].
pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;

/// Lock wait used by [`Config::new`].
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the `SQLite` storage adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:irhub.db` or `sqlite::memory:`).
    pub database_url: String,
    /// Upper bound of pooled connections. Ignored for in-memory databases,
    /// which always use a single connection.
    pub max_connections: u32,
    /// How long a writer waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl Config {
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the database file if missing, opens the pool and runs all
    /// pending migrations. File databases use WAL journaling.
    ///
    /// # Errors
    ///
    /// [`StorageError::Open`] when the URL is malformed or the database
    /// cannot be opened, [`StorageError::Migration`] when a migration fails.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self).await
    }

    // Every connection to `:memory:` gets its own empty database, so the
    // pool must hold exactly one connection and never recycle it.
    fn in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

/// Holds the `SQLite` connection pool.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn initialize(config: &Config) -> Result<Self, StorageError> {
        let open_error = |source: sqlx::Error| StorageError::Open {
            url: config.database_url.clone(),
            source,
        };

        let mut options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(open_error)?
            .create_if_missing(true)
            .busy_timeout(config.busy_timeout);

        let pool_options = if config.in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            options = options.journal_mode(SqliteJournalMode::Wal);
            SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(open_error)?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!(
            url = %config.database_url,
            max_connections = pool.options().get_max_connections(),
            "database ready"
        );
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
