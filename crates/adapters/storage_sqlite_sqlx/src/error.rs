//! Storage-specific error type wrapping sqlx errors.

use irhub_domain::error::IrHubError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The database could not be opened.
    #[error("could not open database {url}")]
    Open {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for IrHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
