//! Storage-specific error type wrapping sqlx errors.

use produk_domain::error::ProdukError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Every startup connection attempt failed.
    #[error("database unreachable after {attempts} attempts")]
    Unreachable {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for ProdukError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
