//! Catalog persistence.
//!
//! # Tables
//!
//! - `product` - Sellable products (price, optional preview image)
//! - `category` - Product groupings
//! - `attribute` - Named properties, lowercased
//! - `variant` - Versions of a main product
//! - `product_category` - Product/category links; one active link per pair
//!
//! Every row is soft-deleted through `deleted_at` and every read filters on
//! it. Store functions take any [`sqlx::PgExecutor`], so the same call runs
//! standalone against the pool or inside a [`UnitOfWork`].
//!
//! # Schema
//!
//! The tables live in the schema named by `CATALOG_DB_SCHEMA`, which is put
//! on the `search_path` of every pooled connection. The fixture used by the
//! integration tests is `crates/api/migrations/0001_catalog.sql`.

pub mod attributes;
pub mod categories;
pub mod product_categories;
pub mod products;
pub mod unit_of_work;
pub mod variants;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use thiserror::Error;

use catalog_core::CursorError;

use crate::config::DatabaseConfig;

pub use unit_of_work::UnitOfWork;

/// Errors that can occur during store and unit-of-work operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No active row matched.
    #[error("not found")]
    NotFound,

    /// Unique or foreign-key constraint violation.
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Malformed pagination cursor.
    #[error("invalid cursor: {0}")]
    InvalidCursor(#[from] CursorError),

    /// Begin or commit failed.
    #[error("transaction failed: {0}")]
    Transaction(#[source] sqlx::Error),

    /// A step failed and the rollback that followed failed too.
    #[error("{cause} (rollback also failed: {rollback})")]
    RollbackFailed {
        cause: Box<RepositoryError>,
        #[source]
        rollback: sqlx::Error,
    },

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create the catalog connection pool.
///
/// Each new connection gets `SET search_path` to the configured schema.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let search_path = format!("SET search_path TO {}", config.schema);

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                conn.execute(search_path.as_str()).await?;
                Ok(())
            })
        })
        .connect(config.url.expose_secret())
        .await
}

/// Map an insert failure, turning constraint violations into `Conflict`.
pub(crate) fn insert_error(entity: &str, e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(format!("{entity} already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::Conflict(format!("{entity} references a missing row"));
        }
    }
    RepositoryError::Database(e)
}

/// Zero affected rows means the target was missing or already deleted.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` when `rows_affected` is zero.
pub const fn ensure_affected(rows_affected: u64) -> Result<(), RepositoryError> {
    if rows_affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_affected() {
        assert!(ensure_affected(1).is_ok());
        assert!(ensure_affected(3).is_ok());
        assert!(matches!(ensure_affected(0), Err(RepositoryError::NotFound)));
    }

    #[test]
    fn test_insert_error_passes_through_non_constraint_errors() {
        let err = insert_error("product", sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_rollback_failed_reports_both_errors() {
        let err = RepositoryError::RollbackFailed {
            cause: Box::new(RepositoryError::NotFound),
            rollback: sqlx::Error::PoolClosed,
        };
        let message = err.to_string();
        assert!(message.starts_with("not found"));
        assert!(message.contains("rollback also failed"));
    }

    #[test]
    fn test_cursor_error_converts() {
        let err: RepositoryError = catalog_core::decode_cursor("!!!!").unwrap_err().into();
        assert!(matches!(err, RepositoryError::InvalidCursor(_)));
    }
}
