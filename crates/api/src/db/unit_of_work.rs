//! Transaction-scoped unit of work.
//!
//! A [`UnitOfWork`] owns one open transaction. Store calls borrow its
//! connection through [`UnitOfWork::conn`]; the work ends with exactly one of
//! commit or rollback via [`UnitOfWork::finish`].
//!
//! ```ignore
//! let mut uow = UnitOfWork::begin(&pool).await?;
//! let result = async {
//!     let mut product = products::get_by_id(uow.conn(), id).await?;
//!     product.retire();
//!     ensure_affected(products::delete(uow.conn(), &product).await?)?;
//!     Ok::<_, RepositoryError>(())
//! }
//! .await;
//! uow.finish(result).await
//! ```
//!
//! Dropping a `UnitOfWork` without finishing it (for example when a request
//! times out and its future is dropped) rolls the transaction back.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::{debug, error};

use super::RepositoryError;

/// One open transaction.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    /// Begin a transaction on a pooled connection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Transaction` if no connection is available or
    /// `BEGIN` fails.
    pub async fn begin(pool: &PgPool) -> Result<Self, RepositoryError> {
        let tx = pool.begin().await.map_err(RepositoryError::Transaction)?;
        debug!("unit of work began");
        Ok(Self { tx })
    }

    /// The transaction's connection, to pass to store functions.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut *self.tx
    }

    /// Commit on `Ok`, roll back on `Err`, and return the final outcome.
    ///
    /// # Errors
    ///
    /// - the original error when the work failed and was rolled back
    /// - `RepositoryError::RollbackFailed` when the rollback failed too
    /// - `RepositoryError::Transaction` when the commit failed
    pub async fn finish<T>(self, result: Result<T, RepositoryError>) -> Result<T, RepositoryError> {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(cause) => Err(self.rollback(cause).await),
        }
    }

    /// Commit the transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Transaction` if `COMMIT` fails.
    pub async fn commit(self) -> Result<(), RepositoryError> {
        self.tx.commit().await.map_err(|e| {
            error!(error = %e, "unit of work commit failed");
            RepositoryError::Transaction(e)
        })?;
        debug!("unit of work committed");
        Ok(())
    }

    /// Roll back because of `cause`, returning the error to report.
    pub async fn rollback(self, cause: RepositoryError) -> RepositoryError {
        match self.tx.rollback().await {
            Ok(()) => {
                debug!(cause = %cause, "unit of work rolled back");
                cause
            }
            Err(rollback) => {
                error!(cause = %cause, error = %rollback, "unit of work rollback failed");
                RepositoryError::RollbackFailed {
                    cause: Box::new(cause),
                    rollback,
                }
            }
        }
    }
}
