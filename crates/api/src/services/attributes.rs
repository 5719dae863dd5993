//! Attribute service.

use sqlx::PgPool;
use tracing::instrument;

use catalog_core::{AttributeId, Page, PageRequest};

use crate::db::{RepositoryError, UnitOfWork, attributes, ensure_affected};
use crate::models::{Attribute, AttributeDto};

/// Attribute use cases. Names are lowercased on every write.
#[derive(Debug, Clone)]
pub struct AttributeService {
    pool: PgPool,
}

impl AttributeService {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert or the transaction fails.
    #[instrument(skip(self))]
    pub async fn create_attribute(&self, name: &str) -> Result<AttributeDto, RepositoryError> {
        let attribute = Attribute::new(name);

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            attributes::save(uow.conn(), &attribute).await?;
            Ok::<_, RepositoryError>(AttributeDto::from(&attribute))
        }
        .await;
        uow.finish(result).await
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the attribute is missing or deleted.
    #[instrument(skip(self))]
    pub async fn get_attribute(&self, id: AttributeId) -> Result<AttributeDto, RepositoryError> {
        let attribute = attributes::get_by_id(&self.pool, id).await?;
        Ok(AttributeDto::from(&attribute))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidCursor` if the cursor is malformed.
    #[instrument(skip(self))]
    pub async fn list_attributes(
        &self,
        request: &PageRequest,
    ) -> Result<Page<AttributeDto>, RepositoryError> {
        let page = attributes::list_by_cursor(&self.pool, request).await?;
        Ok(page.map(|attribute| AttributeDto::from(&attribute)))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the attribute is missing or deleted.
    #[instrument(skip(self))]
    pub async fn rename_attribute(
        &self,
        id: AttributeId,
        name: &str,
    ) -> Result<AttributeDto, RepositoryError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            let mut attribute = attributes::get_by_id(uow.conn(), id).await?;
            attribute.rename(name);
            ensure_affected(attributes::edit(uow.conn(), &attribute).await?)?;
            Ok::<_, RepositoryError>(AttributeDto::from(&attribute))
        }
        .await;
        uow.finish(result).await
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the attribute is missing or deleted.
    #[instrument(skip(self))]
    pub async fn delete_attribute(&self, id: AttributeId) -> Result<(), RepositoryError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            let mut attribute = attributes::get_by_id(uow.conn(), id).await?;
            attribute.retire();
            ensure_affected(attributes::delete(uow.conn(), &attribute).await?)
        }
        .await;
        uow.finish(result).await
    }
}
