//! Category service.

use sqlx::PgPool;
use tracing::instrument;

use catalog_core::{CategoryId, Page, PageRequest};

use crate::db::{RepositoryError, UnitOfWork, categories, ensure_affected, product_categories};
use crate::models::{Category, CategoryDto};

/// Category use cases.
#[derive(Debug, Clone)]
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert or the transaction fails.
    #[instrument(skip(self, description))]
    pub async fn create_category(
        &self,
        name: &str,
        description: &str,
    ) -> Result<CategoryDto, RepositoryError> {
        let category = Category::new(name, description);

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            categories::save(uow.conn(), &category).await?;
            Ok::<_, RepositoryError>(CategoryDto::from(&category))
        }
        .await;
        uow.finish(result).await
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category is missing or deleted.
    #[instrument(skip(self))]
    pub async fn get_category(&self, id: CategoryId) -> Result<CategoryDto, RepositoryError> {
        let category = categories::get_by_id(&self.pool, id).await?;
        Ok(CategoryDto::from(&category))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidCursor` if the cursor is malformed.
    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        request: &PageRequest,
    ) -> Result<Page<CategoryDto>, RepositoryError> {
        let page = categories::list_by_cursor(&self.pool, request).await?;
        Ok(page.map(|category| CategoryDto::from(&category)))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category is missing or deleted.
    #[instrument(skip(self, description))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        name: &str,
        description: &str,
    ) -> Result<CategoryDto, RepositoryError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            let mut category = categories::get_by_id(uow.conn(), id).await?;
            category.edit(name, description);
            ensure_affected(categories::edit(uow.conn(), &category).await?)?;
            Ok::<_, RepositoryError>(CategoryDto::from(&category))
        }
        .await;
        uow.finish(result).await
    }

    /// Soft-delete a category and retire every link to it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category is missing or deleted.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            let mut category = categories::get_by_id(uow.conn(), id).await?;
            category.retire();
            ensure_affected(categories::delete(uow.conn(), &category).await?)?;
            if let Some(deleted_at) = category.deleted_at {
                product_categories::delete_for_category(uow.conn(), id, deleted_at).await?;
            }
            Ok::<_, RepositoryError>(())
        }
        .await;
        uow.finish(result).await
    }
}
