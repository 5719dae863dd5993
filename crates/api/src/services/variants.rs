//! Variant service.
//!
//! Writes load the main product inside the same unit of work, so a missing
//! or deleted product fails the write with `NotFound` and the returned DTO
//! carries the product's name and image.

use sqlx::PgPool;
use tracing::instrument;

use catalog_core::{Page, PageRequest, Price, ProductId, VariantId};

use crate::db::{RepositoryError, UnitOfWork, ensure_affected, products, variants};
use crate::models::{Variant, VariantDetail, VariantDto};

/// Variant use cases.
#[derive(Debug, Clone)]
pub struct VariantService {
    pool: PgPool,
}

impl VariantService {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a variant of an active product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the main product is missing or
    /// deleted.
    #[instrument(skip(self, description))]
    pub async fn create_variant(
        &self,
        name: &str,
        description: &str,
        price: Price,
        product_id: ProductId,
    ) -> Result<VariantDto, RepositoryError> {
        let variant = Variant::new(product_id, name, description, price);

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            let product = products::get_by_id(uow.conn(), product_id).await?;
            variants::save(uow.conn(), &variant).await?;
            let detail = VariantDetail::with_product(variant, &product);
            Ok::<_, RepositoryError>(VariantDto::from(&detail))
        }
        .await;
        uow.finish(result).await
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the variant or its main product
    /// is missing or deleted.
    #[instrument(skip(self))]
    pub async fn get_variant(&self, id: VariantId) -> Result<VariantDto, RepositoryError> {
        let detail = variants::get_by_id(&self.pool, id).await?;
        Ok(VariantDto::from(&detail))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidCursor` if the cursor is malformed.
    #[instrument(skip(self))]
    pub async fn list_variants(
        &self,
        request: &PageRequest,
    ) -> Result<Page<VariantDto>, RepositoryError> {
        let page = variants::list_by_cursor(&self.pool, request).await?;
        Ok(page.map(|detail| VariantDto::from(&detail)))
    }

    /// Rewrite a variant, possibly moving it to another main product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the variant or the new main
    /// product is missing or deleted.
    #[instrument(skip(self, description))]
    pub async fn update_variant(
        &self,
        id: VariantId,
        name: &str,
        description: &str,
        price: Price,
        product_id: ProductId,
    ) -> Result<VariantDto, RepositoryError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            let VariantDetail { mut variant, .. } = variants::get_by_id(uow.conn(), id).await?;
            let product = products::get_by_id(uow.conn(), product_id).await?;
            variant.edit(product_id, name, description, price);
            ensure_affected(variants::edit(uow.conn(), &variant).await?)?;
            let detail = VariantDetail::with_product(variant, &product);
            Ok::<_, RepositoryError>(VariantDto::from(&detail))
        }
        .await;
        uow.finish(result).await
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the variant or its main product
    /// is missing or deleted.
    #[instrument(skip(self))]
    pub async fn delete_variant(&self, id: VariantId) -> Result<(), RepositoryError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            let VariantDetail { mut variant, .. } = variants::get_by_id(uow.conn(), id).await?;
            variant.retire();
            ensure_affected(variants::delete(uow.conn(), &variant).await?)
        }
        .await;
        uow.finish(result).await
    }
}
