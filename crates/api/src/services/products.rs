//! Product service.

use sqlx::PgPool;
use tracing::instrument;

use catalog_core::{CategoryId, Page, PageRequest, Price, ProductId};

use super::category_links::{self, ReconcileOutcome};
use crate::db::{RepositoryError, UnitOfWork, ensure_affected, product_categories, products};
use crate::models::{CategoryDto, Product, ProductCategoryDto, ProductDetailDto, ProductDto};

/// Product use cases. Every write runs in its own unit of work.
#[derive(Debug, Clone)]
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert or the transaction fails.
    #[instrument(skip(self, description))]
    pub async fn create_product(
        &self,
        name: &str,
        description: &str,
        price: Price,
    ) -> Result<ProductDto, RepositoryError> {
        let product = Product::new(name, description, price);

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            products::save(uow.conn(), &product).await?;
            Ok::<_, RepositoryError>(ProductDto::from(&product))
        }
        .await;
        uow.finish(result).await
    }

    /// Fetch a product with its active categories.
    ///
    /// Two plain reads; no partial detail is returned if the second fails.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is missing or deleted.
    #[instrument(skip(self))]
    pub async fn get_product_detail(&self, id: ProductId) -> Result<ProductDetailDto, RepositoryError> {
        let product = products::get_by_id(&self.pool, id).await?;
        let links = product_categories::list_by_product(&self.pool, id).await?;

        Ok(ProductDetailDto {
            product: ProductDto::from(&product),
            categories: links.iter().map(CategoryDto::from).collect(),
            attributes: Vec::new(),
        })
    }

    /// One page of products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidCursor` if the cursor is malformed.
    #[instrument(skip(self))]
    pub async fn list_products(&self, request: &PageRequest) -> Result<Page<ProductDto>, RepositoryError> {
        let page = products::list_by_cursor(&self.pool, request).await?;
        Ok(page.map(|product| ProductDto::from(&product)))
    }

    /// Rewrite a product's name, description and price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is missing or deleted.
    #[instrument(skip(self, description))]
    pub async fn update_product(
        &self,
        id: ProductId,
        name: &str,
        description: &str,
        price: Price,
    ) -> Result<ProductDto, RepositoryError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            let mut product = products::get_by_id(uow.conn(), id).await?;
            product.edit(name, description, price);
            ensure_affected(products::edit(uow.conn(), &product).await?)?;
            Ok::<_, RepositoryError>(ProductDto::from(&product))
        }
        .await;
        uow.finish(result).await
    }

    /// Replace a product's preview image with opaque bytes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is missing or deleted.
    #[instrument(skip(self, image), fields(image_len = image.len()))]
    pub async fn update_product_image(
        &self,
        id: ProductId,
        image: Vec<u8>,
    ) -> Result<ProductDto, RepositoryError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            let mut product = products::get_by_id(uow.conn(), id).await?;
            product.replace_image(image);
            ensure_affected(products::edit(uow.conn(), &product).await?)?;
            Ok::<_, RepositoryError>(ProductDto::from(&product))
        }
        .await;
        uow.finish(result).await
    }

    /// Soft-delete a product and retire its category links.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is missing or deleted.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            let mut product = products::get_by_id(uow.conn(), id).await?;
            product.retire();
            ensure_affected(products::delete(uow.conn(), &product).await?)?;
            if let Some(deleted_at) = product.deleted_at {
                product_categories::delete_for_product(uow.conn(), id, deleted_at).await?;
            }
            Ok::<_, RepositoryError>(())
        }
        .await;
        uow.finish(result).await
    }

    /// Link a product to categories. Already linked categories are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product or a category is
    /// missing. Nothing is linked on error.
    pub async fn add_categories(
        &self,
        id: ProductId,
        category_ids: &[CategoryId],
    ) -> Result<ReconcileOutcome, RepositoryError> {
        self.reconcile_categories(id, category_ids, &[]).await
    }

    /// Unlink a product from categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is missing or any
    /// category is not linked. Nothing is unlinked on error.
    pub async fn remove_categories(
        &self,
        id: ProductId,
        category_ids: &[CategoryId],
    ) -> Result<ReconcileOutcome, RepositoryError> {
        self.reconcile_categories(id, &[], category_ids).await
    }

    /// Apply additions then removals to a product's categories atomically.
    ///
    /// # Errors
    ///
    /// See [`category_links::reconcile`]. Also returns
    /// `RepositoryError::NotFound` if the product is missing or deleted.
    #[instrument(skip(self, to_add, to_remove), fields(to_add = to_add.len(), to_remove = to_remove.len()))]
    pub async fn reconcile_categories(
        &self,
        id: ProductId,
        to_add: &[CategoryId],
        to_remove: &[CategoryId],
    ) -> Result<ReconcileOutcome, RepositoryError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let result = async {
            products::get_by_id(uow.conn(), id).await?;
            category_links::reconcile(uow.conn(), id, to_add, to_remove).await
        }
        .await;
        uow.finish(result).await
    }

    /// One page of active product/category links.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidCursor` if the cursor is malformed.
    #[instrument(skip(self))]
    pub async fn list_category_links(
        &self,
        request: &PageRequest,
    ) -> Result<Page<ProductCategoryDto>, RepositoryError> {
        let page = product_categories::list_by_cursor(&self.pool, request).await?;
        Ok(page.map(|detail| ProductCategoryDto::from(&detail)))
    }
}
