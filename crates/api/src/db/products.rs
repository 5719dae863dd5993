//! Product store.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;

use catalog_core::{Page, PageRequest, Price, ProductId};

use super::{RepositoryError, insert_error};
use crate::models::Product;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: Price,
    image: Option<Vec<u8>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Get an active product by ID.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no active product has this ID.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    id: ProductId,
) -> Result<Product, RepositoryError> {
    let row = sqlx::query_as::<_, ProductRow>(
        r"
        SELECT id, name, description, price, image, created_at, updated_at, deleted_at
        FROM product
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    row.map(Product::from).ok_or(RepositoryError::NotFound)
}

/// Insert a new product.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the ID is already taken.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn save<'e, E: PgExecutor<'e>>(
    executor: E,
    product: &Product,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO product (id, name, description, price, image, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ",
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.image.as_deref())
    .bind(product.created_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error("product", e))?;

    Ok(())
}

/// Overwrite the mutable fields of an active product.
///
/// Returns the number of rows affected (zero if the product is missing or
/// deleted).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn edit<'e, E: PgExecutor<'e>>(
    executor: E,
    product: &Product,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE product
        SET name = $2, description = $3, price = $4, image = $5, updated_at = $6
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.image.as_deref())
    .bind(product.updated_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Soft-delete an active product using its `deleted_at`.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete<'e, E: PgExecutor<'e>>(
    executor: E,
    product: &Product,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE product
        SET deleted_at = $2
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(product.id)
    .bind(product.deleted_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// One page of active products in creation order.
///
/// # Errors
///
/// Returns `RepositoryError::InvalidCursor` if the cursor is malformed.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_by_cursor<'e, E: PgExecutor<'e>>(
    executor: E,
    request: &PageRequest,
) -> Result<Page<Product>, RepositoryError> {
    let after = request.boundary()?;

    let rows = sqlx::query_as::<_, ProductRow>(
        r"
        SELECT id, name, description, price, image, created_at, updated_at, deleted_at
        FROM product
        WHERE created_at > $1 AND deleted_at IS NULL
        ORDER BY created_at, id
        LIMIT $2
        ",
    )
    .bind(after)
    .bind(i64::from(request.limit().get()))
    .fetch_all(executor)
    .await?;

    let products = rows.into_iter().map(Product::from).collect();
    Ok(Page::from_rows(products, request.limit(), |p| p.created_at))
}
