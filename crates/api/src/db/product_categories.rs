//! Product/category link store.
//!
//! Reads join both the product and the category; a link is only visible
//! while all three rows are active. The partial unique index
//! `product_category_active_pair` backs the one-active-link-per-pair rule.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;

use catalog_core::{CategoryId, Page, PageRequest, ProductCategoryId, ProductId};

use super::{RepositoryError, insert_error};
use crate::models::{ProductCategory, ProductCategoryDetail};

#[derive(Debug, sqlx::FromRow)]
struct LinkDetailRow {
    id: ProductCategoryId,
    product_id: ProductId,
    category_id: CategoryId,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
    category_name: String,
    category_description: String,
}

impl From<LinkDetailRow> for ProductCategoryDetail {
    fn from(row: LinkDetailRow) -> Self {
        Self {
            link: ProductCategory {
                id: row.id,
                product_id: row.product_id,
                category_id: row.category_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
                deleted_at: row.deleted_at,
            },
            category_name: row.category_name,
            category_description: row.category_description,
        }
    }
}

const SELECT_DETAIL: &str = r"
    SELECT pc.id, pc.product_id, pc.category_id,
           pc.created_at, pc.updated_at, pc.deleted_at,
           c.name AS category_name, c.description AS category_description
    FROM product_category pc
    JOIN product p ON p.id = pc.product_id
    JOIN category c ON c.id = pc.category_id
    WHERE pc.deleted_at IS NULL AND p.deleted_at IS NULL AND c.deleted_at IS NULL
";

/// Get an active link by its own ID.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no visible link has this ID.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    id: ProductCategoryId,
) -> Result<ProductCategoryDetail, RepositoryError> {
    sqlx::query_as::<_, LinkDetailRow>(&format!("{SELECT_DETAIL} AND pc.id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .map(ProductCategoryDetail::from)
        .ok_or(RepositoryError::NotFound)
}

/// Get the active link between a product and a category.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the pair is not linked.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_product_and_category<'e, E: PgExecutor<'e>>(
    executor: E,
    product_id: ProductId,
    category_id: CategoryId,
) -> Result<ProductCategoryDetail, RepositoryError> {
    sqlx::query_as::<_, LinkDetailRow>(&format!(
        "{SELECT_DETAIL} AND pc.product_id = $1 AND pc.category_id = $2"
    ))
    .bind(product_id)
    .bind(category_id)
    .fetch_optional(executor)
    .await?
    .map(ProductCategoryDetail::from)
    .ok_or(RepositoryError::NotFound)
}

/// All active links of a product, oldest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_by_product<'e, E: PgExecutor<'e>>(
    executor: E,
    product_id: ProductId,
) -> Result<Vec<ProductCategoryDetail>, RepositoryError> {
    let rows = sqlx::query_as::<_, LinkDetailRow>(&format!(
        "{SELECT_DETAIL} AND pc.product_id = $1 ORDER BY pc.created_at, pc.id"
    ))
    .bind(product_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(ProductCategoryDetail::from).collect())
}

/// Insert a new link.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the pair already has an active link
/// or either side does not exist.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn save<'e, E: PgExecutor<'e>>(
    executor: E,
    link: &ProductCategory,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO product_category (id, product_id, category_id, created_at)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(link.id)
    .bind(link.product_id)
    .bind(link.category_id)
    .bind(link.created_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error("product category link", e))?;

    Ok(())
}

/// Re-point an active link.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the new pair is already linked.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn edit<'e, E: PgExecutor<'e>>(
    executor: E,
    link: &ProductCategory,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE product_category
        SET product_id = $2, category_id = $3, updated_at = $4
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(link.id)
    .bind(link.product_id)
    .bind(link.category_id)
    .bind(link.updated_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error("product category link", e))?;

    Ok(result.rows_affected())
}

/// Soft-delete an active link.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete<'e, E: PgExecutor<'e>>(
    executor: E,
    link: &ProductCategory,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE product_category
        SET deleted_at = $2
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(link.id)
    .bind(link.deleted_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Soft-delete every active link of a product. Returns how many were retired.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete_for_product<'e, E: PgExecutor<'e>>(
    executor: E,
    product_id: ProductId,
    deleted_at: DateTime<Utc>,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE product_category
        SET deleted_at = $2
        WHERE product_id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(product_id)
    .bind(deleted_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Soft-delete every active link of a category. Returns how many were retired.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete_for_category<'e, E: PgExecutor<'e>>(
    executor: E,
    category_id: CategoryId,
    deleted_at: DateTime<Utc>,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE product_category
        SET deleted_at = $2
        WHERE category_id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(category_id)
    .bind(deleted_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// One page of visible links in creation order.
///
/// # Errors
///
/// Returns `RepositoryError::InvalidCursor` if the cursor is malformed.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_by_cursor<'e, E: PgExecutor<'e>>(
    executor: E,
    request: &PageRequest,
) -> Result<Page<ProductCategoryDetail>, RepositoryError> {
    let after = request.boundary()?;

    let rows = sqlx::query_as::<_, LinkDetailRow>(&format!(
        "{SELECT_DETAIL} AND pc.created_at > $1 ORDER BY pc.created_at, pc.id LIMIT $2"
    ))
    .bind(after)
    .bind(i64::from(request.limit().get()))
    .fetch_all(executor)
    .await?;

    let links = rows.into_iter().map(ProductCategoryDetail::from).collect();
    Ok(Page::from_rows(links, request.limit(), |l| l.link.created_at))
}
