//! Variant store.
//!
//! Reads join the main product and only return variants whose product is
//! still active; a variant of a deleted product is invisible even though its
//! own row is untouched.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;

use catalog_core::{Page, PageRequest, Price, ProductId, VariantId};

use super::{RepositoryError, insert_error};
use crate::models::{Variant, VariantDetail};

#[derive(Debug, sqlx::FromRow)]
struct VariantDetailRow {
    id: VariantId,
    product_id: ProductId,
    name: String,
    description: String,
    price: Price,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
    product_name: String,
    product_image: Option<Vec<u8>>,
}

impl From<VariantDetailRow> for VariantDetail {
    fn from(row: VariantDetailRow) -> Self {
        Self {
            variant: Variant {
                id: row.id,
                product_id: row.product_id,
                name: row.name,
                description: row.description,
                price: row.price,
                created_at: row.created_at,
                updated_at: row.updated_at,
                deleted_at: row.deleted_at,
            },
            product_name: row.product_name,
            product_image: row.product_image,
        }
    }
}

/// Get an active variant of an active product by ID.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the variant or its product is
/// missing or deleted.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    id: VariantId,
) -> Result<VariantDetail, RepositoryError> {
    sqlx::query_as::<_, VariantDetailRow>(
        r"
        SELECT v.id, v.product_id, v.name, v.description, v.price,
               v.created_at, v.updated_at, v.deleted_at,
               p.name AS product_name, p.image AS product_image
        FROM variant v
        JOIN product p ON p.id = v.product_id
        WHERE v.id = $1 AND v.deleted_at IS NULL AND p.deleted_at IS NULL
        ",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?
    .map(VariantDetail::from)
    .ok_or(RepositoryError::NotFound)
}

/// Insert a new variant.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the ID is taken or the main product
/// does not exist.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn save<'e, E: PgExecutor<'e>>(
    executor: E,
    variant: &Variant,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO variant (id, product_id, name, description, price, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ",
    )
    .bind(variant.id)
    .bind(variant.product_id)
    .bind(&variant.name)
    .bind(&variant.description)
    .bind(variant.price)
    .bind(variant.created_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error("variant", e))?;

    Ok(())
}

/// Overwrite the mutable fields of an active variant.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the new main product does not exist.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn edit<'e, E: PgExecutor<'e>>(
    executor: E,
    variant: &Variant,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE variant
        SET product_id = $2, name = $3, description = $4, price = $5, updated_at = $6
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(variant.id)
    .bind(variant.product_id)
    .bind(&variant.name)
    .bind(&variant.description)
    .bind(variant.price)
    .bind(variant.updated_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error("variant", e))?;

    Ok(result.rows_affected())
}

/// Soft-delete an active variant.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete<'e, E: PgExecutor<'e>>(
    executor: E,
    variant: &Variant,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE variant
        SET deleted_at = $2
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(variant.id)
    .bind(variant.deleted_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// One page of visible variants in creation order.
///
/// # Errors
///
/// Returns `RepositoryError::InvalidCursor` if the cursor is malformed.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_by_cursor<'e, E: PgExecutor<'e>>(
    executor: E,
    request: &PageRequest,
) -> Result<Page<VariantDetail>, RepositoryError> {
    let after = request.boundary()?;

    let rows = sqlx::query_as::<_, VariantDetailRow>(
        r"
        SELECT v.id, v.product_id, v.name, v.description, v.price,
               v.created_at, v.updated_at, v.deleted_at,
               p.name AS product_name, p.image AS product_image
        FROM variant v
        JOIN product p ON p.id = v.product_id
        WHERE v.created_at > $1 AND v.deleted_at IS NULL AND p.deleted_at IS NULL
        ORDER BY v.created_at, v.id
        LIMIT $2
        ",
    )
    .bind(after)
    .bind(i64::from(request.limit().get()))
    .fetch_all(executor)
    .await?;

    let variants = rows.into_iter().map(VariantDetail::from).collect();
    Ok(Page::from_rows(variants, request.limit(), |v| {
        v.variant.created_at
    }))
}
