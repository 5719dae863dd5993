//! Attribute store.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;

use catalog_core::{AttributeId, Page, PageRequest};

use super::{RepositoryError, insert_error};
use crate::models::Attribute;

#[derive(Debug, sqlx::FromRow)]
struct AttributeRow {
    id: AttributeId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<AttributeRow> for Attribute {
    fn from(row: AttributeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// Get an active attribute by ID.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no active attribute has this ID.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    id: AttributeId,
) -> Result<Attribute, RepositoryError> {
    sqlx::query_as::<_, AttributeRow>(
        r"
        SELECT id, name, created_at, updated_at, deleted_at
        FROM attribute
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?
    .map(Attribute::from)
    .ok_or(RepositoryError::NotFound)
}

/// Insert a new attribute.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the ID is already taken.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn save<'e, E: PgExecutor<'e>>(
    executor: E,
    attribute: &Attribute,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO attribute (id, name, created_at)
        VALUES ($1, $2, $3)
        ",
    )
    .bind(attribute.id)
    .bind(&attribute.name)
    .bind(attribute.created_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error("attribute", e))?;

    Ok(())
}

/// Overwrite the name of an active attribute.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn edit<'e, E: PgExecutor<'e>>(
    executor: E,
    attribute: &Attribute,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE attribute
        SET name = $2, updated_at = $3
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(attribute.id)
    .bind(&attribute.name)
    .bind(attribute.updated_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Soft-delete an active attribute.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete<'e, E: PgExecutor<'e>>(
    executor: E,
    attribute: &Attribute,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE attribute
        SET deleted_at = $2
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(attribute.id)
    .bind(attribute.deleted_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// One page of active attributes in creation order.
///
/// # Errors
///
/// Returns `RepositoryError::InvalidCursor` if the cursor is malformed.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_by_cursor<'e, E: PgExecutor<'e>>(
    executor: E,
    request: &PageRequest,
) -> Result<Page<Attribute>, RepositoryError> {
    let after = request.boundary()?;

    let rows = sqlx::query_as::<_, AttributeRow>(
        r"
        SELECT id, name, created_at, updated_at, deleted_at
        FROM attribute
        WHERE created_at > $1 AND deleted_at IS NULL
        ORDER BY created_at, id
        LIMIT $2
        ",
    )
    .bind(after)
    .bind(i64::from(request.limit().get()))
    .fetch_all(executor)
    .await?;

    let attributes = rows.into_iter().map(Attribute::from).collect();
    Ok(Page::from_rows(attributes, request.limit(), |a| a.created_at))
}
