//! Category store.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;

use catalog_core::{CategoryId, Page, PageRequest};

use super::{RepositoryError, insert_error};
use crate::models::Category;

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// Get an active category by ID.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no active category has this ID.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    id: CategoryId,
) -> Result<Category, RepositoryError> {
    sqlx::query_as::<_, CategoryRow>(
        r"
        SELECT id, name, description, created_at, updated_at, deleted_at
        FROM category
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?
    .map(Category::from)
    .ok_or(RepositoryError::NotFound)
}

/// Insert a new category.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the ID is already taken.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn save<'e, E: PgExecutor<'e>>(
    executor: E,
    category: &Category,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO category (id, name, description, created_at)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(category.id)
    .bind(&category.name)
    .bind(&category.description)
    .bind(category.created_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error("category", e))?;

    Ok(())
}

/// Overwrite the mutable fields of an active category.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn edit<'e, E: PgExecutor<'e>>(
    executor: E,
    category: &Category,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE category
        SET name = $2, description = $3, updated_at = $4
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(category.id)
    .bind(&category.name)
    .bind(&category.description)
    .bind(category.updated_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Soft-delete an active category.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete<'e, E: PgExecutor<'e>>(
    executor: E,
    category: &Category,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE category
        SET deleted_at = $2
        WHERE id = $1 AND deleted_at IS NULL
        ",
    )
    .bind(category.id)
    .bind(category.deleted_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// One page of active categories in creation order.
///
/// # Errors
///
/// Returns `RepositoryError::InvalidCursor` if the cursor is malformed.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_by_cursor<'e, E: PgExecutor<'e>>(
    executor: E,
    request: &PageRequest,
) -> Result<Page<Category>, RepositoryError> {
    let after = request.boundary()?;

    let rows = sqlx::query_as::<_, CategoryRow>(
        r"
        SELECT id, name, description, created_at, updated_at, deleted_at
        FROM category
        WHERE created_at > $1 AND deleted_at IS NULL
        ORDER BY created_at, id
        LIMIT $2
        ",
    )
    .bind(after)
    .bind(i64::from(request.limit().get()))
    .fetch_all(executor)
    .await?;

    let categories = rows.into_iter().map(Category::from).collect();
    Ok(Page::from_rows(categories, request.limit(), |c| c.created_at))
}
