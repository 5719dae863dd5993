//! Product/category relation reconciler.
//!
//! Converges the active links of one product toward an add/remove request.
//! The reconciler runs on a connection the caller already holds inside a
//! [`UnitOfWork`](crate::db::UnitOfWork); any error leaves the caller to roll
//! the whole batch back.
//!
//! Additions are applied before removals, so a category named in both sets
//! ends up unlinked. Adding an already linked category is a no-op. Removing a
//! category that is not linked fails the batch with `NotFound`.

use std::collections::HashSet;

use serde::Serialize;
use sqlx::PgConnection;
use tracing::debug;

use catalog_core::{CategoryId, ProductId};

use crate::db::{RepositoryError, categories, ensure_affected, product_categories};
use crate::models::ProductCategory;

/// What a reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    /// Categories that gained a new link.
    pub linked: Vec<CategoryId>,
    /// Requested additions that were already linked.
    pub already_linked: Vec<CategoryId>,
    /// Categories whose link was soft-deleted.
    pub unlinked: Vec<CategoryId>,
}

/// Apply `to_add` then `to_remove` to the active links of `product_id`.
///
/// Duplicate IDs within either set are applied once. The product must
/// already have been checked by the caller.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if a category to add does not exist or
/// a category to remove is not linked.
/// Returns any other store error unchanged.
pub async fn reconcile(
    conn: &mut PgConnection,
    product_id: ProductId,
    to_add: &[CategoryId],
    to_remove: &[CategoryId],
) -> Result<ReconcileOutcome, RepositoryError> {
    let mut outcome = ReconcileOutcome::default();

    for &category_id in distinct(to_add) {
        match product_categories::get_by_product_and_category(&mut *conn, product_id, category_id)
            .await
        {
            Ok(_) => outcome.already_linked.push(category_id),
            Err(RepositoryError::NotFound) => {
                categories::get_by_id(&mut *conn, category_id).await?;
                let link = ProductCategory::new(product_id, category_id);
                product_categories::save(&mut *conn, &link).await?;
                outcome.linked.push(category_id);
            }
            Err(e) => return Err(e),
        }
    }

    for &category_id in distinct(to_remove) {
        let mut detail =
            product_categories::get_by_product_and_category(&mut *conn, product_id, category_id)
                .await?;
        detail.link.retire();
        ensure_affected(product_categories::delete(&mut *conn, &detail.link).await?)?;
        outcome.unlinked.push(category_id);
    }

    debug!(
        %product_id,
        linked = outcome.linked.len(),
        already_linked = outcome.already_linked.len(),
        unlinked = outcome.unlinked.len(),
        "reconciled product categories"
    );

    Ok(outcome)
}

/// First occurrences of each ID, in request order.
fn distinct(ids: &[CategoryId]) -> impl Iterator<Item = &CategoryId> {
    let mut seen = HashSet::new();
    ids.iter().filter(move |id| seen.insert(**id))
}
