//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::services::{AttributeService, CategoryService, ProductService, VariantService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The pool is created once at startup and
/// handed to every service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    products: ProductService,
    categories: CategoryService,
    attributes: AttributeService,
    variants: VariantService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                products: ProductService::new(pool.clone()),
                categories: CategoryService::new(pool.clone()),
                attributes: AttributeService::new(pool.clone()),
                variants: VariantService::new(pool.clone()),
                pool,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn products(&self) -> &ProductService {
        &self.inner.products
    }

    #[must_use]
    pub fn categories(&self) -> &CategoryService {
        &self.inner.categories
    }

    #[must_use]
    pub fn attributes(&self) -> &AttributeService {
        &self.inner.attributes
    }

    #[must_use]
    pub fn variants(&self) -> &VariantService {
        &self.inner.variants
    }
}
