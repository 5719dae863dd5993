//! Product/category link types.
//!
//! A link is active while `deleted_at` is unset. At most one active link may
//! exist per (product, category) pair; removed links stay behind as
//! soft-deleted history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::{CategoryId, ProductCategoryId, ProductId};

use super::CategoryDto;

/// A membership of a product in a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCategory {
    pub id: ProductCategoryId,
    pub product_id: ProductId,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ProductCategory {
    #[must_use]
    pub fn new(product_id: ProductId, category_id: CategoryId) -> Self {
        Self {
            id: ProductCategoryId::generate(),
            product_id,
            category_id,
            created_at: super::now(),
            updated_at: None,
            deleted_at: None,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Move the link to another pair.
    pub fn repoint(&mut self, product_id: ProductId, category_id: CategoryId) {
        self.product_id = product_id;
        self.category_id = category_id;
        self.updated_at = Some(super::now());
    }

    pub fn retire(&mut self) {
        self.deleted_at = Some(super::now());
    }
}

/// An active link read together with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCategoryDetail {
    pub link: ProductCategory,
    pub category_name: String,
    pub category_description: String,
}

impl From<&ProductCategoryDetail> for CategoryDto {
    fn from(detail: &ProductCategoryDetail) -> Self {
        Self {
            id: detail.link.category_id,
            name: detail.category_name.clone(),
            description: detail.category_description.clone(),
        }
    }
}

/// Link transfer shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategoryDto {
    pub id: ProductCategoryId,
    pub product_id: ProductId,
    pub category_id: CategoryId,
    pub category_name: String,
}

impl From<&ProductCategoryDetail> for ProductCategoryDto {
    fn from(detail: &ProductCategoryDetail) -> Self {
        Self {
            id: detail.link.id,
            product_id: detail.link.product_id,
            category_id: detail.link.category_id,
            category_name: detail.category_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_link_is_active() {
        let link = ProductCategory::new(ProductId::generate(), CategoryId::generate());
        assert!(link.is_active());
    }

    #[test]
    fn test_repoint_stamps_update() {
        let mut link = ProductCategory::new(ProductId::generate(), CategoryId::generate());
        let category_id = CategoryId::generate();
        link.repoint(link.product_id, category_id);
        assert_eq!(link.category_id, category_id);
        assert!(link.updated_at.is_some());
        assert!(link.is_active());
    }

    #[test]
    fn test_detail_maps_to_category_dto() {
        let category_id = CategoryId::generate();
        let detail = ProductCategoryDetail {
            link: ProductCategory::new(ProductId::generate(), category_id),
            category_name: "Kitchen".to_string(),
            category_description: "Cooking things".to_string(),
        };
        let dto = CategoryDto::from(&detail);
        assert_eq!(dto.id, category_id);
        assert_eq!(dto.name, "Kitchen");
        assert_eq!(dto.description, "Cooking things");
    }
}
