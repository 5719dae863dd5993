//! Variant domain types.
//!
//! A variant is a purchasable version of a main product. It has no image of
//! its own; reads join the main product and borrow its name and image.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::{Price, ProductId, VariantId};

use super::Product;

/// A product variant (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub id: VariantId,
    /// The main product this variant belongs to.
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Variant {
    #[must_use]
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: VariantId::generate(),
            product_id,
            name: name.into(),
            description: description.into(),
            price,
            created_at: super::now(),
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Rewrite every mutable field, including the main product reference.
    pub fn edit(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
    ) {
        self.product_id = product_id;
        self.name = name.into();
        self.description = description.into();
        self.price = price;
        self.updated_at = Some(super::now());
    }

    pub fn retire(&mut self) {
        self.deleted_at = Some(super::now());
    }
}

/// A variant read together with its (active) main product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDetail {
    pub variant: Variant,
    pub product_name: String,
    pub product_image: Option<Vec<u8>>,
}

impl VariantDetail {
    /// Pair a variant with a main product already loaded by the caller.
    #[must_use]
    pub fn with_product(variant: Variant, product: &Product) -> Self {
        Self {
            variant,
            product_name: product.name.clone(),
            product_image: product.image.clone(),
        }
    }
}

/// Variant transfer shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDto {
    pub id: VariantId,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub price: Price,
    #[serde(with = "super::base64_blob")]
    pub image: Option<Vec<u8>>,
    pub main_id: ProductId,
    pub main_name: String,
}

impl From<&VariantDetail> for VariantDto {
    fn from(detail: &VariantDetail) -> Self {
        let variant = &detail.variant;
        Self {
            id: variant.id,
            name: variant.name.clone(),
            description: variant.description.clone(),
            price: variant.price,
            image: detail.product_image.clone(),
            main_id: variant.product_id,
            main_name: detail.product_name.clone(),
        }
    }
}
