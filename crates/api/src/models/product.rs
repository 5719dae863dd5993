//! Product domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::{Price, ProductId};

use super::{AttributeDto, CategoryDto};

/// A sellable product (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Time-ordered product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Preview image as opaque bytes, if one was uploaded.
    pub image: Option<Vec<u8>>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last edited.
    pub updated_at: Option<DateTime<Utc>>,
    /// When the product was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a new product with a fresh ID and creation time.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Price) -> Self {
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: description.into(),
            price,
            image: None,
            created_at: super::now(),
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Rewrite the descriptive fields and stamp the edit time.
    pub fn edit(&mut self, name: impl Into<String>, description: impl Into<String>, price: Price) {
        self.name = name.into();
        self.description = description.into();
        self.price = price;
        self.updated_at = Some(super::now());
    }

    /// Replace the preview image and stamp the edit time.
    pub fn replace_image(&mut self, image: Vec<u8>) {
        self.image = Some(image);
        self.updated_at = Some(super::now());
    }

    /// Stamp the soft-delete time.
    pub fn retire(&mut self) {
        self.deleted_at = Some(super::now());
    }
}

/// Product transfer shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub price: Price,
    #[serde(with = "super::base64_blob")]
    pub image: Option<Vec<u8>>,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

/// Product with its active categories and attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetailDto {
    #[serde(flatten)]
    pub product: ProductDto,
    pub categories: Vec<CategoryDto>,
    /// Always empty until attributes can be attached to products.
    pub attributes: Vec<AttributeDto>,
}
