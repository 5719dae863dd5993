//! Attribute domain types.
//!
//! Attribute names are case-insensitive; they are stored lowercased.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::AttributeId;

/// A named product property such as "color" or "size".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub id: AttributeId,
    /// Always lowercase.
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Attribute {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            id: AttributeId::generate(),
            name: name.to_lowercase(),
            created_at: super::now(),
            updated_at: None,
            deleted_at: None,
        }
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.to_lowercase();
        self.updated_at = Some(super::now());
    }

    pub fn retire(&mut self) {
        self.deleted_at = Some(super::now());
    }
}

/// Attribute transfer shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDto {
    pub id: AttributeId,
    pub name: String,
}

impl From<&Attribute> for AttributeDto {
    fn from(attribute: &Attribute) -> Self {
        Self {
            id: attribute.id,
            name: attribute.name.clone(),
        }
    }
}
