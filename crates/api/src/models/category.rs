//! Category domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::CategoryId;

/// A product grouping (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Create a new category with a fresh ID and creation time.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            description: description.into(),
            created_at: super::now(),
            updated_at: None,
            deleted_at: None,
        }
    }

    pub fn edit(&mut self, name: impl Into<String>, description: impl Into<String>) {
        self.name = name.into();
        self.description = description.into();
        self.updated_at = Some(super::now());
    }

    pub fn retire(&mut self) {
        self.deleted_at = Some(super::now());
    }
}

/// Category transfer shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: CategoryId,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
}

impl From<&Category> for CategoryDto {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
        }
    }
}
