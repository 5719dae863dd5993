//! Domain models for the catalog.
//!
//! Each entity exists twice: once as a domain struct carrying every persisted
//! field (including the soft-delete timestamps), and once as the transfer
//! shape returned to callers. The two are connected only by explicit `From`
//! mappings defined next to the DTOs.
//!
//! Domain constructors stamp the time-ordered ID and the creation time; the
//! stores never generate either.

pub mod attribute;
pub mod category;
pub mod product;
pub mod product_category;
pub mod variant;

pub use attribute::{Attribute, AttributeDto};
pub use category::{Category, CategoryDto};
pub use product::{Product, ProductDetailDto, ProductDto};
pub use product_category::{ProductCategory, ProductCategoryDetail, ProductCategoryDto};
pub use variant::{Variant, VariantDetail, VariantDto};

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the datastore's resolution.
///
/// `TIMESTAMPTZ` keeps microseconds, so in-memory timestamps are truncated to
/// match what a later read returns.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Serde adapter for optional binary blobs as standard base64 strings.
pub(crate) mod base64_blob {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|encoded| STANDARD.decode(encoded).map_err(serde::de::Error::custom))
            .transpose()
    }
}
