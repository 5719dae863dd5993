//! Catalog services.
//!
//! Each service owns a handle to the shared pool and runs every write as a
//! [`UnitOfWork`](crate::db::UnitOfWork): begin, read, mutate the domain
//! entity, write, commit. Any failed step rolls the whole unit back. Results
//! are built from the in-memory entity as written, not from a re-read.
//!
//! # Services
//!
//! - `products` - Products, their images and their category links
//! - `categories` - Categories (deleting one retires its links)
//! - `attributes` - Attributes (lowercased names)
//! - `variants` - Variants of a main product
//! - `category_links` - The product/category reconciler

pub mod attributes;
pub mod categories;
pub mod category_links;
pub mod products;
pub mod variants;

pub use attributes::AttributeService;
pub use categories::CategoryService;
pub use category_links::ReconcileOutcome;
pub use products::ProductService;
pub use variants::VariantService;
