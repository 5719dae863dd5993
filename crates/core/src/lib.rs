//! Catalog Core - Shared types library.
//!
//! This crate provides common types used across the catalog components:
//! - `api` - JSON API over products, categories, attributes and variants
//! - `integration-tests` - `PostgreSQL`-backed behavior tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for time-ordered IDs and prices
//! - [`pagination`] - The opaque cursor codec and the page assembly protocol

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pagination;
pub mod types;

pub use pagination::*;
pub use types::*;
