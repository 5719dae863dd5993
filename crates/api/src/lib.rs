//! Product catalog API library.
//!
//! This crate provides the catalog persistence layer, its unit-of-work
//! services and the thin axum transport as a library, allowing it to be
//! tested and reused.
//!
//! # Layers
//!
//! - [`models`] - Domain entities and their transfer (DTO) shapes
//! - [`db`] - Entity stores, each operation generic over a pool or an open transaction
//! - [`services`] - Unit-of-work services and the product/category reconciler
//! - [`routes`] - JSON handlers mapping requests onto services

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
