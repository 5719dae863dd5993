//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! # Products
//! POST   /product                      - Create product
//! GET    /product?limit=&cursor=       - Product listing
//! GET    /product/{id}                 - Product with categories
//! PATCH  /product/{id}                 - Update product
//! DELETE /product/{id}                 - Delete product (and its links)
//! POST   /product/upload-image/{id}    - Replace image (multipart field `image`)
//! GET    /product/category?limit=&cursor= - Product/category link listing
//! PATCH  /product/category/{id}        - Add/remove categories ({ added, removed })
//!
//! # Categories, attributes, variants
//! POST   /{entity}                     - Create
//! GET    /{entity}?limit=&cursor=      - Listing
//! GET    /{entity}/{id}                - Detail
//! PATCH  /{entity}/{id}                - Update
//! DELETE /{entity}/{id}                - Delete
//! ```
//!
//! Bodies use the envelope in [`response`]; errors are `{ "msg" }`.

pub mod attributes;
pub mod categories;
pub mod extract;
pub mod products;
pub mod response;
pub mod variants;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create).get(products::list))
        .route(
            "/{id}",
            get(products::show)
                .patch(products::update)
                .delete(products::delete),
        )
        .route("/upload-image/{id}", post(products::upload_image))
        .route("/category", get(products::list_category_links))
        .route("/category/{id}", patch(products::update_categories))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(categories::create).get(categories::list))
        .route(
            "/{id}",
            get(categories::show)
                .patch(categories::update)
                .delete(categories::delete),
        )
}

/// Create the attribute routes router.
pub fn attribute_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(attributes::create).get(attributes::list))
        .route(
            "/{id}",
            get(attributes::show)
                .patch(attributes::update)
                .delete(attributes::delete),
        )
}

/// Create the variant routes router.
pub fn variant_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(variants::create).get(variants::list))
        .route(
            "/{id}",
            get(variants::show)
                .patch(variants::update)
                .delete(variants::delete),
        )
}

/// Create the catalog router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/product", product_routes())
        .nest("/category", category_routes())
        .nest("/attribute", attribute_routes())
        .nest("/variant", variant_routes())
}
