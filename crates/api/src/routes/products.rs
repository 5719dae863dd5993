//! Product route handlers.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::Deserialize;

use catalog_core::{CategoryId, Price, ProductId};

use super::extract::{JsonBody, ListParams, PathParam, QueryParams, validate_fields};
use super::response::{self, ApiResponse, ListMeta};
use crate::error::{AppError, Result};
use crate::models::{ProductCategoryDto, ProductDetailDto, ProductDto};
use crate::services::ReconcileOutcome;
use crate::state::AppState;

/// Multipart field carrying the image bytes.
const IMAGE_FIELD: &str = "image";

/// Body of create and update requests.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    pub price: Price,
}

/// Body of `PATCH /product/category/{id}`.
#[derive(Debug, Deserialize)]
pub struct CategoryPatch {
    #[serde(default)]
    pub added: Vec<CategoryId>,
    #[serde(default)]
    pub removed: Vec<CategoryId>,
}

/// `POST /product`
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ProductRequest>,
) -> Result<(StatusCode, ApiResponse<ProductDto>)> {
    validate_fields(&body.name, Some(body.price))?;
    let product = state
        .products()
        .create_product(&body.name, &body.description, body.price)
        .await?;
    Ok(response::created("create product success", product))
}

/// `GET /product?limit=&cursor=`
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<ApiResponse<Vec<ProductDto>, ListMeta>> {
    let request = params.into_page_request()?;
    let page = state.products().list_products(&request).await?;
    Ok(response::page("get all products success", &request, page))
}

/// `GET /product/{id}`
pub async fn show(
    State(state): State<AppState>,
    PathParam(id): PathParam<ProductId>,
) -> Result<ApiResponse<ProductDetailDto>> {
    let product = state.products().get_product_detail(id).await?;
    Ok(response::ok("get one product success", product))
}

/// `PATCH /product/{id}`
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<ProductId>,
    JsonBody(body): JsonBody<ProductRequest>,
) -> Result<ApiResponse<ProductDto>> {
    validate_fields(&body.name, Some(body.price))?;
    let product = state
        .products()
        .update_product(id, &body.name, &body.description, body.price)
        .await?;
    Ok(response::ok("update product success", product))
}

/// `DELETE /product/{id}`
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<ProductId>,
) -> Result<ApiResponse<()>> {
    state.products().delete_product(id).await?;
    Ok(response::message("delete product success"))
}

/// `POST /product/upload-image/{id}`
///
/// Reads the first `image` field of a multipart form and stores its bytes
/// unchanged.
pub async fn upload_image(
    State(state): State<AppState>,
    PathParam(id): PathParam<ProductId>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<ProductDto>> {
    let mut multipart = multipart?;

    let mut image = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(IMAGE_FIELD) {
            image = Some(field.bytes().await?.to_vec());
            break;
        }
    }
    let image = image
        .ok_or_else(|| AppError::BadRequest(format!("missing multipart field `{IMAGE_FIELD}`")))?;

    let product = state.products().update_product_image(id, image).await?;
    Ok(response::ok("upload product image success", product))
}

/// `PATCH /product/category/{id}`
pub async fn update_categories(
    State(state): State<AppState>,
    PathParam(id): PathParam<ProductId>,
    JsonBody(body): JsonBody<CategoryPatch>,
) -> Result<ApiResponse<ReconcileOutcome>> {
    let outcome = state
        .products()
        .reconcile_categories(id, &body.added, &body.removed)
        .await?;
    Ok(response::ok("update category to product success", outcome))
}

/// `GET /product/category?limit=&cursor=`
pub async fn list_category_links(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<ApiResponse<Vec<ProductCategoryDto>, ListMeta>> {
    let request = params.into_page_request()?;
    let page = state.products().list_category_links(&request).await?;
    Ok(response::page("get all product categories success", &request, page))
}
