//! Variant route handlers.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use catalog_core::{Price, ProductId, VariantId};

use super::extract::{JsonBody, ListParams, PathParam, QueryParams, validate_fields};
use super::response::{self, ApiResponse, ListMeta};
use crate::error::Result;
use crate::models::VariantDto;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VariantRequest {
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    pub price: Price,
    /// The main product.
    pub main_id: ProductId,
}

/// `POST /variant`
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<VariantRequest>,
) -> Result<(StatusCode, ApiResponse<VariantDto>)> {
    validate_fields(&body.name, Some(body.price))?;
    let variant = state
        .variants()
        .create_variant(&body.name, &body.description, body.price, body.main_id)
        .await?;
    Ok(response::created("create variant success", variant))
}

/// `GET /variant?limit=&cursor=`
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<ApiResponse<Vec<VariantDto>, ListMeta>> {
    let request = params.into_page_request()?;
    let page = state.variants().list_variants(&request).await?;
    Ok(response::page("get all variants success", &request, page))
}

/// `GET /variant/{id}`
pub async fn show(
    State(state): State<AppState>,
    PathParam(id): PathParam<VariantId>,
) -> Result<ApiResponse<VariantDto>> {
    let variant = state.variants().get_variant(id).await?;
    Ok(response::ok("get one variant success", variant))
}

/// `PATCH /variant/{id}`
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<VariantId>,
    JsonBody(body): JsonBody<VariantRequest>,
) -> Result<ApiResponse<VariantDto>> {
    validate_fields(&body.name, Some(body.price))?;
    let variant = state
        .variants()
        .update_variant(id, &body.name, &body.description, body.price, body.main_id)
        .await?;
    Ok(response::ok("update variant success", variant))
}

/// `DELETE /variant/{id}`
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<VariantId>,
) -> Result<ApiResponse<()>> {
    state.variants().delete_variant(id).await?;
    Ok(response::message("delete variant success"))
}
