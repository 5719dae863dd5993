//! Attribute route handlers.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use catalog_core::AttributeId;

use super::extract::{JsonBody, ListParams, PathParam, QueryParams, validate_fields};
use super::response::{self, ApiResponse, ListMeta};
use crate::error::Result;
use crate::models::AttributeDto;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AttributeRequest {
    pub name: String,
}

/// `POST /attribute`
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AttributeRequest>,
) -> Result<(StatusCode, ApiResponse<AttributeDto>)> {
    validate_fields(&body.name, None)?;
    let attribute = state.attributes().create_attribute(&body.name).await?;
    Ok(response::created("create attribute success", attribute))
}

/// `GET /attribute?limit=&cursor=`
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<ApiResponse<Vec<AttributeDto>, ListMeta>> {
    let request = params.into_page_request()?;
    let page = state.attributes().list_attributes(&request).await?;
    Ok(response::page("get all attributes success", &request, page))
}

/// `GET /attribute/{id}`
pub async fn show(
    State(state): State<AppState>,
    PathParam(id): PathParam<AttributeId>,
) -> Result<ApiResponse<AttributeDto>> {
    let attribute = state.attributes().get_attribute(id).await?;
    Ok(response::ok("get one attribute success", attribute))
}

/// `PATCH /attribute/{id}`
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<AttributeId>,
    JsonBody(body): JsonBody<AttributeRequest>,
) -> Result<ApiResponse<AttributeDto>> {
    validate_fields(&body.name, None)?;
    let attribute = state.attributes().rename_attribute(id, &body.name).await?;
    Ok(response::ok("update attribute success", attribute))
}

/// `DELETE /attribute/{id}`
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<AttributeId>,
) -> Result<ApiResponse<()>> {
    state.attributes().delete_attribute(id).await?;
    Ok(response::message("delete attribute success"))
}
