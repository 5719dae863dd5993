//! Category route handlers.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use catalog_core::CategoryId;

use super::extract::{JsonBody, ListParams, PathParam, QueryParams, validate_fields};
use super::response::{self, ApiResponse, ListMeta};
use crate::error::Result;
use crate::models::CategoryDto;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
}

/// `POST /category`
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CategoryRequest>,
) -> Result<(StatusCode, ApiResponse<CategoryDto>)> {
    validate_fields(&body.name, None)?;
    let category = state
        .categories()
        .create_category(&body.name, &body.description)
        .await?;
    Ok(response::created("create category success", category))
}

/// `GET /category?limit=&cursor=`
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<ApiResponse<Vec<CategoryDto>, ListMeta>> {
    let request = params.into_page_request()?;
    let page = state.categories().list_categories(&request).await?;
    Ok(response::page("get all categories success", &request, page))
}

/// `GET /category/{id}`
pub async fn show(
    State(state): State<AppState>,
    PathParam(id): PathParam<CategoryId>,
) -> Result<ApiResponse<CategoryDto>> {
    let category = state.categories().get_category(id).await?;
    Ok(response::ok("get one category success", category))
}

/// `PATCH /category/{id}`
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<CategoryId>,
    JsonBody(body): JsonBody<CategoryRequest>,
) -> Result<ApiResponse<CategoryDto>> {
    validate_fields(&body.name, None)?;
    let category = state
        .categories()
        .update_category(id, &body.name, &body.description)
        .await?;
    Ok(response::ok("update category success", category))
}

/// `DELETE /category/{id}`
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<CategoryId>,
) -> Result<ApiResponse<()>> {
    state.categories().delete_category(id).await?;
    Ok(response::message("delete category success"))
}
