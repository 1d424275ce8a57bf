//! Category controller.

use super::parse_id;
use crate::{
    extractors::{Ctx, JsonBody, Owner},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError, CreatedId},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use fintrack_core::{CategoryId, CategoryInput, CategoryOutput};
use serde::Deserialize;
use tracing::debug;

/// Query string of `GET /categories`.
#[derive(Debug, Deserialize)]
pub struct TypeQuery {
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Creates the category router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(find_by_type).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// Create a category for the calling user.
async fn create_category(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Owner(owner): Owner,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedId<CategoryId>>>), AppError> {
    debug!(request_id = ctx.request_id(), "Create category request");

    let id = state.category_service.create(&ctx, owner, input).await?;
    Ok(created(id))
}

/// Get a category by ID.
async fn get_category(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> ApiResult<CategoryOutput> {
    let id: CategoryId = parse_id(&id)?;
    debug!(request_id = ctx.request_id(), category_id = %id, "Get category request");

    let category = state.category_service.get(&ctx, id).await?;
    ok(category)
}

/// Replace a category.
async fn update_category(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<CategoryInput>,
) -> ApiResult<CategoryOutput> {
    let id: CategoryId = parse_id(&id)?;
    debug!(request_id = ctx.request_id(), category_id = %id, "Update category request");

    let category = state.category_service.update(&ctx, id, input).await?;
    ok(category)
}

/// Delete a category and its transactions.
async fn delete_category(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: CategoryId = parse_id(&id)?;
    debug!(request_id = ctx.request_id(), category_id = %id, "Delete category request");

    state.category_service.delete(&ctx, id).await?;
    Ok(no_content())
}

/// List categories of a type.
async fn find_by_type(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Query(query): Query<TypeQuery>,
) -> ApiResult<Vec<CategoryOutput>> {
    debug!(request_id = ctx.request_id(), kind = %query.kind, "Find categories request");

    let categories = state
        .category_service
        .find_by_type(&ctx, &query.kind)
        .await?;
    ok(categories)
}
