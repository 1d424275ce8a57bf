//! Transaction controller.

use super::parse_id;
use crate::{
    extractors::{Ctx, JsonBody, Owner},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError, CreatedId},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use fintrack_core::{CategoryId, TransactionId, TransactionInput, TransactionOutput};
use tracing::debug;

/// Creates the transaction router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/:id",
        get(get_transaction)
            .put(update_transaction)
            .delete(delete_transaction),
    )
}

/// Routes nested under a category, mounted at `/categories`.
pub fn by_category_router() -> Router<AppState> {
    Router::new().route(
        "/:id/transactions",
        get(list_transactions).post(create_transaction),
    )
}

/// Book a transaction in a category.
async fn create_transaction(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Owner(owner): Owner,
    Path(category): Path<String>,
    JsonBody(input): JsonBody<TransactionInput>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedId<TransactionId>>>), AppError> {
    let category: CategoryId = parse_id(&category)?;
    debug!(request_id = ctx.request_id(), category_id = %category, "Create transaction request");

    let id = state
        .transaction_service
        .create(&ctx, owner, category, input)
        .await?;
    Ok(created(id))
}

/// List the transactions of a category.
async fn list_transactions(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(category): Path<String>,
) -> ApiResult<Vec<TransactionOutput>> {
    let category: CategoryId = parse_id(&category)?;

    let transactions = state
        .transaction_service
        .list_by_category(&ctx, category)
        .await?;
    ok(transactions)
}

/// Get a transaction by ID.
async fn get_transaction(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> ApiResult<TransactionOutput> {
    let id: TransactionId = parse_id(&id)?;
    debug!(request_id = ctx.request_id(), transaction_id = %id, "Get transaction request");

    let transaction = state.transaction_service.get(&ctx, id).await?;
    ok(transaction)
}

/// Replace a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<TransactionInput>,
) -> ApiResult<TransactionOutput> {
    let id: TransactionId = parse_id(&id)?;

    let transaction = state.transaction_service.update(&ctx, id, input).await?;
    ok(transaction)
}

/// Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: TransactionId = parse_id(&id)?;

    state.transaction_service.delete(&ctx, id).await?;
    Ok(no_content())
}
