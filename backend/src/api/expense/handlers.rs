//! Handler functions for expense API endpoints.
//!
//! Every handler runs behind `jwt_auth` and works on the caller's own
//! expenses only.

use crate::api::common::{
    ApiError, ApiResponse, PaginatedData, PaginationFilter, PaginationMeta, service_error_to_http,
};
use crate::auth::models::AuthContext;
use crate::database::models::{CreateExpense, Expense, UpdateExpense};
use crate::services::expense_service::ExpenseService;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Lists the caller's expenses, one page at a time.
#[axum::debug_handler]
pub async fn get_expenses(
    Extension(pool): Extension<SqlitePool>,
    Extension(auth): Extension<AuthContext>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<ResponseJson<ApiResponse<PaginatedData<Expense>>>, ApiError> {
    let service = ExpenseService::new(&pool);

    let (expenses, total) = service
        .list_expenses(&auth.user_id, &pagination)
        .await
        .map_err(service_error_to_http)?;

    let meta = PaginationMeta::from_filter(&pagination, total);

    Ok(ResponseJson(ApiResponse::paginated(
        PaginatedData::new(expenses, total),
        meta,
        "Expenses retrieved successfully",
    )))
}

#[axum::debug_handler]
pub async fn get_expense_by_id(
    Extension(pool): Extension<SqlitePool>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Expense>>, ApiError> {
    let service = ExpenseService::new(&pool);

    let expense = service
        .get_expense_required(&auth.user_id, &id)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        expense,
        "Expense retrieved successfully",
    )))
}

/// Creates an expense owned by the caller.
#[axum::debug_handler]
pub async fn create_expense(
    Extension(pool): Extension<SqlitePool>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateExpense>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<Expense>>), ApiError> {
    let service = ExpenseService::new(&pool);

    let expense = service
        .create_expense(&auth.user_id, payload)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success(expense, "Expense created successfully")),
    ))
}

#[axum::debug_handler]
pub async fn update_expense(
    Extension(pool): Extension<SqlitePool>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateExpense>,
) -> Result<ResponseJson<ApiResponse<Expense>>, ApiError> {
    let service = ExpenseService::new(&pool);

    let expense = service
        .update_expense(&auth.user_id, &id, payload)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        expense,
        "Expense updated successfully",
    )))
}

#[axum::debug_handler]
pub async fn delete_expense(
    Extension(pool): Extension<SqlitePool>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let service = ExpenseService::new(&pool);

    service
        .delete_expense(&auth.user_id, &id)
        .await
        .map_err(service_error_to_http)?;

    Ok(StatusCode::NO_CONTENT)
}
