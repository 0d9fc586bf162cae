//! Defines the HTTP routes for expense management.

use super::handlers::{
    create_expense, delete_expense, get_expense_by_id, get_expenses, update_expense,
};
use crate::auth::middleware::jwt_auth;
use axum::{Router, middleware, routing::get};

pub fn expense_router() -> Router {
    Router::new()
        .route("/", get(get_expenses).post(create_expense))
        .route(
            "/{id}",
            get(get_expense_by_id)
                .put(update_expense)
                .delete(delete_expense),
        )
        .layer(middleware::from_fn(jwt_auth))
}
