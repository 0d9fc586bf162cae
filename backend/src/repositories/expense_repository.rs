//! Database repository for expense records.
//!
//! Every query filters on `user_id`, so a caller can never read or change
//! another user's rows through this repository.

use crate::{
    api::common::PaginationFilter,
    database::models::{CreateExpense, Expense, UpdateExpense},
};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

const EXPENSE_COLUMNS: &str = "id, user_id, title, amount, date, created_at, updated_at";

pub struct ExpenseRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ExpenseRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates an expense owned by `user_id`.
    pub async fn create_expense(&self, user_id: &str, expense: CreateExpense) -> Result<Expense> {
        let now = Utc::now();
        let expense = sqlx::query_as::<_, Expense>(&format!(
            r#"
            INSERT INTO expenses (id, user_id, title, amount, date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7().to_string())
        .bind(user_id)
        .bind(expense.title)
        .bind(expense.amount)
        .bind(expense.date)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(expense)
    }

    /// Retrieves a single expense if it belongs to `user_id`.
    pub async fn get_expense(&self, user_id: &str, id: &str) -> Result<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(expense)
    }

    /// Lists a page of the user's expenses, most recent date first.
    pub async fn get_expenses_by_user_id(
        &self,
        user_id: &str,
        pagination: &PaginationFilter,
    ) -> Result<Vec<Expense>> {
        let limit = pagination.limit() as i64;
        let offset = pagination.offset() as i64;

        let expenses = sqlx::query_as::<_, Expense>(&format!(
            r#"
            SELECT {EXPENSE_COLUMNS}
            FROM expenses
            WHERE user_id = ?
            ORDER BY date IS NULL, date DESC, created_at DESC
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(expenses)
    }

    /// Get total count of expenses for a user
    pub async fn get_expenses_count_by_user_id(&self, user_id: &str) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM expenses WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count as u64)
    }

    /// Applies the present fields of `changes`. Returns `None` when no
    /// expense with that id belongs to the user.
    pub async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        changes: UpdateExpense,
    ) -> Result<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            r#"
            UPDATE expenses SET
                title = COALESCE(?, title),
                amount = COALESCE(?, amount),
                date = COALESCE(?, date),
                updated_at = ?
            WHERE id = ? AND user_id = ?
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(changes.title)
        .bind(changes.amount)
        .bind(changes.date)
        .bind(Utc::now())
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(expense)
    }

    /// Deletes the expense; `false` when nothing owned by the user matched.
    pub async fn delete_expense(&self, user_id: &str, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
