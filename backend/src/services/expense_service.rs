//! Expense business logic service.
//!
//! All operations take the authenticated user's id and only ever touch that
//! user's expenses.

use crate::api::common::PaginationFilter;
use crate::database::models::{CreateExpense, Expense, UpdateExpense};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::expense_repository::ExpenseRepository;
use sqlx::SqlitePool;
use validator::Validate;

/// Service layer for expense operations.
pub struct ExpenseService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> ExpenseService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns one page of the user's expenses together with the total count.
    pub async fn list_expenses(
        &self,
        user_id: &str,
        pagination: &PaginationFilter,
    ) -> ServiceResult<(Vec<Expense>, u64)> {
        pagination.validate()?;

        let repo = ExpenseRepository::new(self.pool);
        let expenses = repo.get_expenses_by_user_id(user_id, pagination).await?;
        let total = repo.get_expenses_count_by_user_id(user_id).await?;

        Ok((expenses, total))
    }

    /// Creates an expense tagged with the user's id.
    pub async fn create_expense(
        &self,
        user_id: &str,
        create_expense: CreateExpense,
    ) -> ServiceResult<Expense> {
        create_expense.validate()?;

        let repo = ExpenseRepository::new(self.pool);
        let expense = repo.create_expense(user_id, create_expense).await?;
        Ok(expense)
    }

    /// Updates one of the user's expenses.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if the expense does not exist or
    /// belongs to someone else.
    pub async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        update_expense: UpdateExpense,
    ) -> ServiceResult<Expense> {
        update_expense.validate()?;

        let repo = ExpenseRepository::new(self.pool);
        repo.update_expense(user_id, id, update_expense)
            .await?
            .ok_or_else(|| ServiceError::not_found("Expense", id))
    }

    /// Deletes one of the user's expenses.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if the expense does not exist or
    /// belongs to someone else.
    pub async fn delete_expense(&self, user_id: &str, id: &str) -> ServiceResult<()> {
        let repo = ExpenseRepository::new(self.pool);
        if !repo.delete_expense(user_id, id).await? {
            return Err(ServiceError::not_found("Expense", id));
        }
        Ok(())
    }

    /// Retrieves one of the user's expenses.
    pub async fn get_expense_required(&self, user_id: &str, id: &str) -> ServiceResult<Expense> {
        let repo = ExpenseRepository::new(self.pool);
        repo.get_expense(user_id, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Expense", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::CreateUser;
    use crate::database::test_pool;
    use crate::repositories::user_repository::{UserRepository, UserStore};
    use chrono::{TimeZone, Utc};

    async fn seed_user(pool: &SqlitePool, id: &str) {
        UserRepository::new(pool)
            .insert_if_absent(CreateUser {
                id: id.to_string(),
                handle: format!("{id}@example.com"),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
    }

    fn expense(title: &str, amount: f64, day: u32) -> CreateExpense {
        CreateExpense {
            title: title.to_string(),
            amount,
            date: Some(Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_scoped_to_user() {
        let pool = test_pool().await;
        seed_user(&pool, "alice").await;
        seed_user(&pool, "bob").await;
        let service = ExpenseService::new(&pool);

        service
            .create_expense("alice", expense("Groceries", 54.2, 1))
            .await
            .unwrap();
        service
            .create_expense("alice", expense("Rent", 900.0, 3))
            .await
            .unwrap();
        let bobs = service
            .create_expense("bob", expense("Books", 20.0, 2))
            .await
            .unwrap();
        assert_eq!(bobs.user_id, "bob");

        let (items, total) = service
            .list_expenses("alice", &PaginationFilter::default())
            .await
            .unwrap();
        assert_eq!(total, 2);
        let titles: Vec<_> = items.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Rent", "Groceries"]);
        assert!(items.iter().all(|e| e.user_id == "alice"));
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let pool = test_pool().await;
        seed_user(&pool, "alice").await;
        let service = ExpenseService::new(&pool);
        for day in 1..=5 {
            service
                .create_expense("alice", expense(&format!("day {day}"), 1.0, day))
                .await
                .unwrap();
        }

        let page = PaginationFilter {
            page: Some(2),
            per_page: Some(2),
        };
        let (items, total) = service.list_expenses("alice", &page).await.unwrap();
        assert_eq!(total, 5);
        let titles: Vec<_> = items.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["day 3", "day 2"]);

        let too_big = PaginationFilter {
            page: Some(1),
            per_page: Some(500),
        };
        assert!(matches!(
            service.list_expenses("alice", &too_big).await,
            Err(ServiceError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_only_own_expense() {
        let pool = test_pool().await;
        seed_user(&pool, "alice").await;
        seed_user(&pool, "bob").await;
        let service = ExpenseService::new(&pool);
        let created = service
            .create_expense("alice", expense("Taxi", 12.0, 4))
            .await
            .unwrap();

        let changes = UpdateExpense {
            amount: Some(15.5),
            ..Default::default()
        };
        assert!(matches!(
            service
                .update_expense("bob", &created.id, changes.clone())
                .await,
            Err(ServiceError::NotFound { .. })
        ));

        let updated = service
            .update_expense("alice", &created.id, changes)
            .await
            .unwrap();
        assert_eq!(updated.amount, 15.5);
        assert_eq!(updated.title, "Taxi");
        assert_eq!(updated.date, created.date);
    }

    #[tokio::test]
    async fn test_delete_only_own_expense() {
        let pool = test_pool().await;
        seed_user(&pool, "alice").await;
        seed_user(&pool, "bob").await;
        let service = ExpenseService::new(&pool);
        let created = service
            .create_expense("alice", expense("Gym", 30.0, 5))
            .await
            .unwrap();

        assert!(matches!(
            service.delete_expense("bob", &created.id).await,
            Err(ServiceError::NotFound { .. })
        ));
        service.delete_expense("alice", &created.id).await.unwrap();
        assert!(matches!(
            service.get_expense_required("alice", &created.id).await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let pool = test_pool().await;
        seed_user(&pool, "alice").await;
        let service = ExpenseService::new(&pool);

        let result = service
            .create_expense("alice", expense("", 10.0, 1))
            .await;
        assert!(matches!(result, Err(ServiceError::Validation { .. })));
    }
}
