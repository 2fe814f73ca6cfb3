use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::dto::NewExpense;

/// Ledger entry: one dated, categorized amount owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub amount: f64,
    pub date: Date,
    pub created_at: OffsetDateTime,
}

impl Expense {
    pub async fn create(db: &SqlitePool, user_id: Uuid, new: &NewExpense) -> sqlx::Result<Expense> {
        let expense = Expense {
            id: Uuid::new_v4(),
            user_id,
            category: new.category.clone(),
            amount: new.amount,
            date: new.date,
            created_at: OffsetDateTime::now_utc(),
        };
        sqlx::query(
            r#"
            INSERT INTO expenses (id, user_id, category, amount, date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(expense.id)
        .bind(expense.user_id)
        .bind(&expense.category)
        .bind(expense.amount)
        .bind(expense.date)
        .bind(expense.created_at)
        .execute(db)
        .await?;
        Ok(expense)
    }

    /// All entries owned by the user, in insertion order. No pagination.
    pub async fn list_by_user(db: &SqlitePool, user_id: Uuid) -> sqlx::Result<Vec<Expense>> {
        sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, category, amount, date, created_at
            FROM expenses
            WHERE user_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }
}
