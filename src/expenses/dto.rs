use serde::{Deserialize, Serialize};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;
use uuid::Uuid;

use crate::error::ApiError;

use super::repo::Expense;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats a calendar date as `YYYY-MM-DD`.
pub(crate) fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}

/// Request body for adding an expense. Amount and date arrive as strings,
/// exactly as form fields do; `validate` parses them or reports which one
/// is malformed.
#[derive(Debug, Deserialize)]
pub struct NewExpenseRequest {
    pub category: String,
    pub amount: String,
    pub date: String,
}

/// Validated expense input.
#[derive(Debug)]
pub struct NewExpense {
    pub category: String,
    pub amount: f64,
    pub date: Date,
}

impl NewExpenseRequest {
    pub fn validate(self) -> Result<NewExpense, ApiError> {
        let date =
            Date::parse(self.date.trim(), DATE_FORMAT).map_err(|_| ApiError::InvalidDate)?;
        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| ApiError::InvalidAmount)?;
        if !amount.is_finite() {
            return Err(ApiError::InvalidAmount);
        }
        Ok(NewExpense {
            category: self.category,
            amount,
            date,
        })
    }
}

/// Ledger entry as returned to the client.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub category: String,
    pub amount: f64,
    pub date: String,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            category: expense.category,
            amount: expense.amount,
            date: format_date(expense.date),
        }
    }
}
