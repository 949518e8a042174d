//! Expenses collection.
//!
//! An expense is only visible, mutable and deletable through intents that
//! carry its owner's `user_id`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Amount, util::iso_date};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub user_id: u64,
    pub amount: Amount,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Fields replaced by an expense update. Everything else is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseChanges {
    pub amount: Amount,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl Expense {
    pub(crate) fn apply(&mut self, changes: ExpenseChanges) {
        self.amount = changes.amount;
        self.category = changes.category;
        self.description = changes.description;
        self.date = changes.date;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpense {
    pub user_id: u64,
    pub amount: Amount,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl NewExpense {
    pub(crate) fn into_expense(self, id: u64, created_at: DateTime<Utc>) -> Expense {
        Expense {
            id,
            user_id: self.user_id,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
            created_at,
        }
    }
}
