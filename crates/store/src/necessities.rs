//! Necessities collection: recurring costs such as rent or utilities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Amount;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Necessity {
    pub id: u64,
    pub user_id: u64,
    pub item: String,
    pub amount: Amount,
    /// Free-form recurrence label (`monthly`, `weekly`, ...).
    pub frequency: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewNecessity {
    pub user_id: u64,
    pub item: String,
    pub amount: Amount,
    pub frequency: String,
    pub category: String,
}

impl NewNecessity {
    pub(crate) fn into_necessity(self, id: u64, created_at: DateTime<Utc>) -> Necessity {
        Necessity {
            id,
            user_id: self.user_id,
            item: self.item,
            amount: self.amount,
            frequency: self.frequency,
            category: self.category,
            created_at,
        }
    }
}
