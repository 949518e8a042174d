//! Wishlist collection: things a user would like to buy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Amount;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: u64,
    pub user_id: u64,
    pub item: String,
    pub price: Amount,
    pub category: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewWishlistItem {
    pub user_id: u64,
    pub item: String,
    pub price: Amount,
    pub category: String,
    pub priority: String,
}

impl NewWishlistItem {
    pub(crate) fn into_item(self, id: u64, created_at: DateTime<Utc>) -> WishlistItem {
        WishlistItem {
            id,
            user_id: self.user_id,
            item: self.item,
            price: self.price,
            category: self.category,
            priority: self.priority,
            created_at,
        }
    }
}
