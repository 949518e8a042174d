//! The persisted document: four collections in one JSON object.

use serde::{Deserialize, Serialize};

use crate::{Expense, Necessity, User, WishlistItem};

/// The whole store content.
///
/// Serialized as an object with exactly the keys `users`, `expenses`,
/// `wishlist` and `necessities`. A file missing any of them is malformed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub users: Vec<User>,
    pub expenses: Vec<Expense>,
    pub wishlist: Vec<WishlistItem>,
    pub necessities: Vec<Necessity>,
}

/// A record stored in one of the collections.
pub trait Record {
    fn id(&self) -> u64;
}

/// A record that belongs to a user.
pub trait Owned: Record {
    fn user_id(&self) -> u64;

    fn is_owned_by(&self, user_id: u64) -> bool {
        self.user_id() == user_id
    }
}

impl Record for User {
    fn id(&self) -> u64 {
        self.id
    }
}

macro_rules! owned_record {
    ($($ty:ty),+ $(,)?) => {$(
        impl Record for $ty {
            fn id(&self) -> u64 {
                self.id
            }
        }

        impl Owned for $ty {
            fn user_id(&self) -> u64 {
                self.user_id
            }
        }
    )+};
}

owned_record!(Expense, WishlistItem, Necessity);

/// How a new record id is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// `len + 1`. After a deletion this can hand out an id that a live
    /// record still carries.
    CollectionSize,
    /// `max(id) + 1`. Never collides with a live record.
    #[default]
    NextAfterMax,
}

impl IdStrategy {
    pub fn next_id<R: Record>(self, records: &[R]) -> u64 {
        match self {
            IdStrategy::CollectionSize => records.len() as u64 + 1,
            IdStrategy::NextAfterMax => records.iter().map(Record::id).max().unwrap_or(0) + 1,
        }
    }
}

/// Remove the record `(id, user_id)` and return how many were removed.
pub(crate) fn remove_owned<R: Owned>(records: &mut Vec<R>, id: u64, user_id: u64) -> usize {
    let before = records.len();
    records.retain(|r| !(r.id() == id && r.is_owned_by(user_id)));
    before - records.len()
}
