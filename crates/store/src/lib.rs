//! Embedded document store for an expense tracker.
//!
//! The whole dataset is one JSON file with four collections (`users`,
//! `expenses`, `wishlist`, `necessities`). Callers send an [`Intent`] with
//! positional parameters to [`Store::execute`]; the store reloads the file,
//! runs the matching handler and, for writes, replaces the file before
//! returning.
//!
//! ```no_run
//! use expense_store::{Intent, Period, Scope, Store};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), expense_store::StoreError> {
//! let store = Store::builder().path("data/database.json").build().await?;
//! store
//!     .execute(
//!         Intent::InsertExpense,
//!         &[json!(1), json!("12.50"), json!("food"), json!(null), json!("2024-03-01")],
//!     )
//!     .await?;
//! let total = store
//!     .execute(Intent::SumExpenses { scope: Scope::user(Period::All) }, &[json!(1)])
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub use amount::Amount;
pub use document::{Document, IdStrategy, Owned, Record};
pub use error::StoreError;
pub use expenses::{Expense, ExpenseChanges, NewExpense};
pub use necessities::{Necessity, NewNecessity};
pub use ops::{Clock, DEFAULT_PATH, Store, StoreBuilder, group_by_category, select_expenses};
pub use query::{
    CategoryTotal, ExpenseFilter, ExpenseOrder, Intent, Period, Query, QueryResult, Scope,
};
pub use storage::DocumentStore;
pub use users::{NewUser, ProfileChanges, User};
pub use wishlist::{NewWishlistItem, WishlistItem};

mod amount;
mod document;
mod error;
mod expenses;
mod necessities;
mod ops;
mod query;
mod storage;
mod users;
mod util;
mod wishlist;

pub type ResultStore<T> = Result<T, StoreError>;
