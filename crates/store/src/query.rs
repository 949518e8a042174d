//! Query intents and their positional parameters.
//!
//! Callers pick an [`Intent`] and pass parameters positionally, the way a
//! prepared statement takes `?` placeholders. [`Query::bind`] turns the pair
//! into a typed [`Query`]; the store runs typed queries only.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Amount, Expense, ExpenseChanges, NewExpense, NewNecessity, NewUser, NewWishlistItem,
    Necessity, ProfileChanges, ResultStore, User, WishlistItem,
    util::{param_amount, param_date, param_id, param_optional_text, param_text},
};

/// Calendar window applied to expense dates, relative to "today".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    All,
    /// Same calendar month and year as today.
    CurrentMonth,
    Today,
}

/// Which expenses an expense intent considers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scope {
    /// When set, the first positional parameter is the owner's user id.
    pub by_user: bool,
    pub period: Period,
}

impl Default for Scope {
    fn default() -> Self {
        Self {
            by_user: true,
            period: Period::All,
        }
    }
}

impl Scope {
    pub const fn user(period: Period) -> Self {
        Self {
            by_user: true,
            period,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseOrder {
    /// Storage order.
    #[default]
    Insertion,
    /// Newest calendar date first.
    DateDesc,
    /// Most recently recorded first.
    CreatedAtDesc,
}

/// The closed set of operations the store understands.
///
/// The comment on each variant lists its positional parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// username, email, password, [full_name]
    InsertUser,
    /// username, email
    SelectUserByUsernameOrEmail,
    /// username
    SelectUserByUsername,
    /// id
    SelectUserById,
    /// username, id
    SelectUserByUsernameExcludingId,
    /// password, id
    UpdateUserPassword,
    /// username, email, full_name, id
    UpdateUserProfile,
    /// user_id, amount, category, description, date
    InsertExpense,
    /// [user_id]
    SelectExpenses {
        #[serde(default)]
        scope: Scope,
        #[serde(default)]
        order: ExpenseOrder,
    },
    /// amount, category, description, date, id, user_id
    UpdateExpense,
    /// id, user_id
    DeleteExpense,
    /// [user_id]
    SumExpenses {
        #[serde(default)]
        scope: Scope,
    },
    /// [user_id]
    CountExpenses {
        #[serde(default)]
        scope: Scope,
    },
    /// [user_id]
    GroupExpensesByCategory {
        #[serde(default)]
        scope: Scope,
    },
    /// user_id, item, price, category, priority
    InsertWishlistItem,
    /// user_id
    SelectWishlist,
    /// id, user_id
    DeleteWishlistItem,
    /// user_id, item, amount, frequency, category
    InsertNecessity,
    /// user_id
    SelectNecessities,
    /// id, user_id
    DeleteNecessity,
}

/// Expense filter resolved from a [`Scope`] and its parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub user_id: Option<u64>,
    pub period: Period,
}

impl ExpenseFilter {
    pub const fn user(user_id: u64, period: Period) -> Self {
        Self {
            user_id: Some(user_id),
            period,
        }
    }

    fn bind(scope: Scope, params: &[Value]) -> ResultStore<Self> {
        let user_id = if scope.by_user {
            Some(param_id(params, 0)?)
        } else {
            None
        };
        Ok(Self {
            user_id,
            period: scope.period,
        })
    }

    /// `today` is the evaluation date for [`Period::CurrentMonth`] and [`Period::Today`].
    pub fn matches(&self, expense: &Expense, today: NaiveDate) -> bool {
        if self.user_id.is_some_and(|user_id| expense.user_id != user_id) {
            return false;
        }
        match self.period {
            Period::All => true,
            Period::CurrentMonth => {
                expense.date.year() == today.year() && expense.date.month() == today.month()
            }
            Period::Today => expense.date == today,
        }
    }
}

/// A fully typed query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    InsertUser(NewUser),
    SelectUserByUsernameOrEmail {
        username: String,
        email: String,
    },
    SelectUserByUsername {
        username: String,
    },
    SelectUserById {
        id: u64,
    },
    SelectUserByUsernameExcludingId {
        username: String,
        id: u64,
    },
    UpdateUserPassword {
        id: u64,
        password: String,
    },
    UpdateUserProfile {
        id: u64,
        changes: ProfileChanges,
    },
    InsertExpense(NewExpense),
    SelectExpenses {
        filter: ExpenseFilter,
        order: ExpenseOrder,
    },
    UpdateExpense {
        id: u64,
        user_id: u64,
        changes: ExpenseChanges,
    },
    DeleteExpense {
        id: u64,
        user_id: u64,
    },
    SumExpenses(ExpenseFilter),
    CountExpenses(ExpenseFilter),
    GroupExpensesByCategory(ExpenseFilter),
    InsertWishlistItem(NewWishlistItem),
    SelectWishlist {
        user_id: u64,
    },
    DeleteWishlistItem {
        id: u64,
        user_id: u64,
    },
    InsertNecessity(NewNecessity),
    SelectNecessities {
        user_id: u64,
    },
    DeleteNecessity {
        id: u64,
        user_id: u64,
    },
}

impl Query {
    /// Bind positional parameters to an intent.
    pub fn bind(intent: Intent, params: &[Value]) -> ResultStore<Self> {
        let query = match intent {
            Intent::InsertUser => Query::InsertUser(NewUser {
                username: param_text(params, 0)?,
                email: param_text(params, 1)?,
                password: param_text(params, 2)?,
                full_name: param_optional_text(params, 3)?,
            }),
            Intent::SelectUserByUsernameOrEmail => Query::SelectUserByUsernameOrEmail {
                username: param_text(params, 0)?,
                email: param_text(params, 1)?,
            },
            Intent::SelectUserByUsername => Query::SelectUserByUsername {
                username: param_text(params, 0)?,
            },
            Intent::SelectUserById => Query::SelectUserById {
                id: param_id(params, 0)?,
            },
            Intent::SelectUserByUsernameExcludingId => Query::SelectUserByUsernameExcludingId {
                username: param_text(params, 0)?,
                id: param_id(params, 1)?,
            },
            Intent::UpdateUserPassword => Query::UpdateUserPassword {
                password: param_text(params, 0)?,
                id: param_id(params, 1)?,
            },
            Intent::UpdateUserProfile => Query::UpdateUserProfile {
                changes: ProfileChanges {
                    username: param_text(params, 0)?,
                    email: param_text(params, 1)?,
                    full_name: param_optional_text(params, 2)?,
                },
                id: param_id(params, 3)?,
            },
            Intent::InsertExpense => Query::InsertExpense(NewExpense {
                user_id: param_id(params, 0)?,
                amount: param_amount(params, 1)?,
                category: param_text(params, 2)?,
                description: param_optional_text(params, 3)?,
                date: param_date(params, 4)?,
            }),
            Intent::SelectExpenses { scope, order } => Query::SelectExpenses {
                filter: ExpenseFilter::bind(scope, params)?,
                order,
            },
            Intent::UpdateExpense => Query::UpdateExpense {
                changes: ExpenseChanges {
                    amount: param_amount(params, 0)?,
                    category: param_text(params, 1)?,
                    description: param_optional_text(params, 2)?,
                    date: param_date(params, 3)?,
                },
                id: param_id(params, 4)?,
                user_id: param_id(params, 5)?,
            },
            Intent::DeleteExpense => Query::DeleteExpense {
                id: param_id(params, 0)?,
                user_id: param_id(params, 1)?,
            },
            Intent::SumExpenses { scope } => {
                Query::SumExpenses(ExpenseFilter::bind(scope, params)?)
            }
            Intent::CountExpenses { scope } => {
                Query::CountExpenses(ExpenseFilter::bind(scope, params)?)
            }
            Intent::GroupExpensesByCategory { scope } => {
                Query::GroupExpensesByCategory(ExpenseFilter::bind(scope, params)?)
            }
            Intent::InsertWishlistItem => Query::InsertWishlistItem(NewWishlistItem {
                user_id: param_id(params, 0)?,
                item: param_text(params, 1)?,
                price: param_amount(params, 2)?,
                category: param_text(params, 3)?,
                priority: param_text(params, 4)?,
            }),
            Intent::SelectWishlist => Query::SelectWishlist {
                user_id: param_id(params, 0)?,
            },
            Intent::DeleteWishlistItem => Query::DeleteWishlistItem {
                id: param_id(params, 0)?,
                user_id: param_id(params, 1)?,
            },
            Intent::InsertNecessity => Query::InsertNecessity(NewNecessity {
                user_id: param_id(params, 0)?,
                item: param_text(params, 1)?,
                amount: param_amount(params, 2)?,
                frequency: param_text(params, 3)?,
                category: param_text(params, 4)?,
            }),
            Intent::SelectNecessities => Query::SelectNecessities {
                user_id: param_id(params, 0)?,
            },
            Intent::DeleteNecessity => Query::DeleteNecessity {
                id: param_id(params, 0)?,
                user_id: param_id(params, 1)?,
            },
        };
        Ok(query)
    }

    /// `true` for queries that may rewrite the document.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Query::InsertUser(_)
                | Query::UpdateUserPassword { .. }
                | Query::UpdateUserProfile { .. }
                | Query::InsertExpense(_)
                | Query::UpdateExpense { .. }
                | Query::DeleteExpense { .. }
                | Query::InsertWishlistItem(_)
                | Query::DeleteWishlistItem { .. }
                | Query::InsertNecessity(_)
                | Query::DeleteNecessity { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Query::InsertUser(_) => "insert_user",
            Query::SelectUserByUsernameOrEmail { .. } => "select_user_by_username_or_email",
            Query::SelectUserByUsername { .. } => "select_user_by_username",
            Query::SelectUserById { .. } => "select_user_by_id",
            Query::SelectUserByUsernameExcludingId { .. } => {
                "select_user_by_username_excluding_id"
            }
            Query::UpdateUserPassword { .. } => "update_user_password",
            Query::UpdateUserProfile { .. } => "update_user_profile",
            Query::InsertExpense(_) => "insert_expense",
            Query::SelectExpenses { .. } => "select_expenses",
            Query::UpdateExpense { .. } => "update_expense",
            Query::DeleteExpense { .. } => "delete_expense",
            Query::SumExpenses(_) => "sum_expenses",
            Query::CountExpenses(_) => "count_expenses",
            Query::GroupExpensesByCategory(_) => "group_expenses_by_category",
            Query::InsertWishlistItem(_) => "insert_wishlist_item",
            Query::SelectWishlist { .. } => "select_wishlist",
            Query::DeleteWishlistItem { .. } => "delete_wishlist_item",
            Query::InsertNecessity(_) => "insert_necessity",
            Query::SelectNecessities { .. } => "select_necessities",
            Query::DeleteNecessity { .. } => "delete_necessity",
        }
    }
}

/// Per-category total produced by [`Intent::GroupExpensesByCategory`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Amount,
}

/// What a query returns: rows, one aggregate, or a write outcome.
///
/// Serializes to the shapes callers expect: an array of rows, `{"total": ..}`,
/// `{"count": ..}`, `{"insertedId": ..}` or `{"affectedCount": ..}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum QueryResult {
    Users(Vec<User>),
    Expenses(Vec<Expense>),
    Wishlist(Vec<WishlistItem>),
    Necessities(Vec<Necessity>),
    Categories(Vec<CategoryTotal>),
    Total { total: Amount },
    Count { count: usize },
    Inserted { inserted_id: u64 },
    Affected { affected_count: usize },
}

impl QueryResult {
    pub fn inserted_id(&self) -> Option<u64> {
        match self {
            QueryResult::Inserted { inserted_id } => Some(*inserted_id),
            _ => None,
        }
    }

    pub fn affected_count(&self) -> Option<usize> {
        match self {
            QueryResult::Affected { affected_count } => Some(*affected_count),
            _ => None,
        }
    }

    /// Number of rows for row results, `None` otherwise.
    pub fn row_count(&self) -> Option<usize> {
        match self {
            QueryResult::Users(rows) => Some(rows.len()),
            QueryResult::Expenses(rows) => Some(rows.len()),
            QueryResult::Wishlist(rows) => Some(rows.len()),
            QueryResult::Necessities(rows) => Some(rows.len()),
            QueryResult::Categories(rows) => Some(rows.len()),
            _ => None,
        }
    }
}
