use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{DocumentStore, IdStrategy, Intent, Query, QueryResult, ResultStore};

mod expenses;
mod necessities;
mod users;
mod wishlist;

pub use expenses::{group_by_category, select_expenses};

/// Default location of the document, relative to the working directory.
pub const DEFAULT_PATH: &str = "data/database.json";

/// Run a block against a freshly loaded document while holding the write lock.
///
/// The block yields `(value, changed)`; the document is saved only when
/// `changed` is true, and before the value is returned.
macro_rules! with_write {
    ($self:expr, |$doc:ident| $body:expr) => {{
        let _guard = $self.inner.write_lock.lock().await;
        #[allow(unused_mut)]
        let mut $doc = $self.inner.documents.load().await?;
        let (value, changed) = $body;
        if changed {
            $self.inner.documents.save(&$doc).await?;
        }
        Ok(value)
    }};
}

/// Run a block against a freshly loaded document, without saving.
macro_rules! with_read {
    ($self:expr, |$doc:ident| $body:expr) => {{
        let $doc = $self.inner.documents.load().await?;
        Ok($body)
    }};
}

pub(crate) use {with_read, with_write};

/// Clock used for `created_at` stamps and for "today" in date scopes.
pub type Clock = fn() -> DateTime<Utc>;

#[derive(Debug)]
struct Inner {
    documents: DocumentStore,
    id_strategy: IdStrategy,
    clock: Clock,
    write_lock: Mutex<()>,
}

/// Query executor over one document file.
///
/// Every call reloads the document. Writers are serialized by a lock shared
/// by all clones of the same `Store`, so a load, change and save sequence
/// never interleaves with another one. Separate `Store`s (or processes)
/// pointed at the same file are not coordinated.
#[derive(Clone, Debug)]
pub struct Store {
    inner: Arc<Inner>,
}

impl Store {
    /// Return a builder for `Store`. Help to build the struct.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// The raw document file, without locking.
    pub fn documents(&self) -> &DocumentStore {
        &self.inner.documents
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.inner.id_strategy
    }

    fn now(&self) -> DateTime<Utc> {
        (self.inner.clock)()
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Bind `params` to `intent` and run it.
    pub async fn execute(&self, intent: Intent, params: &[Value]) -> ResultStore<QueryResult> {
        let query = Query::bind(intent, params)?;
        self.run(query).await
    }

    /// Run a typed query.
    pub async fn run(&self, query: Query) -> ResultStore<QueryResult> {
        debug!(query = query.name(), "running query");
        let result = match query {
            Query::InsertUser(new) => QueryResult::Inserted {
                inserted_id: self.insert_user(new).await?,
            },
            Query::SelectUserByUsernameOrEmail { username, email } => QueryResult::Users(
                self.users_by_username_or_email(&username, &email).await?,
            ),
            Query::SelectUserByUsername { username } => {
                QueryResult::Users(self.users_by_username(&username).await?)
            }
            Query::SelectUserById { id } => QueryResult::Users(self.user_by_id(id).await?),
            Query::SelectUserByUsernameExcludingId { username, id } => {
                QueryResult::Users(self.users_by_username_excluding(&username, id).await?)
            }
            Query::UpdateUserPassword { id, password } => QueryResult::Affected {
                affected_count: self.update_user_password(id, password).await?,
            },
            Query::UpdateUserProfile { id, changes } => QueryResult::Affected {
                affected_count: self.update_user_profile(id, changes).await?,
            },
            Query::InsertExpense(new) => QueryResult::Inserted {
                inserted_id: self.insert_expense(new).await?,
            },
            Query::SelectExpenses { filter, order } => {
                QueryResult::Expenses(self.expenses(filter, order).await?)
            }
            Query::UpdateExpense {
                id,
                user_id,
                changes,
            } => QueryResult::Affected {
                affected_count: self.update_expense(id, user_id, changes).await?,
            },
            Query::DeleteExpense { id, user_id } => QueryResult::Affected {
                affected_count: self.delete_expense(id, user_id).await?,
            },
            Query::SumExpenses(filter) => QueryResult::Total {
                total: self.sum_expenses(filter).await?,
            },
            Query::CountExpenses(filter) => QueryResult::Count {
                count: self.count_expenses(filter).await?,
            },
            Query::GroupExpensesByCategory(filter) => {
                QueryResult::Categories(self.expenses_by_category(filter).await?)
            }
            Query::InsertWishlistItem(new) => QueryResult::Inserted {
                inserted_id: self.insert_wishlist_item(new).await?,
            },
            Query::SelectWishlist { user_id } => {
                QueryResult::Wishlist(self.wishlist(user_id).await?)
            }
            Query::DeleteWishlistItem { id, user_id } => QueryResult::Affected {
                affected_count: self.delete_wishlist_item(id, user_id).await?,
            },
            Query::InsertNecessity(new) => QueryResult::Inserted {
                inserted_id: self.insert_necessity(new).await?,
            },
            Query::SelectNecessities { user_id } => {
                QueryResult::Necessities(self.necessities(user_id).await?)
            }
            Query::DeleteNecessity { id, user_id } => QueryResult::Affected {
                affected_count: self.delete_necessity(id, user_id).await?,
            },
        };
        Ok(result)
    }
}

/// The builder for `Store`
pub struct StoreBuilder {
    path: PathBuf,
    id_strategy: IdStrategy,
    recover_malformed: bool,
    clock: Clock,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            id_strategy: IdStrategy::default(),
            recover_malformed: false,
            clock: Utc::now,
        }
    }
}

impl StoreBuilder {
    /// Location of the document file.
    pub fn path(mut self, path: impl Into<PathBuf>) -> StoreBuilder {
        self.path = path.into();
        self
    }

    pub fn id_strategy(mut self, id_strategy: IdStrategy) -> StoreBuilder {
        self.id_strategy = id_strategy;
        self
    }

    /// Read an unparsable document as empty instead of failing.
    pub fn recover_malformed(mut self, recover: bool) -> StoreBuilder {
        self.recover_malformed = recover;
        self
    }

    pub fn clock(mut self, clock: Clock) -> StoreBuilder {
        self.clock = clock;
        self
    }

    /// Construct `Store`, creating the document if it does not exist yet.
    pub async fn build(self) -> ResultStore<Store> {
        let documents = DocumentStore::new(self.path).recover_malformed(self.recover_malformed);
        if documents.init().await? {
            tracing::info!(path = %documents.path().display(), "initialized empty document");
        }
        Ok(Store {
            inner: Arc::new(Inner {
                documents,
                id_strategy: self.id_strategy,
                clock: self.clock,
                write_lock: Mutex::new(()),
            }),
        })
    }
}
