use crate::{NewUser, ProfileChanges, ResultStore, StoreError, User};

use super::{Store, with_read, with_write};

impl Store {
    /// Insert a user and return its id.
    ///
    /// Fails with [`StoreError::DuplicateUser`] when the username or the email
    /// is already registered. The check runs under the write lock, so two
    /// concurrent registrations cannot both pass it.
    pub async fn insert_user(&self, new: NewUser) -> ResultStore<u64> {
        let created_at = self.now();
        let ids = self.id_strategy();
        with_write!(self, |doc| {
            if let Some(taken) = doc
                .users
                .iter()
                .find(|u| u.username == new.username || u.email == new.email)
            {
                let field = if taken.username == new.username {
                    "username"
                } else {
                    "email"
                };
                return Err(StoreError::DuplicateUser(format!("{field} already registered")));
            }
            let id = ids.next_id(&doc.users);
            doc.users.push(new.into_user(id, created_at));
            (id, true)
        })
    }

    /// Users whose username is `username` OR whose email is `email`.
    pub async fn users_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> ResultStore<Vec<User>> {
        with_read!(self, |doc| {
            doc.users
                .into_iter()
                .filter(|u| u.username == username || u.email == email)
                .collect()
        })
    }

    pub async fn users_by_username(&self, username: &str) -> ResultStore<Vec<User>> {
        with_read!(self, |doc| {
            doc.users
                .into_iter()
                .filter(|u| u.username == username)
                .collect()
        })
    }

    pub async fn user_by_id(&self, id: u64) -> ResultStore<Vec<User>> {
        with_read!(self, |doc| {
            doc.users.into_iter().filter(|u| u.id == id).collect()
        })
    }

    /// Users other than `id` already holding `username`.
    pub async fn users_by_username_excluding(
        &self,
        username: &str,
        id: u64,
    ) -> ResultStore<Vec<User>> {
        with_read!(self, |doc| {
            doc.users
                .into_iter()
                .filter(|u| u.username == username && u.id != id)
                .collect()
        })
    }

    /// Replace the stored password hash. Returns the affected count.
    pub async fn update_user_password(&self, id: u64, password: String) -> ResultStore<usize> {
        with_write!(self, |doc| {
            match doc.users.iter_mut().find(|u| u.id == id) {
                Some(user) => {
                    user.password = password;
                    (1, true)
                }
                None => (0, false),
            }
        })
    }

    /// Replace username, email and full name. Returns the affected count.
    ///
    /// Fails with [`StoreError::DuplicateUser`] when another user already
    /// holds the new username.
    pub async fn update_user_profile(
        &self,
        id: u64,
        changes: ProfileChanges,
    ) -> ResultStore<usize> {
        with_write!(self, |doc| {
            if doc
                .users
                .iter()
                .any(|u| u.id != id && u.username == changes.username)
            {
                return Err(StoreError::DuplicateUser(format!(
                    "username {:?} already taken",
                    changes.username
                )));
            }
            match doc.users.iter_mut().find(|u| u.id == id) {
                Some(user) => {
                    user.username = changes.username;
                    user.email = changes.email;
                    user.full_name = changes.full_name;
                    (1, true)
                }
                None => (0, false),
            }
        })
    }
}
