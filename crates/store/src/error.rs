//! The module contains the errors the store can return.
//!
//! The errors are:
//!
//! - [`StorageUnavailable`] thrown when the backing file cannot be read or written.
//! - [`MalformedDocument`] thrown when the backing file is not a valid document.
//! - [`InvalidParameter`] thrown when a positional parameter does not bind.
//! - [`DuplicateUser`] thrown when a username or email is already taken.
//!
//! A query that matches nothing is not an error: it yields an empty result
//! or an affected count of `0`.
//!
//!  [`StorageUnavailable`]: StoreError::StorageUnavailable
//!  [`MalformedDocument`]: StoreError::MalformedDocument
//!  [`InvalidParameter`]: StoreError::InvalidParameter
//!  [`DuplicateUser`]: StoreError::DuplicateUser
use thiserror::Error;

/// Store custom errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] std::io::Error),
    #[error("Malformed document: {0}")]
    MalformedDocument(#[from] serde_json::Error),
    #[error("Invalid parameter #{index}: {reason}")]
    InvalidParameter { index: usize, reason: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Duplicate user: {0}")]
    DuplicateUser(String),
}

impl StoreError {
    pub(crate) fn parameter(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            index,
            reason: reason.into(),
        }
    }
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::StorageUnavailable(a), Self::StorageUnavailable(b)) => a.kind() == b.kind(),
            (Self::MalformedDocument(a), Self::MalformedDocument(b)) => {
                a.to_string() == b.to_string()
            }
            (
                Self::InvalidParameter {
                    index: a,
                    reason: ra,
                },
                Self::InvalidParameter {
                    index: b,
                    reason: rb,
                },
            ) => a == b && ra == rb,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::DuplicateUser(a), Self::DuplicateUser(b)) => a == b,
            _ => false,
        }
    }
}
