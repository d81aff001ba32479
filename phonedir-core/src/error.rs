//! Structured error types for phonedir-core.
//!
//! Uses `thiserror` for composable library errors. Binary crates can wrap
//! these with `anyhow` at the boundary; library consumers match on them.

use thiserror::Error;

/// Failure while operating on the contacts table.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The phone number is already taken by another contact.
    /// Expected and user-correctable, not a fault.
    #[error("phone number '{phone}' already exists")]
    DuplicatePhone { phone: String },

    /// No contact has the given id. An expected negative outcome:
    /// callers render it and carry on, they never abort on it.
    #[error("contact {id} not found")]
    NotFound { id: i64 },

    /// Any other database failure.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    /// Create a duplicate-phone error
    pub fn duplicate_phone(phone: impl Into<String>) -> Self {
        Self::DuplicatePhone {
            phone: phone.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }
}

/// Connection retries exhausted. Fatal at startup.
///
/// Carries the parameters that were attempted so the operator can see what
/// was tried. The password is deliberately not a field of this type, so no
/// diagnostic path can leak it.
#[derive(Debug, Error)]
#[error(
    "could not connect to postgres at {host}:{port} (database '{database}', user '{user}') \
     after {attempts} attempts: {source}"
)]
pub struct ConnectError {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub attempts: u32,
    #[source]
    pub source: sqlx::Error,
}

/// Invalid environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_PORT '{value}' is not a valid port number")]
    InvalidPort { value: String },
}
