//! Contact store: CRUD and search against the `contacts` table.
//!
//! All statements are parameterized and each write commits before
//! returning. Constraint handling follows the table, not check-then-insert:
//! a unique violation on `phone` comes back as [`StoreError::DuplicatePhone`],
//! zero rows affected comes back as [`StoreError::NotFound`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::StoreError;

/// One directory entry.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Fields the caller supplies for add/update; the store assigns the rest.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl NewContact {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }
}

/// Contact repository. Borrows the pool; cheap to construct per use.
pub struct ContactStore<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a contact, returning its store-assigned id.
    pub async fn add(&self, contact: &NewContact) -> Result<i64, StoreError> {
        let row: (i64,) = sqlx::query_as(
            "INSERT INTO contacts (name, phone, address) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(&contact.address)
        .fetch_one(self.pool)
        .await
        .map_err(|err| classify_phone_conflict(err, &contact.phone))?;

        Ok(row.0)
    }

    /// Case-insensitive substring search across name, phone, and address.
    pub async fn search(&self, term: &str) -> Result<Vec<Contact>, StoreError> {
        let pattern = format!("%{term}%");
        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, name, phone, address, created_at
            FROM contacts
            WHERE name ILIKE $1 OR phone ILIKE $1 OR address ILIKE $1
            ORDER BY name
            "#,
        )
        .bind(&pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(contacts)
    }

    /// Every contact, ordered by name.
    pub async fn list_all(&self) -> Result<Vec<Contact>, StoreError> {
        let contacts = sqlx::query_as::<_, Contact>(
            "SELECT id, name, phone, address, created_at FROM contacts ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(contacts)
    }

    /// Replace all mutable fields of a contact.
    pub async fn update(&self, id: i64, contact: &NewContact) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE contacts SET name = $2, phone = $3, address = $4 WHERE id = $1")
            .bind(id)
            .bind(&contact.name)
            .bind(&contact.phone)
            .bind(&contact.address)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(id));
        }

        Ok(())
    }

    /// Remove a contact by id.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(id));
        }

        Ok(())
    }
}

/// Map a unique-constraint violation to the expected duplicate-phone
/// outcome; everything else stays a generic store failure.
fn classify_phone_conflict(err: sqlx::Error, phone: &str) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return StoreError::duplicate_phone(phone);
        }
    }
    StoreError::Sqlx(err)
}

/// Create the contacts table if it does not exist yet.
///
/// Idempotent bootstrap run by both front-ends at startup. The UNIQUE
/// constraint on phone is the single arbiter for concurrent writers.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            phone TEXT NOT NULL UNIQUE,
            address TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
