//! Entity stores over PostgreSQL.
//!
//! One capability trait, implemented once per entity. Lookups go through
//! closed key enums that resolve to fixed column names, so no
//! caller-supplied string ever reaches the query text.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::models::{AdminAccount, RefreshTokenRecord, Terminal};
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub enum AdminKey {
    Id(i64),
    Username(String),
}

impl AdminKey {
    pub fn column(&self) -> &'static str {
        match self {
            AdminKey::Id(_) => "id",
            AdminKey::Username(_) => "username",
        }
    }
}

#[derive(Debug, Clone)]
pub enum TerminalKey {
    Id(i64),
    Name(String),
}

impl TerminalKey {
    pub fn column(&self) -> &'static str {
        match self {
            TerminalKey::Id(_) => "id",
            TerminalKey::Name(_) => "name",
        }
    }
}

#[derive(Debug, Clone)]
pub enum RefreshTokenKey {
    Id(Uuid),
    Token(String),
}

impl RefreshTokenKey {
    pub fn column(&self) -> &'static str {
        match self {
            RefreshTokenKey::Id(_) => "id",
            RefreshTokenKey::Token(_) => "token",
        }
    }
}

/// Data-access contract for a single backing table. Single-attempt
/// semantics: no retries, and writes run in a scoped transaction whose
/// rollback fires only on the error path (commit consumes the transaction,
/// so rollback-after-commit cannot happen).
#[async_trait]
pub trait EntityStore<T>: Send + Sync {
    type Key: Send + Sync + 'static;

    /// Inserts and returns the stored row (with its assigned id).
    async fn create(&self, record: &T) -> Result<T, StoreError>;

    /// Full-record replace by primary key; `NotFound` when no row matched.
    async fn update(&self, record: &T) -> Result<T, StoreError>;

    /// Removes by primary key. Soft-deleting entities mark instead of
    /// removing; either way the row stops matching reads.
    async fn delete(&self, record: &T) -> Result<(), StoreError>;

    /// Exact-match count for the given key.
    async fn count_by(&self, key: &Self::Key) -> Result<i64, StoreError>;

    /// First match for the given key; `NotFound` on zero rows, never a
    /// silently defaulted record.
    async fn find_by(&self, key: &Self::Key) -> Result<T, StoreError>;
}

/// Terminal-specific reads on top of the generic contract.
#[async_trait]
pub trait TerminalStore: EntityStore<Terminal, Key = TerminalKey> {
    /// One page of non-deleted terminals ordered newest-first, plus the
    /// filtered total. Count and fetch are two statements, not one
    /// snapshot, so the total can drift under concurrent writes.
    async fn list(&self, page: i64, size: i64) -> Result<(Vec<Terminal>, i64), StoreError>;
}

pub struct PgAdminStore {
    pool: Arc<PgPool>,
}

impl PgAdminStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<AdminAccount> for PgAdminStore {
    type Key = AdminKey;

    async fn create(&self, record: &AdminAccount) -> Result<AdminAccount, StoreError> {
        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, AdminAccount>(
            "INSERT INTO admins (username, password, name, remember_token, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&record.username)
        .bind(&record.password)
        .bind(&record.name)
        .bind(&record.remember_token)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, record: &AdminAccount) -> Result<AdminAccount, StoreError> {
        sqlx::query_as::<_, AdminAccount>(
            "UPDATE admins \
             SET username = $1, password = $2, name = $3, remember_token = $4, updated_at = $5 \
             WHERE id = $6 \
             RETURNING *",
        )
        .bind(&record.username)
        .bind(&record.password)
        .bind(&record.name)
        .bind(&record.remember_token)
        .bind(Utc::now())
        .bind(record.id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, record: &AdminAccount) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(record.id)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn count_by(&self, key: &AdminKey) -> Result<i64, StoreError> {
        // Column name comes from the closed enum, never from the caller.
        let sql = format!("SELECT COUNT(*) FROM admins WHERE {} = $1", key.column());
        let query = sqlx::query_scalar::<_, i64>(&sql);
        let count = match key {
            AdminKey::Id(id) => query.bind(id).fetch_one(self.pool.as_ref()).await?,
            AdminKey::Username(username) => {
                query.bind(username).fetch_one(self.pool.as_ref()).await?
            }
        };
        Ok(count)
    }

    async fn find_by(&self, key: &AdminKey) -> Result<AdminAccount, StoreError> {
        let sql = format!("SELECT * FROM admins WHERE {} = $1 LIMIT 1", key.column());
        let query = sqlx::query_as::<_, AdminAccount>(&sql);
        let row = match key {
            AdminKey::Id(id) => query.bind(id).fetch_optional(self.pool.as_ref()).await?,
            AdminKey::Username(username) => {
                query.bind(username).fetch_optional(self.pool.as_ref()).await?
            }
        };
        row.ok_or(StoreError::NotFound)
    }
}

pub struct PgTerminalStore {
    pool: Arc<PgPool>,
}

impl PgTerminalStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Terminal> for PgTerminalStore {
    type Key = TerminalKey;

    async fn create(&self, record: &Terminal) -> Result<Terminal, StoreError> {
        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, Terminal>(
            "INSERT INTO terminal (name, location, created_at, updated_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&record.name)
        .bind(&record.location)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, record: &Terminal) -> Result<Terminal, StoreError> {
        sqlx::query_as::<_, Terminal>(
            "UPDATE terminal \
             SET name = $1, location = $2, updated_at = $3 \
             WHERE id = $4 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(&record.name)
        .bind(&record.location)
        .bind(Utc::now())
        .bind(record.id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, record: &Terminal) -> Result<(), StoreError> {
        // Soft delete: the row stays for audit but stops matching reads.
        let result = sqlx::query(
            "UPDATE terminal SET deleted_at = $1, updated_at = $1 \
             WHERE id = $2 AND deleted_at IS NULL",
        )
        .bind(Utc::now())
        .bind(record.id)
        .execute(self.pool.as_ref())
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn count_by(&self, key: &TerminalKey) -> Result<i64, StoreError> {
        let sql = format!(
            "SELECT COUNT(*) FROM terminal WHERE {} = $1 AND deleted_at IS NULL",
            key.column()
        );
        let query = sqlx::query_scalar::<_, i64>(&sql);
        let count = match key {
            TerminalKey::Id(id) => query.bind(id).fetch_one(self.pool.as_ref()).await?,
            TerminalKey::Name(name) => query.bind(name).fetch_one(self.pool.as_ref()).await?,
        };
        Ok(count)
    }

    async fn find_by(&self, key: &TerminalKey) -> Result<Terminal, StoreError> {
        let sql = format!(
            "SELECT * FROM terminal WHERE {} = $1 AND deleted_at IS NULL LIMIT 1",
            key.column()
        );
        let query = sqlx::query_as::<_, Terminal>(&sql);
        let row = match key {
            TerminalKey::Id(id) => query.bind(id).fetch_optional(self.pool.as_ref()).await?,
            TerminalKey::Name(name) => query.bind(name).fetch_optional(self.pool.as_ref()).await?,
        };
        row.ok_or(StoreError::NotFound)
    }
}

/// Row offset for a 1-based page, or `None` when the product exceeds
/// `i64` — no table has rows past that point, so such a page is empty.
fn page_offset(page: i64, size: i64) -> Option<i64> {
    page.checked_sub(1)?.checked_mul(size)
}

#[async_trait]
impl TerminalStore for PgTerminalStore {
    async fn list(&self, page: i64, size: i64) -> Result<(Vec<Terminal>, i64), StoreError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM terminal WHERE deleted_at IS NULL",
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        let rows = match page_offset(page, size) {
            Some(offset) => {
                sqlx::query_as::<_, Terminal>(
                    "SELECT * FROM terminal WHERE deleted_at IS NULL \
                     ORDER BY created_at DESC \
                     OFFSET $1 LIMIT $2",
                )
                .bind(offset)
                .bind(size)
                .fetch_all(self.pool.as_ref())
                .await?
            }
            None => Vec::new(),
        };

        Ok((rows, total))
    }
}

pub struct PgRefreshTokenStore {
    pool: Arc<PgPool>,
}

impl PgRefreshTokenStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<RefreshTokenRecord> for PgRefreshTokenStore {
    type Key = RefreshTokenKey;

    async fn create(&self, record: &RefreshTokenRecord) -> Result<RefreshTokenRecord, StoreError> {
        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, RefreshTokenRecord>(
            "INSERT INTO refresh_tokens (id, admin_id, token, expires_at, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(record.id)
        .bind(record.admin_id)
        .bind(&record.token)
        .bind(record.expires_at)
        .bind(record.created_at)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, record: &RefreshTokenRecord) -> Result<RefreshTokenRecord, StoreError> {
        sqlx::query_as::<_, RefreshTokenRecord>(
            "UPDATE refresh_tokens SET token = $1, expires_at = $2 \
             WHERE id = $3 \
             RETURNING *",
        )
        .bind(&record.token)
        .bind(record.expires_at)
        .bind(record.id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, record: &RefreshTokenRecord) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
            .bind(record.id)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn count_by(&self, key: &RefreshTokenKey) -> Result<i64, StoreError> {
        let sql = format!(
            "SELECT COUNT(*) FROM refresh_tokens WHERE {} = $1",
            key.column()
        );
        let query = sqlx::query_scalar::<_, i64>(&sql);
        let count = match key {
            RefreshTokenKey::Id(id) => query.bind(id).fetch_one(self.pool.as_ref()).await?,
            RefreshTokenKey::Token(token) => {
                query.bind(token).fetch_one(self.pool.as_ref()).await?
            }
        };
        Ok(count)
    }

    async fn find_by(&self, key: &RefreshTokenKey) -> Result<RefreshTokenRecord, StoreError> {
        let sql = format!(
            "SELECT * FROM refresh_tokens WHERE {} = $1 LIMIT 1",
            key.column()
        );
        let query = sqlx::query_as::<_, RefreshTokenRecord>(&sql);
        let row = match key {
            RefreshTokenKey::Id(id) => query.bind(id).fetch_optional(self.pool.as_ref()).await?,
            RefreshTokenKey::Token(token) => {
                query.bind(token).fetch_optional(self.pool.as_ref()).await?
            }
        };
        row.ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use mockall::mock;

    mock! {
        pub AdminStore {}

        #[async_trait]
        impl EntityStore<AdminAccount> for AdminStore {
            type Key = AdminKey;

            async fn create(&self, record: &AdminAccount) -> Result<AdminAccount, StoreError>;
            async fn update(&self, record: &AdminAccount) -> Result<AdminAccount, StoreError>;
            async fn delete(&self, record: &AdminAccount) -> Result<(), StoreError>;
            async fn count_by(&self, key: &AdminKey) -> Result<i64, StoreError>;
            async fn find_by(&self, key: &AdminKey) -> Result<AdminAccount, StoreError>;
        }
    }

    mock! {
        pub TerminalRepo {}

        #[async_trait]
        impl EntityStore<Terminal> for TerminalRepo {
            type Key = TerminalKey;

            async fn create(&self, record: &Terminal) -> Result<Terminal, StoreError>;
            async fn update(&self, record: &Terminal) -> Result<Terminal, StoreError>;
            async fn delete(&self, record: &Terminal) -> Result<(), StoreError>;
            async fn count_by(&self, key: &TerminalKey) -> Result<i64, StoreError>;
            async fn find_by(&self, key: &TerminalKey) -> Result<Terminal, StoreError>;
        }

        #[async_trait]
        impl TerminalStore for TerminalRepo {
            async fn list(&self, page: i64, size: i64) -> Result<(Vec<Terminal>, i64), StoreError>;
        }
    }

    mock! {
        pub RefreshTokenRepo {}

        #[async_trait]
        impl EntityStore<RefreshTokenRecord> for RefreshTokenRepo {
            type Key = RefreshTokenKey;

            async fn create(&self, record: &RefreshTokenRecord) -> Result<RefreshTokenRecord, StoreError>;
            async fn update(&self, record: &RefreshTokenRecord) -> Result<RefreshTokenRecord, StoreError>;
            async fn delete(&self, record: &RefreshTokenRecord) -> Result<(), StoreError>;
            async fn count_by(&self, key: &RefreshTokenKey) -> Result<i64, StoreError>;
            async fn find_by(&self, key: &RefreshTokenKey) -> Result<RefreshTokenRecord, StoreError>;
        }
    }
}
