use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Admin identity as stored. Seeded out-of-band; the login flow only reads
/// it. Deliberately not `Serialize`: the password hash must never reach a
/// response body, so outward shapes go through `AdminResponse`.
#[derive(Debug, Clone, FromRow)]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub name: String,
    pub remember_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Terminal {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; every read path filters on it being NULL.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Terminal {
    /// Fresh record for insertion; the store assigns the real id.
    pub fn new(name: String, location: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            location,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Opaque refresh credential. Single-use: exchanging it rotates the row.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenRecord {
    pub id: Uuid,
    pub admin_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    pub fn new(admin_id: i64, ttl_days: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            admin_id,
            token: Uuid::new_v4().to_string(),
            expires_at: now + Duration::days(ttl_days),
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
