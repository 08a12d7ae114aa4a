use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::auth::models::{AdminResponse, LoginRequest, LoginResponse, RefreshRequest, TokenResponse};
use crate::config::AuthConfig;
use crate::db::models::{AdminAccount, RefreshTokenRecord};
use crate::db::store::{AdminKey, EntityStore, RefreshTokenKey};
use crate::error::{AppError, StoreError};
use crate::validation::validate_request;

pub const ACCESS_TOKEN_TYPE: &str = "access";

/// Access token claims. `exp` is an absolute unix timestamp; the type
/// discriminator keeps other token kinds out of the access path.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub uid: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub exp: i64,
}

/// Minimal authenticated identity handed to downstream handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthAdmin {
    pub id: i64,
}

pub type AdminStore = dyn EntityStore<AdminAccount, Key = AdminKey>;
pub type RefreshTokenStore = dyn EntityStore<RefreshTokenRecord, Key = RefreshTokenKey>;

pub struct AuthService {
    admins: Arc<AdminStore>,
    refresh_tokens: Arc<RefreshTokenStore>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(
        admins: Arc<AdminStore>,
        refresh_tokens: Arc<RefreshTokenStore>,
        config: AuthConfig,
    ) -> Self {
        Self {
            admins,
            refresh_tokens,
            config,
        }
    }

    /// Credential check followed by token issuance. Unknown username and
    /// wrong password both surface as the same `InvalidCredentials`.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        validate_request(request)?;

        let admin = match self
            .admins
            .find_by(&AdminKey::Username(request.username.clone()))
            .await
        {
            Ok(admin) => admin,
            Err(StoreError::NotFound) => {
                warn!("login failed: unknown username");
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        let password_ok = bcrypt::verify(&request.password, &admin.password)
            .map_err(|e| AppError::Internal(format!("password hash comparison failed: {}", e)))?;
        if !password_ok {
            warn!("login failed: password mismatch for admin {}", admin.id);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issue_tokens(&admin).await?;
        Ok(LoginResponse {
            token,
            admin: AdminResponse::from(&admin),
        })
    }

    /// Validates a bearer token string and resolves it to a stored admin.
    /// Every failure collapses into `Unauthorized`; the client only ever
    /// learns "Invalid token", never which step rejected it.
    pub async fn verify(&self, raw_token: &str) -> Result<AuthAdmin, AppError> {
        let token = raw_token.strip_prefix("Bearer ").unwrap_or(raw_token).trim();

        // Pinning HS256 rejects algorithm-confusion tokens; `exp` is a
        // required claim and checked with zero leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            warn!("token rejected: {}", e);
            AppError::Unauthorized
        })?;

        if data.claims.token_type != ACCESS_TOKEN_TYPE {
            warn!("token rejected: wrong token type");
            return Err(AppError::Unauthorized);
        }

        match self.admins.find_by(&AdminKey::Id(data.claims.uid)).await {
            Ok(admin) => Ok(AuthAdmin { id: admin.id }),
            Err(StoreError::NotFound) => {
                warn!("token rejected: admin {} no longer exists", data.claims.uid);
                Err(AppError::Unauthorized)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Exchanges a stored refresh token for a fresh token pair. The
    /// presented token is single-use: it is deleted and a new one issued.
    pub async fn refresh(&self, request: &RefreshRequest) -> Result<TokenResponse, AppError> {
        validate_request(request)?;

        let record = match self
            .refresh_tokens
            .find_by(&RefreshTokenKey::Token(request.refresh_token.clone()))
            .await
        {
            Ok(record) => record,
            Err(StoreError::NotFound) => {
                warn!("refresh rejected: unknown token");
                return Err(AppError::Unauthorized);
            }
            Err(e) => return Err(e.into()),
        };

        if record.is_expired() {
            warn!("refresh rejected: token expired for admin {}", record.admin_id);
            if let Err(e) = self.refresh_tokens.delete(&record).await {
                warn!("expired refresh token cleanup failed: {}", e);
            }
            return Err(AppError::Unauthorized);
        }

        let admin = match self.admins.find_by(&AdminKey::Id(record.admin_id)).await {
            Ok(admin) => admin,
            Err(StoreError::NotFound) => {
                warn!("refresh rejected: admin {} no longer exists", record.admin_id);
                return Err(AppError::Unauthorized);
            }
            Err(e) => return Err(e.into()),
        };

        self.refresh_tokens.delete(&record).await?;
        self.issue_tokens(&admin).await
    }

    async fn issue_tokens(&self, admin: &AdminAccount) -> Result<TokenResponse, AppError> {
        if self.config.jwt_secret.is_empty() {
            return Err(AppError::Internal("signing key is not configured".into()));
        }

        let ttl = Duration::minutes(self.config.access_token_ttl_minutes);
        let claims = Claims {
            uid: admin.id,
            name: admin.name.clone(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };

        let access_token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )?;

        let record = RefreshTokenRecord::new(admin.id, self.config.refresh_token_ttl_days);
        let record = self.refresh_tokens.create(&record).await?;

        Ok(TokenResponse {
            access_token,
            refresh_token: record.token,
            expires_in: ttl.num_seconds(),
        })
    }
}
