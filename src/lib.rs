pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod response;
pub mod terminal;
pub mod validation;

use actix_web::HttpResponse;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

pub use config::Settings;
pub use error::{AppError, StoreError};
pub type Result<T> = std::result::Result<T, AppError>;

pub use auth::AuthService;
pub use terminal::TerminalService;

use db::store::{PgAdminStore, PgRefreshTokenStore, PgTerminalStore};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all workers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub db_pool: Arc<PgPool>,
    pub auth_service: Arc<AuthService>,
    pub terminal_service: Arc<TerminalService>,
}

impl AppState {
    pub fn new(config: Settings) -> Result<Self> {
        // Lazy pool: connections are established on first use, so startup
        // does not race the database coming up.
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect_lazy(&config.database.url)
            .map_err(|e| AppError::Store(StoreError::Connection(e.to_string())))?;

        Ok(Self::with_pool(config, Arc::new(pool)))
    }

    pub fn with_pool(config: Settings, pool: Arc<PgPool>) -> Self {
        let auth_service = Arc::new(AuthService::new(
            Arc::new(PgAdminStore::new(pool.clone())),
            Arc::new(PgRefreshTokenStore::new(pool.clone())),
            config.auth.clone(),
        ));
        let terminal_service = Arc::new(TerminalService::new(Arc::new(PgTerminalStore::new(
            pool.clone(),
        ))));

        Self {
            config: Arc::new(config),
            db_pool: pool,
            auth_service,
            terminal_service,
        }
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.db_pool.close().await;
        Ok(())
    }
}
