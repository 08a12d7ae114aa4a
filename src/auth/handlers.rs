use actix_web::{web, HttpResponse};
use tracing::{info, warn};

use crate::auth::models::{LoginRequest, RefreshRequest};
use crate::error::AppError;
use crate::response::{messages, WebResponse};
use crate::AppState;

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("login attempt for username: {}", req.username);
    match state.auth_service.login(&req).await {
        Ok(response) => {
            info!("login successful for admin {}", response.admin.id);
            Ok(HttpResponse::Ok().json(WebResponse::ok(messages::SUCCESS_LOGIN, response)))
        }
        Err(e) => {
            warn!("login failed for username {}: {}", req.username, e);
            Err(e)
        }
    }
}

pub async fn refresh(
    req: web::Json<RefreshRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    match state.auth_service.refresh(&req).await {
        Ok(token) => Ok(HttpResponse::Ok().json(WebResponse::ok(messages::SUCCESS_LOGIN, token))),
        Err(e) => {
            warn!("token refresh failed: {}", e);
            Err(e)
        }
    }
}
