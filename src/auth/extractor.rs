use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use tracing::debug;

use crate::auth::service::AuthAdmin;
use crate::error::AppError;
use crate::AppState;

/// What a missing Authorization header is presented as. It then fails token
/// validation exactly like any other malformed token, so absent and bad
/// credentials produce the same generic 401.
const MISSING_HEADER: &str = "NOT_FOUND";

impl FromRequest for AuthAdmin {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<AuthAdmin, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .unwrap_or(MISSING_HEADER)
            .to_owned();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            debug!("authorization header: {}", header);
            let state = state
                .ok_or_else(|| AppError::Internal("application state is not configured".into()))?;
            state.auth_service.verify(&header).await
        })
    }
}
