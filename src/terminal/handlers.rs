use actix_web::{web, HttpResponse};

use crate::auth::AuthAdmin;
use crate::error::AppError;
use crate::response::{messages, WebResponse};
use crate::terminal::models::{CreateTerminalRequest, ListTerminalQuery, UpdateTerminalRequest};
use crate::AppState;

pub async fn list(
    _auth: AuthAdmin,
    query: web::Query<ListTerminalQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (terminals, paging) = state
        .terminal_service
        .find_all(query.page, query.size)
        .await?;
    Ok(HttpResponse::Ok().json(WebResponse::ok_paged(
        messages::SUCCESS_GET_DATA,
        terminals,
        paging,
    )))
}

// The create endpoint takes a form-encoded body; the rest of the surface is JSON.
pub async fn create(
    _auth: AuthAdmin,
    form: web::Form<CreateTerminalRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let created = state.terminal_service.create(&form).await?;
    Ok(HttpResponse::Ok().json(WebResponse::ok(messages::SUCCESS_CREATE, created)))
}

pub async fn find_by_id(
    _auth: AuthAdmin,
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let terminal = state.terminal_service.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(WebResponse::ok(messages::SUCCESS_FIND_DATA, terminal)))
}

pub async fn update(
    _auth: AuthAdmin,
    path: web::Path<i64>,
    body: web::Json<UpdateTerminalRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let updated = state
        .terminal_service
        .update(path.into_inner(), &body)
        .await?;
    Ok(HttpResponse::Ok().json(WebResponse::ok(messages::SUCCESS_UPDATE, updated)))
}
