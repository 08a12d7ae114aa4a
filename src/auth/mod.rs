//! Admin authentication: credential verification, access token issuance and
//! validation, refresh token rotation.

mod extractor;
pub mod handlers;
pub mod models;
mod service;

pub use models::{AdminResponse, LoginRequest, LoginResponse, RefreshRequest, TokenResponse};
pub use service::{AuthAdmin, AuthService, Claims, ACCESS_TOKEN_TYPE};
