//! Uniform response envelope shared by every endpoint.

use actix_web::http::StatusCode;
use serde::Serialize;
use std::collections::HashMap;

/// Stable client-facing messages. These are part of the API contract; tests
/// assert on them, so change with care.
pub mod messages {
    pub const SUCCESS_LOGIN: &str = "Login successful";
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    pub const INVALID_TOKEN: &str = "Invalid token";

    pub const SUCCESS_GET_DATA: &str = "Get data successfully";
    pub const SUCCESS_FIND_DATA: &str = "Find data successfully";
    pub const SUCCESS_CREATE: &str = "Create data successfully";
    pub const SUCCESS_UPDATE: &str = "Update data successfully";

    pub const FAILED_FIND_DATA: &str = "Failed to find data";
    pub const DUPLICATE_DATA: &str = "Data already exists";

    pub const INVALID_REQUEST: &str = "Invalid request data";
    pub const INVALID_PARAMS: &str = "Invalid parameters";
    pub const INTERNAL_ERROR: &str = "Internal server error";
}

/// `{code, status, message, data?, paging?, errors?}`. Success responses set
/// `data` (and `paging` for lists); error responses omit `data` and carry a
/// field -> message map in `errors` for validation failures.
#[derive(Debug, Serialize)]
pub struct WebResponse<T: Serialize> {
    pub code: u16,
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<PageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, String>>,
}

impl<T: Serialize> WebResponse<T> {
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            status: "OK".to_string(),
            message: message.to_string(),
            data: Some(data),
            paging: None,
            errors: None,
        }
    }

    pub fn ok_paged(message: &str, data: T, paging: PageMetadata) -> Self {
        Self {
            paging: Some(paging),
            ..Self::ok(message, data)
        }
    }

    pub fn error(
        status: StatusCode,
        message: &str,
        errors: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.to_string(),
            data: None,
            paging: None,
            errors,
        }
    }
}

/// Pagination summary returned alongside a bounded result slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub page: i64,
    pub size: i64,
    pub total_item: i64,
    pub total_page: i64,
}

impl PageMetadata {
    /// `total_page = ceil(total_item / size)`. Callers guarantee `size >= 1`.
    pub fn new(page: i64, size: i64, total_item: i64) -> Self {
        let total_page = (total_item + size - 1) / size;
        Self {
            page,
            size,
            total_item,
            total_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_metadata_rounds_up() {
        let paging = PageMetadata::new(1, 10, 25);
        assert_eq!(paging.total_page, 3);

        let paging = PageMetadata::new(1, 10, 30);
        assert_eq!(paging.total_page, 3);

        let paging = PageMetadata::new(1, 10, 31);
        assert_eq!(paging.total_page, 4);

        let paging = PageMetadata::new(1, 10, 0);
        assert_eq!(paging.total_page, 0);

        let paging = PageMetadata::new(1, 1, 7);
        assert_eq!(paging.total_page, 7);
    }

    #[test]
    fn test_success_envelope_shape() {
        let body = WebResponse::ok(messages::SUCCESS_FIND_DATA, serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["code"], 200);
        assert_eq!(json["status"], "OK");
        assert_eq!(json["message"], "Find data successfully");
        assert_eq!(json["data"]["id"], 1);
        // No paging or errors on a plain success.
        assert!(json.get("paging").is_none());
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_paged_envelope_shape() {
        let body = WebResponse::ok_paged(
            messages::SUCCESS_GET_DATA,
            vec![1, 2, 3],
            PageMetadata::new(1, 10, 25),
        );
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["paging"]["page"], 1);
        assert_eq!(json["paging"]["size"], 10);
        assert_eq!(json["paging"]["total_item"], 25);
        assert_eq!(json["paging"]["total_page"], 3);
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let mut errors = HashMap::new();
        errors.insert("name".to_string(), "name is required".to_string());
        let body =
            WebResponse::<()>::error(StatusCode::BAD_REQUEST, messages::INVALID_REQUEST, Some(errors));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["code"], 400);
        assert_eq!(json["status"], "Bad Request");
        assert_eq!(json["message"], "Invalid request data");
        assert!(json.get("data").is_none());
        assert_eq!(json["errors"]["name"], "name is required");
    }

    #[test]
    fn test_error_envelope_without_field_errors() {
        let body = WebResponse::<()>::error(StatusCode::UNAUTHORIZED, messages::INVALID_TOKEN, None);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["code"], 401);
        assert_eq!(json["message"], "Invalid token");
        assert!(json.get("errors").is_none());
    }
}
