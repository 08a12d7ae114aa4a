use std::collections::HashMap;
use validator::Validate;

use crate::error::AppError;

/// Runs the derived validation rules and flattens failures into the
/// field -> message map carried by the error envelope. One message per
/// field is enough for the client.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), AppError> {
    match request.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let mut fields = HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                if let Some(first) = field_errors.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| first.code.to_string());
                    fields.insert(field.to_string(), message);
                }
            }
            Err(AppError::Validation(fields))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 3, max = 100, message = "must be 3-100 characters"))]
        username: String,
        #[validate(length(min = 6, max = 100, message = "must be 6-100 characters"))]
        password: String,
    }

    #[test]
    fn test_valid_request_passes() {
        let request = Sample {
            username: "admin".to_string(),
            password: "correct123".to_string(),
        };
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_failures_map_field_to_message() {
        let request = Sample {
            username: "ab".to_string(),
            password: "short".to_string(),
        };

        match validate_request(&request) {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields.get("username").unwrap(), "must be 3-100 characters");
                assert_eq!(fields.get("password").unwrap(), "must be 6-100 characters");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
