use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::Terminal;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTerminalRequest {
    #[validate(length(min = 1, max = 100, message = "name is required, at most 100 characters"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "location is required, at most 100 characters"
    ))]
    pub location: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTerminalRequest {
    #[validate(length(min = 1, max = 100, message = "name is required, at most 100 characters"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "location is required, at most 100 characters"
    ))]
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct ListTerminalQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct TerminalResponse {
    pub id_terminal: i64,
    pub name: String,
    pub location: String,
}

impl From<&Terminal> for TerminalResponse {
    fn from(terminal: &Terminal) -> Self {
        Self {
            id_terminal: terminal.id,
            name: terminal.name.clone(),
            location: terminal.location.clone(),
        }
    }
}
