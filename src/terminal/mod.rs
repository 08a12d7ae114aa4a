//! Terminal resource: paginated listing, create, find-by-id, update.

pub mod handlers;
pub mod models;
mod service;

pub use models::{CreateTerminalRequest, ListTerminalQuery, TerminalResponse, UpdateTerminalRequest};
pub use service::TerminalService;
