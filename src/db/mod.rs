pub mod models;
pub mod store;

pub use models::{AdminAccount, RefreshTokenRecord, Terminal};
pub use store::{
    AdminKey, EntityStore, PgAdminStore, PgRefreshTokenStore, PgTerminalStore, RefreshTokenKey,
    TerminalKey, TerminalStore,
};
