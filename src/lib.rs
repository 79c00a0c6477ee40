//! Catalog API: REST backend for users, books and products on PostgreSQL.

pub mod auth;
pub mod config;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use auth::{Claims, PasswordHasher, TokenService};
pub use config::Settings;
pub use error::{AppError, BootstrapError, ConfigError, HashError, RepoError};
pub use response::{simple_response, Envelope};
pub use routes::{api_routes, app, common_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
