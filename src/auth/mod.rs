//! Credential tokens and password hashing.

mod password;
mod token;

pub use password::PasswordHasher;
pub use token::{Claims, TokenService};
