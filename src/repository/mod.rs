//! Data access. One trait per record type so handlers can run against the
//! Postgres implementations in production and the in-memory ones in tests.

mod auth;
mod book;
mod memory;
mod product;
mod user;

pub use auth::{AuthRepository, PgAuthRepository};
pub use book::{BookRepository, PgBookRepository};
pub use memory::{MemoryAuthRepository, MemoryStore};
pub use product::{PgProductRepository, ProductRepository};
pub use user::{PgUserRepository, UserRepository};

#[cfg(test)]
pub use auth::MockAuthRepository;
#[cfg(test)]
pub use book::MockBookRepository;
#[cfg(test)]
pub use product::MockProductRepository;
#[cfg(test)]
pub use user::MockUserRepository;
