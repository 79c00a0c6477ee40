//! Record shapes: what handlers bind from requests and what repositories return.

mod book;
mod product;
mod user;

pub use book::Book;
pub use product::{Product, ProductResponse};
pub use user::{Credentials, User, UserResponse};
