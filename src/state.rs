//! Shared application state for all routes. Repositories are constructed
//! once at startup and handed to handlers behind trait objects.

use crate::auth::{PasswordHasher, TokenService};
use crate::repository::{
    AuthRepository, BookRepository, MemoryAuthRepository, MemoryStore, PgAuthRepository, PgBookRepository,
    PgProductRepository, PgUserRepository, ProductRepository, UserRepository,
};
use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Present when backed by Postgres; used by the readiness probe.
    pub pool: Option<PgPool>,
    pub users: Arc<dyn UserRepository>,
    pub books: Arc<dyn BookRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub auth: Arc<dyn AuthRepository>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn postgres(pool: PgPool, tokens: TokenService, hasher: PasswordHasher) -> Self {
        AppState {
            users: Arc::new(PgUserRepository::new(pool.clone(), hasher)),
            books: Arc::new(PgBookRepository::new(pool.clone())),
            products: Arc::new(PgProductRepository::new(pool.clone())),
            auth: Arc::new(PgAuthRepository::new(pool.clone(), hasher, tokens.clone())),
            pool: Some(pool),
            tokens,
        }
    }

    pub fn in_memory(tokens: TokenService, hasher: PasswordHasher) -> Self {
        let store = MemoryStore::new(hasher);
        AppState {
            pool: None,
            users: Arc::new(store.clone()),
            books: Arc::new(store.clone()),
            products: Arc::new(store.clone()),
            auth: Arc::new(MemoryAuthRepository::new(store, tokens.clone())),
            tokens,
        }
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
