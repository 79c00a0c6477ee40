use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::{PasswordHasher, TokenService};
use crate::entity::Credentials;
use crate::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Checks name and password and issues a token for the first matching row.
    async fn login(&self, credentials: Credentials) -> Result<String, RepoError>;
}

/// Row shape for the login scan: `(id, name, stored password)`.
pub(crate) type LoginRow = (i64, String, String);

/// Scans same-named rows in store order; the first password match wins.
pub(crate) async fn issue_for_first_match(
    rows: Vec<LoginRow>,
    password: &str,
    hasher: &PasswordHasher,
    tokens: &TokenService,
) -> Result<String, RepoError> {
    if rows.is_empty() {
        return Err(RepoError::UnknownUser);
    }
    let stored = rows.iter().map(|(_, _, hash)| hash.clone()).collect();
    let index = hasher
        .first_match(password, stored)
        .await
        .map_err(|source| RepoError::PasswordHash {
            message: "password check failed",
            source,
        })?
        .ok_or(RepoError::WrongPassword)?;
    let (id, name, _) = &rows[index];
    tokens.issue(*id, name).map_err(RepoError::TokenCreation)
}

pub struct PgAuthRepository {
    pool: PgPool,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool, hasher: PasswordHasher, tokens: TokenService) -> Self {
        PgAuthRepository { pool, hasher, tokens }
    }
}

#[async_trait]
impl AuthRepository for PgAuthRepository {
    async fn login(&self, credentials: Credentials) -> Result<String, RepoError> {
        let rows: Vec<LoginRow> = sqlx::query_as("SELECT id, name, password FROM users WHERE name = $1 ORDER BY id")
            .bind(&credentials.name)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::query("get user failed"))?;
        issue_for_first_match(rows, &credentials.password, &self.hasher, &self.tokens).await
    }
}
