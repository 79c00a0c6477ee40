use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::PasswordHasher;
use crate::entity::{User, UserResponse};
use crate::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by id. An empty table is `Ok(vec![])`.
    async fn get_all(&self) -> Result<Vec<UserResponse>, RepoError>;

    /// `Ok(None)` when no row has this id.
    async fn get(&self, id: i64) -> Result<Option<UserResponse>, RepoError>;

    /// Inserts the user and returns the id assigned by the store.
    async fn create(&self, user: User) -> Result<i64, RepoError>;

    async fn update(&self, user: User) -> Result<(), RepoError>;

    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

pub struct PgUserRepository {
    pool: PgPool,
    hasher: PasswordHasher,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, hasher: PasswordHasher) -> Self {
        PgUserRepository { pool, hasher }
    }

    async fn hash(&self, password: &str, message: &'static str) -> Result<String, RepoError> {
        self.hasher
            .hash(password)
            .await
            .map_err(|source| RepoError::PasswordHash { message, source })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_all(&self) -> Result<Vec<UserResponse>, RepoError> {
        sqlx::query_as::<_, UserResponse>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::query("get all users failed"))
    }

    async fn get(&self, id: i64) -> Result<Option<UserResponse>, RepoError> {
        sqlx::query_as::<_, UserResponse>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::query("get user failed"))
    }

    async fn create(&self, user: User) -> Result<i64, RepoError> {
        let password = self.hash(&user.password, "create user failed").await?;
        let (id,): (i64,) =
            sqlx::query_as("INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING id")
                .bind(&user.name)
                .bind(&user.email)
                .bind(&password)
                .fetch_one(&self.pool)
                .await
                .map_err(RepoError::query("create user failed"))?;
        tracing::debug!(id, "user created");
        Ok(id)
    }

    async fn update(&self, user: User) -> Result<(), RepoError> {
        let password = self.hash(&user.password, "update user failed").await?;
        let result = sqlx::query("UPDATE users SET name = $1, email = $2, password = $3 WHERE id = $4")
            .bind(&user.name)
            .bind(&user.email)
            .bind(&password)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::query("update user failed"))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound("user"));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::query("delete user failed"))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound("user"));
        }
        Ok(())
    }
}
