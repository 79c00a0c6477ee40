use async_trait::async_trait;
use sqlx::PgPool;

use crate::entity::{Product, ProductResponse};
use crate::error::RepoError;

const SELECT_PRODUCTS: &str = "SELECT p.id, COALESCE(u.name, '') AS merchant, p.name, p.price \
     FROM products p LEFT JOIN users u ON p.user_id = u.id";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<ProductResponse>, RepoError>;

    async fn get(&self, id: i64) -> Result<Option<ProductResponse>, RepoError>;

    /// Inserts the product and returns it with its new id and merchant name.
    async fn create(&self, product: Product) -> Result<ProductResponse, RepoError>;

    /// Only touches a row owned by `product.user_id`.
    async fn update(&self, product: Product) -> Result<(), RepoError>;

    /// Only removes a row owned by `owner_id`.
    async fn delete(&self, id: i64, owner_id: i64) -> Result<(), RepoError>;
}

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        PgProductRepository { pool }
    }

    /// Explains a zero-row owner-scoped statement: missing row or foreign owner.
    async fn missing_or_foreign(&self, id: i64, message: &'static str) -> RepoError {
        let exists = sqlx::query_as::<_, (bool,)>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await;
        match exists {
            Ok((true,)) => RepoError::OwnershipMismatch,
            Ok((false,)) => RepoError::NotFound("product"),
            Err(source) => RepoError::Query { message, source },
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_all(&self) -> Result<Vec<ProductResponse>, RepoError> {
        sqlx::query_as::<_, ProductResponse>(&format!("{} ORDER BY p.id", SELECT_PRODUCTS))
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::query("get all products failed"))
    }

    async fn get(&self, id: i64) -> Result<Option<ProductResponse>, RepoError> {
        sqlx::query_as::<_, ProductResponse>(&format!("{} WHERE p.id = $1", SELECT_PRODUCTS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::query("get product failed"))
    }

    async fn create(&self, product: Product) -> Result<ProductResponse, RepoError> {
        let created = sqlx::query_as::<_, ProductResponse>(
            "WITH inserted AS ( \
                 INSERT INTO products (user_id, name, price) VALUES ($1, $2, $3) \
                 RETURNING id, user_id, name, price \
             ) \
             SELECT i.id, COALESCE(u.name, '') AS merchant, i.name, i.price \
             FROM inserted i LEFT JOIN users u ON i.user_id = u.id",
        )
        .bind(product.user_id)
        .bind(&product.name)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::query("create product failed"))?;
        tracing::debug!(id = created.id, owner = product.user_id, "product created");
        Ok(created)
    }

    async fn update(&self, product: Product) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE products SET name = $1, price = $2 WHERE id = $3 AND user_id = $4")
            .bind(&product.name)
            .bind(product.price)
            .bind(product.id)
            .bind(product.user_id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::query("update product failed"))?;
        if result.rows_affected() == 0 {
            return Err(self.missing_or_foreign(product.id, "update product failed").await);
        }
        Ok(())
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::query("delete product failed"))?;
        if result.rows_affected() == 0 {
            return Err(self.missing_or_foreign(id, "delete product failed").await);
        }
        Ok(())
    }
}
