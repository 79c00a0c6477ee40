use async_trait::async_trait;
use sqlx::PgPool;

use crate::entity::Book;
use crate::error::RepoError;

const BOOK_COLUMNS: &str = "id, title, author, publisher, language, pages, isbn13";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Book>, RepoError>;

    async fn get(&self, id: i64) -> Result<Option<Book>, RepoError>;

    async fn create(&self, book: Book) -> Result<i64, RepoError>;

    async fn update(&self, book: Book) -> Result<(), RepoError>;

    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        PgBookRepository { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn get_all(&self) -> Result<Vec<Book>, RepoError> {
        sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::query("get all books failed"))
    }

    async fn get(&self, id: i64) -> Result<Option<Book>, RepoError> {
        sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::query("get book failed"))
    }

    async fn create(&self, book: Book) -> Result<i64, RepoError> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO books (title, author, publisher, language, pages, isbn13) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.publisher)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.isbn13)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::query("create book failed"))?;
        tracing::debug!(id, "book created");
        Ok(id)
    }

    async fn update(&self, book: Book) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE books SET title = $1, author = $2, publisher = $3, language = $4, pages = $5, isbn13 = $6 \
             WHERE id = $7",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.publisher)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.isbn13)
        .bind(book.id)
        .execute(&self.pool)
        .await
        .map_err(RepoError::query("update book failed"))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound("book"));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::query("delete book failed"))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound("book"));
        }
        Ok(())
    }
}
