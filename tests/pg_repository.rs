//! Postgres-backed repository checks. Skipped unless `TEST_DATABASE_URL` is set.

use std::time::Duration;

use catalog_api::entity::{Book, Credentials, Product, User};
use catalog_api::repository::{
    AuthRepository, BookRepository, PgAuthRepository, PgBookRepository, PgProductRepository, PgUserRepository,
    ProductRepository, UserRepository,
};
use catalog_api::{ensure_tables, PasswordHasher, RepoError, TokenService};
use sqlx::PgPool;

async fn pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("test database should be reachable");
    ensure_tables(&pool).await.expect("tables should be created");
    Some(pool)
}

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

fn hasher() -> PasswordHasher {
    PasswordHasher::new(4)
}

async fn create_user(repo: &PgUserRepository, name: &str, password: &str) -> i64 {
    repo.create(User {
        name: name.into(),
        email: format!("{name}@example.com"),
        password: password.into(),
        ..User::default()
    })
    .await
    .expect("user should insert")
}

#[tokio::test]
async fn user_create_get_update_delete() {
    let Some(pool) = pool().await else { return };
    let users = PgUserRepository::new(pool, hasher());
    let name = unique("user");

    let id = create_user(&users, &name, "p").await;
    assert!(id > 0);
    let fetched = users.get(id).await.unwrap().expect("row should exist");
    assert_eq!(fetched.name, name);

    let err = users
        .update(User {
            id: i64::MAX,
            ..User::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound("user")));

    users.delete(id).await.unwrap();
    assert!(users.get(id).await.unwrap().is_none());
    assert!(matches!(users.delete(id).await.unwrap_err(), RepoError::NotFound("user")));
}

#[tokio::test]
async fn login_uses_hashed_passwords_and_first_match() {
    let Some(pool) = pool().await else { return };
    let tokens = TokenService::new("pg-secret", Duration::from_secs(60));
    let users = PgUserRepository::new(pool.clone(), hasher());
    let auth = PgAuthRepository::new(pool.clone(), hasher(), tokens.clone());
    let name = unique("dup");

    create_user(&users, &name, "a").await;
    let expected = create_user(&users, &name, "b").await;
    create_user(&users, &name, "b").await;

    let (stored,): (String,) = sqlx::query_as("SELECT password FROM users WHERE id = $1")
        .bind(expected)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(stored, "b");

    let token = auth
        .login(Credentials {
            name: name.clone(),
            password: "b".into(),
        })
        .await
        .unwrap();
    assert_eq!(tokens.verify(&token).unwrap().user_id, expected);

    let err = auth
        .login(Credentials {
            name,
            password: "zzz".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::WrongPassword));
}

#[tokio::test]
async fn book_round_trip() {
    let Some(pool) = pool().await else { return };
    let books = PgBookRepository::new(pool);
    let book = Book {
        title: unique("title"),
        author: "author".into(),
        publisher: "publisher".into(),
        language: "en".into(),
        pages: 120,
        isbn13: "9780000000000".into(),
        ..Book::default()
    };
    let id = books.create(book.clone()).await.unwrap();
    let fetched = books.get(id).await.unwrap().unwrap();
    assert_eq!(fetched, Book { id, ..book });
    books.delete(id).await.unwrap();
}

#[tokio::test]
async fn product_ownership_is_enforced_in_sql() {
    let Some(pool) = pool().await else { return };
    let users = PgUserRepository::new(pool.clone(), hasher());
    let products = PgProductRepository::new(pool);
    let merchant = unique("merchant");
    let owner = create_user(&users, &merchant, "p").await;
    let other = create_user(&users, &unique("other"), "p").await;

    let created = products
        .create(Product {
            user_id: owner,
            name: "lamp".into(),
            price: 10,
            ..Product::default()
        })
        .await
        .unwrap();
    assert_eq!(created.merchant, merchant);

    let err = products
        .update(Product {
            id: created.id,
            user_id: other,
            name: "stolen".into(),
            price: 1,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::OwnershipMismatch));
    let err = products.delete(created.id, other).await.unwrap_err();
    assert!(matches!(err, RepoError::OwnershipMismatch));
    assert_eq!(products.get(created.id).await.unwrap().unwrap(), created);

    let err = products.delete(i64::MAX, owner).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound("product")));

    products.delete(created.id, owner).await.unwrap();
    users.delete(owner).await.unwrap();
    users.delete(other).await.unwrap();
}
