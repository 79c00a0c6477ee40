//! In-memory repositories for tests and local experiments. Mirrors the
//! Postgres behavior: ids start at 1 and increase, reads are ordered by id,
//! products need an existing owner, deleting a user removes their products.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::auth::{issue_for_first_match, AuthRepository, LoginRow};
use super::book::BookRepository;
use super::product::ProductRepository;
use super::user::UserRepository;
use crate::auth::{PasswordHasher, TokenService};
use crate::entity::{Book, Credentials, Product, ProductResponse, User, UserResponse};
use crate::error::RepoError;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    books: Vec<Book>,
    products: Vec<Product>,
    last_user_id: i64,
    last_book_id: i64,
    last_product_id: i64,
}

impl Tables {
    fn merchant(&self, user_id: i64) -> String {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.name.clone())
            .unwrap_or_default()
    }

    fn product_response(&self, p: &Product) -> ProductResponse {
        ProductResponse {
            id: p.id,
            merchant: self.merchant(p.user_id),
            name: p.name.clone(),
            price: p.price,
        }
    }

    fn scoped_product_mut(&mut self, id: i64, owner_id: i64) -> Result<&mut Product, RepoError> {
        match self.products.iter().position(|p| p.id == id) {
            None => Err(RepoError::NotFound("product")),
            Some(i) if self.products[i].user_id != owner_id => Err(RepoError::OwnershipMismatch),
            Some(i) => Ok(&mut self.products[i]),
        }
    }
}

/// Shared tables behind the user, book and product repository traits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    hasher: PasswordHasher,
}

impl MemoryStore {
    pub fn new(hasher: PasswordHasher) -> Self {
        MemoryStore {
            tables: Arc::default(),
            hasher,
        }
    }

    async fn hash(&self, password: &str, message: &'static str) -> Result<String, RepoError> {
        self.hasher
            .hash(password)
            .await
            .map_err(|source| RepoError::PasswordHash { message, source })
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<UserResponse>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().map(UserResponse::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<UserResponse>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).map(UserResponse::from))
    }

    async fn create(&self, mut user: User) -> Result<i64, RepoError> {
        user.password = self.hash(&user.password, "create user failed").await?;
        let mut tables = self.tables.write().await;
        tables.last_user_id += 1;
        user.id = tables.last_user_id;
        tables.users.push(user);
        Ok(tables.last_user_id)
    }

    async fn update(&self, mut user: User) -> Result<(), RepoError> {
        user.password = self.hash(&user.password, "update user failed").await?;
        let mut tables = self.tables.write().await;
        let row = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::NotFound("user"))?;
        *row = user;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(RepoError::NotFound("user"));
        }
        tables.products.retain(|p| p.user_id != id);
        Ok(())
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Book>, RepoError> {
        Ok(self.tables.read().await.books.clone())
    }

    async fn get(&self, id: i64) -> Result<Option<Book>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.books.iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, mut book: Book) -> Result<i64, RepoError> {
        let mut tables = self.tables.write().await;
        tables.last_book_id += 1;
        book.id = tables.last_book_id;
        tables.books.push(book);
        Ok(tables.last_book_id)
    }

    async fn update(&self, book: Book) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .books
            .iter_mut()
            .find(|b| b.id == book.id)
            .ok_or(RepoError::NotFound("book"))?;
        *row = book;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.books.len();
        tables.books.retain(|b| b.id != id);
        if tables.books.len() == before {
            return Err(RepoError::NotFound("book"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<ProductResponse>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().map(|p| tables.product_response(p)).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<ProductResponse>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.product_response(p)))
    }

    async fn create(&self, mut product: Product) -> Result<ProductResponse, RepoError> {
        let mut tables = self.tables.write().await;
        // products.user_id references users(id)
        if !tables.users.iter().any(|u| u.id == product.user_id) {
            return Err(RepoError::Query {
                message: "create product failed",
                source: sqlx::Error::RowNotFound,
            });
        }
        tables.last_product_id += 1;
        product.id = tables.last_product_id;
        let created = tables.product_response(&product);
        tables.products.push(product);
        Ok(created)
    }

    async fn update(&self, product: Product) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let row = tables.scoped_product_mut(product.id, product.user_id)?;
        row.name = product.name;
        row.price = product.price;
        Ok(())
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.scoped_product_mut(id, owner_id)?;
        tables.products.retain(|p| p.id != id);
        Ok(())
    }
}

/// Login against a [`MemoryStore`]'s users.
#[derive(Clone)]
pub struct MemoryAuthRepository {
    store: MemoryStore,
    tokens: TokenService,
}

impl MemoryAuthRepository {
    pub fn new(store: MemoryStore, tokens: TokenService) -> Self {
        MemoryAuthRepository { store, tokens }
    }
}

#[async_trait]
impl AuthRepository for MemoryAuthRepository {
    async fn login(&self, credentials: Credentials) -> Result<String, RepoError> {
        let rows: Vec<LoginRow> = {
            let tables = self.store.tables.read().await;
            tables
                .users
                .iter()
                .filter(|u| u.name == credentials.name)
                .map(|u| (u.id, u.name.clone(), u.password.clone()))
                .collect()
        };
        issue_for_first_match(rows, &credentials.password, &self.store.hasher, &self.tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(PasswordHasher::new(4))
    }

    fn user(name: &str) -> User {
        User {
            name: name.into(),
            email: format!("{name}@example.com"),
            password: "pw".into(),
            ..User::default()
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_sequence() {
        let store = store();
        assert_eq!(UserRepository::create(&store, user("a")).await.unwrap(), 1);
        assert_eq!(UserRepository::create(&store, user("b")).await.unwrap(), 2);
        let book_id = BookRepository::create(&store, Book::default()).await.unwrap();
        assert_eq!(book_id, 1);
    }

    #[tokio::test]
    async fn stored_password_is_hashed() {
        let store = store();
        UserRepository::create(&store, user("a")).await.unwrap();
        let tables = store.tables.read().await;
        assert_ne!(tables.users[0].password, "pw");
    }

    #[tokio::test]
    async fn product_ownership_is_enforced() {
        let store = store();
        let owner = UserRepository::create(&store, user("owner")).await.unwrap();
        let other = UserRepository::create(&store, user("other")).await.unwrap();
        let created = ProductRepository::create(
            &store,
            Product {
                user_id: owner,
                name: "lamp".into(),
                price: 10,
                ..Product::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(created.merchant, "owner");

        let err = ProductRepository::delete(&store, created.id, other).await.unwrap_err();
        assert!(matches!(err, RepoError::OwnershipMismatch));
        let err = ProductRepository::delete(&store, 99, owner).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound("product")));
        assert!(ProductRepository::get(&store, created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_user_removes_their_products() {
        let store = store();
        let owner = UserRepository::create(&store, user("owner")).await.unwrap();
        ProductRepository::create(
            &store,
            Product {
                user_id: owner,
                name: "lamp".into(),
                price: 10,
                ..Product::default()
            },
        )
        .await
        .unwrap();
        UserRepository::delete(&store, owner).await.unwrap();
        assert!(ProductRepository::get_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn product_for_unknown_owner_is_rejected() {
        let store = store();
        let err = ProductRepository::create(
            &store,
            Product {
                user_id: 42,
                name: "lamp".into(),
                price: 10,
                ..Product::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Query { message: "create product failed", .. }));
        assert!(ProductRepository::get_all(&store).await.unwrap().is_empty());
        assert_eq!(UserRepository::create(&store, user("later")).await.unwrap(), 1);
    }
}
