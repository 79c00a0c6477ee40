//! Record routes. Which endpoints need a bearer token is decided by the
//! handlers' `AuthUser` argument, not by a layer here.

use crate::handlers::{auth, book, product, user};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/login", post(auth::login))
        .route("/users", get(user::list).post(user::create))
        .route("/users/:id", get(user::read).put(user::update).delete(user::delete))
        .route("/books", get(book::list).post(book::create))
        .route("/books/:id", get(book::read).put(book::update).delete(book::delete))
        .route("/products", get(product::list).post(product::create))
        .route(
            "/products/:id",
            get(product::read).put(product::update).delete(product::delete),
        )
        .with_state(state)
}
