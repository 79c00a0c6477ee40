//! Book handlers. Reads are public; writes need a bearer token.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Response},
    Json,
};

use super::{bind, parse_id};
use crate::entity::Book;
use crate::error::AppError;
use crate::extractors::AuthUser;
use crate::response::{success, success_empty, Envelope};
use crate::state::AppState;

const ENTITY: &str = "book";

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let books = state.books.get_all().await?;
    if books.is_empty() {
        return Ok(success_empty("books directory empty").into_response());
    }
    Ok(success("get all books success", books).into_response())
}

pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<Envelope<Vec<Book>>, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    let book = state.books.get(id).await?.ok_or(AppError::NotFound(ENTITY))?;
    Ok(success("get book success", vec![book]))
}

pub async fn create(
    _caller: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<Book>, JsonRejection>,
) -> Result<Envelope<Vec<Book>>, AppError> {
    let mut book = bind(body)?;
    book.id = state.books.create(book.clone()).await?;
    Ok(success("create book success", vec![book]))
}

pub async fn update(
    _caller: AuthUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Book>, JsonRejection>,
) -> Result<Envelope<Vec<Book>>, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    let mut book = bind(body)?;
    book.id = id;
    state.books.update(book.clone()).await?;
    Ok(success("update book success", vec![book]))
}

pub async fn delete(
    _caller: AuthUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Envelope<()>, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    state.books.delete(id).await?;
    Ok(success_empty("delete book success"))
}
