//! Product handlers. Writes are scoped to the token subject: the owner id in
//! a request body is always replaced by the caller's id.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Response},
    Json,
};

use super::{bind, parse_id};
use crate::entity::{Product, ProductResponse};
use crate::error::AppError;
use crate::extractors::AuthUser;
use crate::response::{success, success_empty, Envelope};
use crate::state::AppState;

const ENTITY: &str = "product";

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let products = state.products.get_all().await?;
    if products.is_empty() {
        return Ok(success_empty("products directory empty").into_response());
    }
    Ok(success("get all products success", products).into_response())
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Envelope<Vec<ProductResponse>>, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    let product = state.products.get(id).await?.ok_or(AppError::NotFound(ENTITY))?;
    Ok(success("get product success", vec![product]))
}

pub async fn create(
    caller: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<Product>, JsonRejection>,
) -> Result<Envelope<Vec<ProductResponse>>, AppError> {
    let mut input = bind(body)?;
    input.user_id = caller.user_id;
    let created = state.products.create(input).await?;
    Ok(success("create product success", vec![created]))
}

pub async fn update(
    caller: AuthUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Product>, JsonRejection>,
) -> Result<Envelope<Vec<Product>>, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    let mut product = bind(body)?;
    product.id = id;
    product.user_id = caller.user_id;
    state.products.update(product.clone()).await?;
    Ok(success("update product success", vec![product]))
}

pub async fn delete(
    caller: AuthUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Envelope<()>, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    state.products.delete(id, caller.user_id).await?;
    Ok(success_empty("delete product success"))
}
