//! User handlers. Signup is open; everything else needs a bearer token.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Response},
    Json,
};

use super::{bind, parse_id};
use crate::entity::{User, UserResponse};
use crate::error::AppError;
use crate::extractors::AuthUser;
use crate::response::{success, success_empty, Envelope};
use crate::state::AppState;

const ENTITY: &str = "user";

pub async fn list(_caller: AuthUser, State(state): State<AppState>) -> Result<Response, AppError> {
    let users = state.users.get_all().await?;
    if users.is_empty() {
        return Ok(success_empty("users directory empty").into_response());
    }
    Ok(success("get all users success", users).into_response())
}

pub async fn read(
    _caller: AuthUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Envelope<Vec<UserResponse>>, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    let user = state.users.get(id).await?.ok_or(AppError::NotFound(ENTITY))?;
    Ok(success("get user success", vec![user]))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<User>, JsonRejection>,
) -> Result<Envelope<Vec<User>>, AppError> {
    let mut user = bind(body)?;
    user.id = state.users.create(user.clone()).await?;
    Ok(success("create user success", vec![user]))
}

pub async fn update(
    _caller: AuthUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<User>, JsonRejection>,
) -> Result<Envelope<Vec<User>>, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    let mut user = bind(body)?;
    user.id = id;
    state.users.update(user.clone()).await?;
    Ok(success("update user success", vec![user]))
}

pub async fn delete(
    _caller: AuthUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Envelope<()>, AppError> {
    let id = parse_id(&id_str, ENTITY)?;
    state.users.delete(id).await?;
    Ok(success_empty("delete user success"))
}
