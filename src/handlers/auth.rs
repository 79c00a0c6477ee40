//! Login.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::bind;
use crate::entity::Credentials;
use crate::error::AppError;
use crate::response::{success, Envelope};
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Envelope<String>, AppError> {
    let credentials = bind(body)?;
    let name = credentials.name.clone();
    let token = state.auth.login(credentials).await.map_err(|e| {
        tracing::info!(user = %name, reason = %e, "login refused");
        e
    })?;
    Ok(success("login success", token))
}
