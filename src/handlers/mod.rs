//! HTTP handlers: login plus list, read, create, update, delete per record type.

pub mod auth;
pub mod book;
pub mod product;
pub mod user;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::Json;

fn parse_id(id_str: &str, entity: &'static str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::InvalidId(entity))
}

fn bind<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "request body rejected");
            Err(AppError::Binding)
        }
    }
}
