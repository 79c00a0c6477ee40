//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::simple_response;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("invalid DATABASE_URL: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum HashError {
    #[error(transparent)]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Failures surfaced by repositories. Every variant maps to the status and
/// message the handler forwards verbatim into the envelope.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("{message}")]
    Query {
        message: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("{0} does not exist")]
    NotFound(&'static str),
    #[error("user does not match")]
    OwnershipMismatch,
    #[error("user does not exist")]
    UnknownUser,
    #[error("password incorrect")]
    WrongPassword,
    #[error("token creation failed")]
    TokenCreation(#[source] jsonwebtoken::errors::Error),
    #[error("{message}")]
    PasswordHash {
        message: &'static str,
        #[source]
        source: HashError,
    },
}

impl RepoError {
    /// Wraps a driver error under the operation's failure message.
    pub fn query(message: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| RepoError::Query { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RepoError::Query { .. } | RepoError::TokenCreation(_) | RepoError::PasswordHash { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RepoError::NotFound(_) | RepoError::OwnershipMismatch => StatusCode::BAD_REQUEST,
            RepoError::UnknownUser | RepoError::WrongPassword => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid {0} id")]
    InvalidId(&'static str),
    #[error("binding failed")]
    Binding,
    #[error("{0} does not exist")]
    NotFound(&'static str),
    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidId(_) | AppError::Binding | AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::Repository(e) => e.status(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                AppError::Repository(RepoError::Query { message, source }) => {
                    tracing::error!(error = %source, "{}", message)
                }
                AppError::Repository(RepoError::TokenCreation(source)) => {
                    tracing::error!(error = %source, "token creation failed")
                }
                AppError::Repository(RepoError::PasswordHash { message, source }) => {
                    tracing::error!(error = %source, "{}", message)
                }
                other => tracing::error!("{}", other),
            }
        }
        simple_response::<()>(status, self.to_string(), None).into_response()
    }
}
