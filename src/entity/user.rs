use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Write shape: signup and update bodies, echoed back on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Read shape. Never carries the password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Login body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
