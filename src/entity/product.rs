use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Write shape. `user_id` is always overwritten with the token subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub name: String,
    pub price: i64,
}

/// Read shape with the owner's display name joined in as `merchant`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProductResponse {
    pub id: i64,
    pub merchant: String,
    pub name: String,
    pub price: i64,
}
