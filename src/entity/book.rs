use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Books share one shape for reads and writes; the id in a write body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub language: String,
    pub pages: i32,
    pub isbn13: String,
}
