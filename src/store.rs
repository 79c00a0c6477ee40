//! Database bootstrap: create the database if missing, then the tables.

use crate::error::BootstrapError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        publisher TEXT NOT NULL,
        language TEXT NOT NULL,
        pages INTEGER NOT NULL,
        isbn13 TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        price BIGINT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS users_name_idx ON users (name)",
    "CREATE INDEX IF NOT EXISTS products_user_id_idx ON products (user_id)",
];

/// Idempotent DDL for users, books and products.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), BootstrapError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| BootstrapError::InvalidUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Splits a connection URL into the admin URL (same server, `postgres`
/// database) and the target database name. No path means no database name.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), BootstrapError> {
    let authority_start = url
        .find("://")
        .ok_or_else(|| BootstrapError::InvalidUrl("missing scheme".into()))?
        + 3;
    let after_scheme = url.get(authority_start..).unwrap_or("");
    let path_start = match after_scheme.find(['/', '?']) {
        Some(i) if after_scheme[i..].starts_with('/') => authority_start + i + 1,
        _ => return Ok((url.to_string(), String::new())),
    };
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
