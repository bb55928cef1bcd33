//! Member accounts

use std::collections::HashMap;

use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub email_pending: Option<String>,
    pub password_hash: Option<String>,
    pub is_disabled: bool,
    pub created_at: i64,
}

const USER_COLUMNS: &str =
    "id, name, role, email, phone, email_pending, password_hash, is_disabled, created_at";

/// Fields of a new account, already normalized
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Admin update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_disabled: Option<bool>,
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Newest first; `search` is a case-insensitive substring of id, name or role.
pub async fn list(
    pool: &PgPool,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<UserRow>, i64), sqlx::Error> {
    let pattern = search.map(super::like_pattern);

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM users
         WHERE $1::text IS NULL OR id ILIKE $1 OR name ILIKE $1 OR role ILIKE $1",
    )
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    let rows: Vec<UserRow> = sqlx::query_as(&format!(
        "SELECT {USER_COLUMNS} FROM users
         WHERE $1::text IS NULL OR id ILIKE $1 OR name ILIKE $1 OR role ILIKE $1
         ORDER BY created_at DESC, id ASC
         LIMIT $2 OFFSET $3"
    ))
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((rows, total))
}

pub async fn create(pool: &PgPool, user: &NewUser, now: i64) -> Result<UserRow, sqlx::Error> {
    sqlx::query_as(&format!(
        "INSERT INTO users (id, name, role, email, phone, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $6)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.role)
    .bind(&user.email)
    .bind(&user.phone)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: &str,
    changes: &UserChanges,
    now: i64,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "UPDATE users SET
            name = COALESCE($2, name),
            role = COALESCE($3, role),
            email = COALESCE($4, email),
            phone = COALESCE($5, phone),
            is_disabled = COALESCE($6, is_disabled),
            updated_at = $7
         WHERE id = $1
         RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .bind(&changes.name)
    .bind(&changes.role)
    .bind(&changes.email)
    .bind(&changes.phone)
    .bind(changes.is_disabled)
    .bind(now)
    .fetch_optional(pool)
    .await
}

/// Replace the caller's own contact data (absent values are cleared)
pub async fn set_contact(
    pool: &PgPool,
    id: &str,
    email: Option<&str>,
    phone: Option<&str>,
    now: i64,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "UPDATE users SET email = $2, phone = $3, updated_at = $4
         WHERE id = $1
         RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .bind(email)
    .bind(phone)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn set_password(
    pool: &PgPool,
    id: &str,
    password_hash: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET password_hash = $2, updated_at = $3 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .bind(now)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `true` if another account already uses `email`
pub async fn email_taken(pool: &PgPool, email: &str, except_id: &str) -> Result<bool, sqlx::Error> {
    let (taken,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 AND id <> $2)")
            .bind(email)
            .bind(except_id)
            .fetch_one(pool)
            .await?;
    Ok(taken)
}

/// `true` if another account already uses `phone`
pub async fn phone_taken(pool: &PgPool, phone: &str, except_id: &str) -> Result<bool, sqlx::Error> {
    let (taken,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE phone = $1 AND id <> $2)")
            .bind(phone)
            .bind(except_id)
            .fetch_one(pool)
            .await?;
    Ok(taken)
}

/// Display names for the given ids; unknown ids are absent
pub async fn names_by_ids(
    pool: &PgPool,
    ids: &[String],
) -> Result<HashMap<String, String>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT id, name FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().collect())
}
