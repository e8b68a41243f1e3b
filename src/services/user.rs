//! User service: list, fetch, and create rows in the `users` table.
//!
//! DESIGN
//! ======
//! Request bodies are validated here rather than by serde so each failure
//! maps to the exact message the dashboard's API contract promises: missing
//! and mistyped fields are told apart, and unknown fields are rejected.
//!
//! `name`, `email` and `createTimestamp` are nullable in the schema. Reads
//! coalesce missing text to `""`; a missing timestamp serializes as `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use time::{OffsetDateTime, PrimitiveDateTime};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("invalid id format — must be an integer")]
    InvalidId,
    #[error("User with Id of {0} not found in our records!")]
    NotFound(i32),
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("{0}")]
    Validation(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(rename = "createTimestamp", with = "time::serde::rfc3339::option")]
    pub create_timestamp: Option<OffsetDateTime>,
}

type UserRow = (i32, Option<String>, Option<String>, Option<PrimitiveDateTime>);

impl From<UserRow> for User {
    fn from((id, name, email, created): UserRow) -> Self {
        Self {
            id,
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            create_timestamp: created.map(PrimitiveDateTime::assume_utc),
        }
    }
}

/// Validated input for [`create_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateUserBody {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    email: Option<Value>,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Parse a path segment as a user id.
///
/// # Errors
///
/// Returns [`UserError::InvalidId`] if `raw` is not a 32-bit integer.
pub fn parse_user_id(raw: &str) -> Result<i32, UserError> {
    raw.parse::<i32>().map_err(|_| UserError::InvalidId)
}

/// Decode and validate a create-user request body.
///
/// # Errors
///
/// Returns [`UserError::InvalidJson`] for malformed JSON or unknown fields and
/// [`UserError::Validation`] for missing, mistyped, or empty fields. A `null`
/// body counts as an empty object; any other non-object is invalid JSON.
pub fn parse_new_user(body: &[u8]) -> Result<NewUser, UserError> {
    let raw: Value = serde_json::from_slice(body).map_err(|e| UserError::InvalidJson(e.to_string()))?;
    let body: CreateUserBody = match raw {
        Value::Null => CreateUserBody { name: None, email: None },
        // Objects only: serde would otherwise accept arrays positionally.
        Value::Object(_) => serde_json::from_value(raw).map_err(|e| UserError::InvalidJson(e.to_string()))?,
        other => {
            return Err(UserError::InvalidJson(format!(
                "cannot decode {} into a user object",
                json_kind(&other)
            )));
        }
    };

    let name = match body.name {
        Some(Value::String(name)) => name,
        None => return Err(UserError::Validation("Name is Required")),
        Some(_) => return Err(UserError::Validation("Name must be a string")),
    };

    let email = match body.email {
        Some(Value::String(email)) => email,
        Some(Value::Number(_)) => return Err(UserError::Validation("email must be a string")),
        None => return Err(UserError::Validation("Email is Required")),
        Some(_) => return Err(UserError::Validation("Email must be a string")),
    };

    if name.is_empty() || email.is_empty() {
        return Err(UserError::Validation("Name and Email are required"));
    }

    Ok(NewUser { name, email })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// QUERIES
// =============================================================================

/// List every user, oldest id first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, UserError> {
    let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, email, createtimestamp FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(User::from).collect())
}

/// Fetch one user by id.
///
/// # Errors
///
/// Returns [`UserError::NotFound`] if no row matches, or a database error.
pub async fn get_user(pool: &PgPool, id: i32) -> Result<User, UserError> {
    sqlx::query_as::<_, UserRow>("SELECT id, name, email, createtimestamp FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(User::from)
        .ok_or(UserError::NotFound(id))
}

/// Insert a user and return it with its assigned id and timestamp.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_user(pool: &PgPool, new_user: &NewUser) -> Result<User, UserError> {
    let (id, created) = sqlx::query_as::<_, (i32, Option<PrimitiveDateTime>)>(
        "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, createtimestamp",
    )
    .bind(&new_user.name)
    .bind(&new_user.email)
    .fetch_one(pool)
    .await?;

    Ok(User {
        id,
        name: new_user.name.clone(),
        email: new_user.email.clone(),
        create_timestamp: created.map(PrimitiveDateTime::assume_utc),
    })
}

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;
