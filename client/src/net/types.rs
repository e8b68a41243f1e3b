//! Wire DTOs for the users API.
//!
//! DESIGN
//! ======
//! The server always sends every field, but the dashboard only relies on `id`
//! and `name`. The remaining fields default so that sparse payloads still
//! decode; anything that is not an array of user objects is rejected.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A row from `GET /api/go/users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact email, if the payload carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// RFC 3339 creation timestamp, kept as text.
    #[serde(rename = "createTimestamp", default, skip_serializing_if = "Option::is_none")]
    pub create_timestamp: Option<String>,
}

/// Decoded body of the users list endpoint.
pub type UserList = Vec<User>;
