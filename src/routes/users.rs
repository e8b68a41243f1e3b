//! Users REST routes under `/api/go/users`.
//!
//! ERROR HANDLING
//! ==============
//! Client errors answer with the plain-text reason. A failed list query
//! answers `404` with an empty body, matching the contract the dashboard was
//! written against; other database failures answer `500`.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use tracing::{error, info, warn};

use crate::services::user::{self, User, UserError};
use crate::state::AppState;

type ErrorResponse = (StatusCode, String);

pub(crate) fn user_error_to_response(err: UserError) -> ErrorResponse {
    match err {
        UserError::InvalidId | UserError::InvalidJson(_) | UserError::Validation(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        UserError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        UserError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, String::new()),
    }
}

/// `GET /api/go/users` — list every user.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, StatusCode> {
    match user::list_users(&state.pool).await {
        Ok(users) => Ok(Json(users)),
        Err(e) => {
            warn!(error = %e, "list users failed");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// `GET /api/go/users/:id` — fetch one user.
pub async fn get_user(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Json<User>, ErrorResponse> {
    let id = user::parse_user_id(&raw_id).map_err(user_error_to_response)?;
    match user::get_user(&state.pool, id).await {
        Ok(found) => Ok(Json(found)),
        Err(e) => {
            if matches!(e, UserError::Database(_)) {
                error!(%id, error = %e, "get user failed");
            }
            Err(user_error_to_response(e))
        }
    }
}

/// `POST /api/go/users` — validate the body and insert a user.
pub async fn create_user(State(state): State<AppState>, body: Bytes) -> Result<(StatusCode, Json<User>), ErrorResponse> {
    let new_user = user::parse_new_user(&body).map_err(user_error_to_response)?;
    match user::create_user(&state.pool, &new_user).await {
        Ok(created) => {
            info!(id = created.id, "user created");
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(e) => {
            error!(error = %e, "insert error");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "failed to create user".to_owned()))
        }
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
