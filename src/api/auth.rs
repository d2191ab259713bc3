//! Registration and login handlers.
//!
//! Each request runs the same synchronous workflow: validate the input
//! shape, hit the identity store once, and (for login) sign a token. No
//! retries, no transactions, no state shared across requests beyond the
//! pool itself. Note that a registration racing a login for the same
//! username is unguarded; the login simply sees whatever rows are
//! committed at query time.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiError;
use crate::db::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User};
use crate::token;
use crate::AppState;

/// Register a new user.
///
/// POST /register
///
/// No duplicate-username check is performed: two registrations with the
/// same username both succeed and get distinct ids. Registration never
/// issues a token; clients log in separately.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    if request.username.is_empty() || request.password.is_empty() || request.email.is_empty() {
        return Err(ApiError::Validation(
            "Username, password, and email are required".to_string(),
        ));
    }

    let id = User::insert(&state.db, &request.username, &request.password, &request.email).await?;

    info!(user_id = id, username = %request.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Authenticate and issue a token.
///
/// POST /login
///
/// Unknown usernames and wrong passwords produce the identical 401
/// response. Empty credentials simply never match a row, so they land on
/// the same 401 path.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = User::find_by_credentials(&state.db, &request.username, &request.password)
        .await?
        .ok_or(ApiError::Authentication)?;

    let token = token::issue(
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_secs,
        user.id,
    )?;

    info!(user_id = user.id, "login succeeded");

    Ok(Json(LoginResponse { token }))
}
