//! Email/password signup and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use ekubo_api::ApiError;
use ekubo_auth::password;
use ekubo_core::{LoginRequest, SignupRequest, UserRecord};
use serde_json::json;
use tracing::info;

use crate::routes::{decode, map_store};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;

    if find_by_email(&state, &payload.email).await?.is_some() {
        return Err(ApiError::bad_request("Email already exists"));
    }

    let hashed = password::hash(&payload.password)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?;
    let fields = json!({
        "email": payload.email,
        "username": payload.username,
        "password": hashed,
    });
    let row = state
        .store
        .create("users", &fields)
        .await
        .map_err(map_store)?;
    let user: UserRecord = decode(row)?;
    info!(id = user.id, username = %user.username, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "User created successfully"})),
    ))
}

/// A missing user and a wrong password are deliberately the same outcome,
/// so the response never reveals which field was wrong.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invalid = || ApiError::bad_request("Invalid email or password");

    let user = find_by_email(&state, &payload.email)
        .await?
        .ok_or_else(invalid)?;

    let verified = password::verify(&payload.password, &user.password)
        .map_err(|e| ApiError::internal(format!("password verification failed: {e}")))?;
    if !verified {
        return Err(invalid());
    }

    let token = state
        .tokens
        .issue(user.id, &user.email, &user.username)
        .map_err(|e| ApiError::internal(format!("token issuance failed: {e}")))?;
    info!(id = user.id, "user logged in");
    Ok(Json(json!({"token": token})))
}

async fn find_by_email(state: &AppState, email: &str) -> Result<Option<UserRecord>, ApiError> {
    let filters = vec![("email".to_string(), email.to_string())];
    let rows = state
        .store
        .search("users", &filters, 0, 1)
        .await
        .map_err(map_store)?;
    rows.into_iter().next().map(decode).transpose()
}
